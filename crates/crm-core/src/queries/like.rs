//! SQL LIKE pattern matching
//!
//! `%` matches any run of characters (including none), `_` matches exactly
//! one character. ASCII letters compare case-insensitively, which is what
//! SQLite's built-in LIKE does.

/// Match `text` against a LIKE `pattern`
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    // Position of the last `%` seen and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        match p.get(pi) {
            Some('%') => {
                backtrack = Some((pi, ti));
                pi += 1;
            }
            Some(&pc) if pc == '_' || pc.eq_ignore_ascii_case(&t[ti]) => {
                pi += 1;
                ti += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    pi = star + 1;
                    ti = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    p[pi..].iter().all(|&c| c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert!(like_matches("J%", "John3"));
        assert!(like_matches("J%", "J"));
        assert!(!like_matches("J%", "Ajax"));
    }

    #[test]
    fn test_case_insensitive_ascii() {
        assert!(like_matches("j%", "John"));
        assert!(like_matches("%DOE%", "john doe3"));
    }

    #[test]
    fn test_underscore_is_single_char() {
        assert!(like_matches("Doe_", "Doe3"));
        assert!(!like_matches("Doe_", "Doe"));
        assert!(!like_matches("Doe_", "Doe33"));
    }

    #[test]
    fn test_inner_and_trailing_wildcards() {
        assert!(like_matches("%oh%3", "John3"));
        assert!(like_matches("a%b%c", "aXXbYYc"));
        assert!(!like_matches("a%b%c", "aXXcYYb"));
        assert!(like_matches("%", ""));
        assert!(like_matches("%%", "anything"));
    }

    #[test]
    fn test_exact_without_wildcards() {
        assert!(like_matches("Doe3", "doe3"));
        assert!(!like_matches("Doe3", "Doe"));
        assert!(!like_matches("", "x"));
        assert!(like_matches("", ""));
    }
}
