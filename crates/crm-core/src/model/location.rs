use std::fmt;

use serde::{Deserialize, Serialize};

/// Postal address value
///
/// Has no identity of its own: it is embedded by value in `Customer` and
/// `Order` and compared field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
}

impl Location {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            province: province.into(),
            country: country.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.province.is_empty()
            && self.country.is_empty()
    }
}

impl fmt::Display for Location {
    /// Non-empty parts joined with ", "
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.street, &self.city, &self.province, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        f.write_str(&parts.join(", "))
    }
}
