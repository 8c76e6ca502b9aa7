use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CrmError;

/// Credit classification of a customer
///
/// Persisted and serialized by symbolic name only (`"VeryGood"`), never by
/// position, so reordering or inserting variants does not corrupt stored
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreditRating {
    Excellent,
    VeryVeryGood,
    VeryGood,
    Good,
    #[default]
    Neutral,
    Poor,
    Terrible,
    Bad,
}

impl CreditRating {
    pub const ALL: [CreditRating; 8] = [
        CreditRating::Excellent,
        CreditRating::VeryVeryGood,
        CreditRating::VeryGood,
        CreditRating::Good,
        CreditRating::Neutral,
        CreditRating::Poor,
        CreditRating::Terrible,
        CreditRating::Bad,
    ];

    /// The symbolic name used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRating::Excellent => "Excellent",
            CreditRating::VeryVeryGood => "VeryVeryGood",
            CreditRating::VeryGood => "VeryGood",
            CreditRating::Good => "Good",
            CreditRating::Neutral => "Neutral",
            CreditRating::Poor => "Poor",
            CreditRating::Terrible => "Terrible",
            CreditRating::Bad => "Bad",
        }
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditRating {
    type Err = CrmError;

    /// Exact, case-sensitive match on the symbolic name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CreditRating::ALL
            .into_iter()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| CrmError::InvalidCreditRating {
                value: s.to_string(),
            })
    }
}
