//! # Letter Grades
//!
//! The A–D scale shared by the computed fit grade and the analyst's own
//! subjective rating of a company.
//!
//! # Examples
//!
//! ```
//! use otani::domain::value_objects::Grade;
//!
//! assert_eq!(Grade::from_match_count(3), Grade::A);
//! assert_eq!(Grade::from_match_count(0), Grade::D);
//! assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
//! ```

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade from best (`A`) to worst (`D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Grade {
    /// All three axes match.
    A = 0,
    /// Two axes match.
    B = 1,
    /// One axis matches.
    C = 2,
    /// Nothing matches, or no preferences are known.
    D = 3,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Maps a preference match count to a grade.
    ///
    /// Counts above three saturate at `A`.
    #[must_use]
    pub const fn from_match_count(matches: u8) -> Self {
        match matches {
            0 => Self::D,
            1 => Self::C,
            2 => Self::B,
            _ => Self::A,
        }
    }

    /// Returns the grade letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Parses an optional free-form rating, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidGrade`] when a non-blank value is not a
    /// single letter A–D.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Grade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(DomainError::InvalidGrade(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn match_count_table() {
        assert_eq!(Grade::from_match_count(0), Grade::D);
        assert_eq!(Grade::from_match_count(1), Grade::C);
        assert_eq!(Grade::from_match_count(2), Grade::B);
        assert_eq!(Grade::from_match_count(3), Grade::A);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("a".parse::<Grade>().unwrap(), Grade::A);
        assert_eq!(" D ".parse::<Grade>().unwrap(), Grade::D);
    }

    #[test]
    fn parse_rejects_other_letters() {
        assert!("E".parse::<Grade>().is_err());
        assert!("AB".parse::<Grade>().is_err());
        assert!("".parse::<Grade>().is_err());
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(Grade::parse_optional(None).unwrap(), None);
        assert_eq!(Grade::parse_optional(Some("  ")).unwrap(), None);
        assert_eq!(Grade::parse_optional(Some("c")).unwrap(), Some(Grade::C));
        assert!(Grade::parse_optional(Some("x")).is_err());
    }

    #[test]
    fn serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::B).unwrap(), "\"B\"");
        assert_eq!(Grade::A.to_string(), "A");
    }
}
