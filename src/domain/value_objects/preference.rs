//! # Preference Tokens
//!
//! Normalization of preference values and the set type that holds them.
//!
//! Stored preferences and company attributes are compared through the same
//! [`normalize_token`] function, so `"AI/ML"`, `"ai ml"` and `"ai_ml"` are all
//! the same token.
//!
//! # Examples
//!
//! ```
//! use otani::domain::value_objects::preference::{normalize_token, PreferenceSet};
//!
//! assert_eq!(normalize_token(" North America "), "north_america");
//!
//! let stages = PreferenceSet::from_raw(["Seed", "Series A"]);
//! assert!(stages.contains("series a"));
//! assert!(!stages.contains(""));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonicalizes a raw preference value.
///
/// Trims surrounding whitespace, lower-cases, and replaces every space and
/// forward slash with an underscore. Blank input yields an empty string.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

/// A set of normalized, non-empty preference tokens.
///
/// Ordering is lexical so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PreferenceSet(BTreeSet<String>);

impl PreferenceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw values, normalizing each and dropping blanks.
    pub fn from_raw<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .map(|v| normalize_token(v.as_ref()))
                .filter(|token| !token.is_empty())
                .collect(),
        )
    }

    /// Returns true if the normalized form of `raw` is in the set.
    ///
    /// Blank input never matches.
    #[must_use]
    pub fn contains(&self, raw: &str) -> bool {
        let token = normalize_token(raw);
        !token.is_empty() && self.0.contains(&token)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over tokens in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the tokens as an owned vector, in lexical order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl From<Vec<String>> for PreferenceSet {
    fn from(values: Vec<String>) -> Self {
        Self::from_raw(values)
    }
}

impl From<PreferenceSet> for Vec<String> {
    fn from(set: PreferenceSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_raw(iter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalizes_case_spaces_and_slashes() {
        assert_eq!(normalize_token("AI/ML"), "ai_ml");
        assert_eq!(normalize_token("ai_ml"), "ai_ml");
        assert_eq!(normalize_token("  Series A "), "series_a");
        assert_eq!(normalize_token("North America"), "north_america");
    }

    #[test]
    fn blank_normalizes_to_empty() {
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn set_drops_blank_tokens() {
        let set = PreferenceSet::from_raw(["", "  ", "Fintech"]);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(""));
        assert!(set.contains("FINTECH"));
    }

    #[test]
    fn set_deduplicates_equivalent_spellings() {
        let set = PreferenceSet::from_raw(["AI/ML", "ai ml", "ai_ml"]);
        assert_eq!(set.to_vec(), vec!["ai_ml".to_string()]);
    }

    #[test]
    fn deserializing_normalizes() {
        let set: PreferenceSet = serde_json::from_str(r#"["Health Care", "SaaS"]"#).unwrap();
        assert_eq!(set.to_vec(), vec!["health_care".to_string(), "saas".to_string()]);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "[ -~\\t]{0,40}") {
            let once = normalize_token(&raw);
            prop_assert_eq!(normalize_token(&once), once);
        }

        #[test]
        fn normalized_tokens_have_no_spaces_or_slashes(raw in "[ a-zA-Z/_]{0,30}") {
            let token = normalize_token(&raw);
            prop_assert!(!token.contains(' '));
            prop_assert!(!token.contains('/'));
        }

        #[test]
        fn set_membership_ignores_spelling(raw in "[a-zA-Z]{1,10}( [a-zA-Z]{1,10})?") {
            let set = PreferenceSet::from_raw([raw.as_str()]);
            prop_assert!(set.contains(&raw.to_uppercase()));
            prop_assert!(set.contains(&raw.replace(' ', "/")));
        }
    }
}
