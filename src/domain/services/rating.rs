//! # Fit Rating
//!
//! Grades a company against its owner's preferences.
//!
//! The grade counts how many of the three comparable axes (industry, stage,
//! location) match the corresponding preference set, then maps the count
//! through a fixed table:
//!
//! | matches | grade |
//! |---------|-------|
//! | 3       | A     |
//! | 2       | B     |
//! | 1       | C     |
//! | 0       | D     |
//!
//! An analyst without a preference model always gets `D`.
//!
//! # Examples
//!
//! ```
//! use otani::domain::entities::{CompanyBuilder, PreferenceModel};
//! use otani::domain::services::rating::{PreferenceMatchStrategy, RatingStrategy};
//! use otani::domain::value_objects::{AnalystId, Grade, PreferenceSet};
//!
//! let analyst = AnalystId::new_v4();
//! let prefs = PreferenceModel::builder(analyst)
//!     .industries(PreferenceSet::from_raw(["fintech"]))
//!     .stages(PreferenceSet::from_raw(["seed"]))
//!     .locations(PreferenceSet::from_raw(["north_america"]))
//!     .build();
//! let company = CompanyBuilder::new(analyst, "Ledgerly", "Fintech", "Seed", "North America").build();
//!
//! let rating = PreferenceMatchStrategy.rate(&company, Some(&prefs));
//! assert_eq!(rating.grade(), Grade::A);
//! ```

use crate::domain::entities::{Company, PreferenceModel};
use crate::domain::value_objects::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which axes matched the preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// Industry is a preferred industry.
    pub industry: bool,
    /// Stage is a preferred stage.
    pub stage: bool,
    /// Location is a preferred location.
    pub location: bool,
}

impl MatchBreakdown {
    /// Number of matching axes, 0 through 3.
    #[must_use]
    pub fn count(&self) -> u8 {
        u8::from(self.industry) + u8::from(self.stage) + u8::from(self.location)
    }
}

/// Outcome of rating one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    grade: Grade,
    matches: MatchBreakdown,
}

impl Rating {
    /// Builds a rating from a breakdown using the fixed grade table.
    #[must_use]
    pub fn from_matches(matches: MatchBreakdown) -> Self {
        Self {
            grade: Grade::from_match_count(matches.count()),
            matches,
        }
    }

    /// The rating given when no preferences are known.
    #[must_use]
    pub fn unrated() -> Self {
        Self::from_matches(MatchBreakdown::default())
    }

    /// The letter grade.
    #[inline]
    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Per-axis match flags.
    #[inline]
    #[must_use]
    pub fn matches(&self) -> MatchBreakdown {
        self.matches
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/3)", self.grade, self.matches.count())
    }
}

/// A company paired with its computed rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedCompany {
    /// The company.
    pub company: Company,
    /// Its rating against the owner's current preferences.
    pub rating: Rating,
}

/// Strategy for grading companies against preferences.
pub trait RatingStrategy: Send + Sync + fmt::Debug {
    /// Rates a single company. `None` preferences mean "nothing known".
    fn rate(&self, company: &Company, preferences: Option<&PreferenceModel>) -> Rating;

    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;

    /// Rates every company against the same preferences, preserving order.
    fn rate_all(
        &self,
        companies: Vec<Company>,
        preferences: Option<&PreferenceModel>,
    ) -> Vec<RatedCompany> {
        companies
            .into_iter()
            .map(|company| {
                let rating = self.rate(&company, preferences);
                RatedCompany { company, rating }
            })
            .collect()
    }
}

/// Counts exact matches of normalized industry, stage and location.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceMatchStrategy;

impl PreferenceMatchStrategy {
    /// Rates raw axis values directly.
    #[must_use]
    pub fn rate_axes(
        industry: &str,
        stage: &str,
        location: &str,
        preferences: Option<&PreferenceModel>,
    ) -> Rating {
        let Some(prefs) = preferences else {
            return Rating::unrated();
        };

        Rating::from_matches(MatchBreakdown {
            industry: prefs.industries().contains(industry),
            stage: prefs.stages().contains(stage),
            location: prefs.locations().contains(location),
        })
    }
}

impl RatingStrategy for PreferenceMatchStrategy {
    fn rate(&self, company: &Company, preferences: Option<&PreferenceModel>) -> Rating {
        Self::rate_axes(
            company.industry(),
            company.stage(),
            company.location(),
            preferences,
        )
    }

    fn name(&self) -> &'static str {
        "preference_match"
    }
}
