//! # Preference Model
//!
//! An analyst's investment criteria. One per analyst, replaced wholesale on
//! every save.

use crate::domain::value_objects::{AnalystId, PreferenceSet, Timestamp};
use serde::{Deserialize, Serialize};

/// Investment preferences of a single analyst.
///
/// All four sets hold normalized tokens. Only industries, stages and
/// locations take part in the fit grade; investment sizes are informational.
///
/// # Examples
///
/// ```
/// use otani::domain::entities::PreferenceModel;
/// use otani::domain::value_objects::{AnalystId, PreferenceSet};
///
/// let prefs = PreferenceModel::builder(AnalystId::new_v4())
///     .industries(PreferenceSet::from_raw(["Fintech"]))
///     .stages(PreferenceSet::from_raw(["Seed"]))
///     .build();
///
/// assert!(prefs.industries().contains("FinTech"));
/// assert!(prefs.locations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceModel {
    analyst_id: AnalystId,
    industries: PreferenceSet,
    stages: PreferenceSet,
    locations: PreferenceSet,
    investment_sizes: PreferenceSet,
    additional_info: String,
    updated_at: Timestamp,
}

impl PreferenceModel {
    /// Creates an empty model for `analyst_id`.
    #[must_use]
    pub fn empty(analyst_id: AnalystId) -> Self {
        Self::builder(analyst_id).build()
    }

    /// Starts a builder for `analyst_id`.
    #[must_use]
    pub fn builder(analyst_id: AnalystId) -> PreferenceModelBuilder {
        PreferenceModelBuilder {
            model: Self {
                analyst_id,
                industries: PreferenceSet::new(),
                stages: PreferenceSet::new(),
                locations: PreferenceSet::new(),
                investment_sizes: PreferenceSet::new(),
                additional_info: String::new(),
                updated_at: Timestamp::now(),
            },
        }
    }

    /// Returns the owning analyst.
    #[inline]
    #[must_use]
    pub fn analyst_id(&self) -> AnalystId {
        self.analyst_id
    }

    /// Preferred industry sectors.
    #[must_use]
    pub fn industries(&self) -> &PreferenceSet {
        &self.industries
    }

    /// Preferred funding stages.
    #[must_use]
    pub fn stages(&self) -> &PreferenceSet {
        &self.stages
    }

    /// Preferred geographies.
    #[must_use]
    pub fn locations(&self) -> &PreferenceSet {
        &self.locations
    }

    /// Preferred investment-size bands.
    #[must_use]
    pub fn investment_sizes(&self) -> &PreferenceSet {
        &self.investment_sizes
    }

    /// Free-text notes.
    #[must_use]
    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    /// When the model was last saved.
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if every set is empty and there are no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
            && self.stages.is_empty()
            && self.locations.is_empty()
            && self.investment_sizes.is_empty()
            && self.additional_info.is_empty()
    }
}

/// Builder for [`PreferenceModel`].
#[derive(Debug, Clone)]
#[must_use]
pub struct PreferenceModelBuilder {
    model: PreferenceModel,
}

impl PreferenceModelBuilder {
    /// Sets preferred industries.
    pub fn industries(mut self, set: PreferenceSet) -> Self {
        self.model.industries = set;
        self
    }

    /// Sets preferred stages.
    pub fn stages(mut self, set: PreferenceSet) -> Self {
        self.model.stages = set;
        self
    }

    /// Sets preferred locations.
    pub fn locations(mut self, set: PreferenceSet) -> Self {
        self.model.locations = set;
        self
    }

    /// Sets preferred investment sizes.
    pub fn investment_sizes(mut self, set: PreferenceSet) -> Self {
        self.model.investment_sizes = set;
        self
    }

    /// Sets the free-text notes (trimmed).
    pub fn additional_info(mut self, info: impl AsRef<str>) -> Self {
        self.model.additional_info = info.as_ref().trim().to_string();
        self
    }

    /// Sets the update time.
    pub fn updated_at(mut self, at: Timestamp) -> Self {
        self.model.updated_at = at;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> PreferenceModel {
        self.model
    }
}
