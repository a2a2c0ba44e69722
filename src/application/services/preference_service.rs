//! # Preference Service
//!
//! Reads and replaces an analyst's preference model.
//!
//! A save must carry all four lists (`industry`, `stage`, `location`,
//! `investment_amount`), each a JSON array of strings. `additional_info` is
//! an optional string. Values are normalized before they are stored, and the
//! whole model is replaced in one step.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::PreferenceModel;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{AnalystId, PreferenceSet, Timestamp};
use crate::infrastructure::persistence::PreferenceRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Validated preference submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceUpdate {
    /// Industries.
    pub industries: PreferenceSet,
    /// Funding stages.
    pub stages: PreferenceSet,
    /// Geographies.
    pub locations: PreferenceSet,
    /// Investment-size bands.
    pub investment_sizes: PreferenceSet,
    /// Free-text notes.
    pub additional_info: String,
}

impl PreferenceUpdate {
    /// Validates a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the body is not an object, a list field is
    /// missing or not a list of strings, or `additional_info` is not a
    /// string.
    pub fn from_json(body: &Value) -> ApplicationResult<Self> {
        let Some(object) = body.as_object() else {
            return Err(ApplicationError::invalid_request(
                "Request body must be a JSON object",
            ));
        };

        let list = |field: &'static str| -> Result<PreferenceSet, DomainError> {
            let value = object.get(field).ok_or(DomainError::MissingField(field))?;
            let items = value
                .as_array()
                .ok_or_else(|| DomainError::invalid_field(field, "expected a list of strings"))?;
            items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| {
                        DomainError::invalid_field(field, "expected a list of strings")
                    })
                })
                .collect::<Result<Vec<&str>, _>>()
                .map(PreferenceSet::from_raw)
        };

        let additional_info = match object.get("additional_info") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(
                    DomainError::invalid_field("additional_info", "expected a string").into(),
                );
            }
        };

        Ok(Self {
            industries: list("industry")?,
            stages: list("stage")?,
            locations: list("location")?,
            investment_sizes: list("investment_amount")?,
            additional_info,
        })
    }

    /// Builds the model for `analyst` as of `now`.
    #[must_use]
    pub fn into_model(self, analyst: AnalystId, now: Timestamp) -> PreferenceModel {
        PreferenceModel::builder(analyst)
            .industries(self.industries)
            .stages(self.stages)
            .locations(self.locations)
            .investment_sizes(self.investment_sizes)
            .additional_info(self.additional_info)
            .updated_at(now)
            .build()
    }
}

/// Preference use cases.
#[derive(Debug, Clone)]
pub struct PreferenceService {
    preferences: Arc<dyn PreferenceRepository>,
}

impl PreferenceService {
    /// Creates a new preference service.
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self { preferences }
    }

    /// Returns the analyst's model, or `None` if they never saved one.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn get(&self, analyst: AnalystId) -> ApplicationResult<Option<PreferenceModel>> {
        Ok(self.preferences.get(&analyst).await?)
    }

    /// Returns the analyst's model, creating an empty one if needed.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn ensure(&self, analyst: AnalystId) -> ApplicationResult<PreferenceModel> {
        Ok(self
            .preferences
            .insert_if_absent(&PreferenceModel::empty(analyst))
            .await?)
    }

    /// Validates `body` and replaces the analyst's model with it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the offending field; the stored model is
    /// left unchanged in that case.
    #[tracing::instrument(skip_all, fields(analyst = %analyst))]
    pub async fn save(&self, analyst: AnalystId, body: &Value) -> ApplicationResult<PreferenceModel> {
        let model = PreferenceUpdate::from_json(body)?.into_model(analyst, Timestamp::now());
        self.preferences.replace(&model).await?;
        info!(
            industries = model.industries().len(),
            stages = model.stages().len(),
            locations = model.locations().len(),
            "preferences saved"
        );
        Ok(model)
    }
}
