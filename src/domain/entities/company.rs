//! # Company Entity
//!
//! A candidate investment ("deal") recorded by an analyst.
//!
//! Companies are created from a [`CompanyDraft`], which carries the raw,
//! possibly incomplete submission and checks the required fields in a fixed
//! order: name, industry, stage, location.
//!
//! # Examples
//!
//! ```
//! use otani::domain::entities::CompanyDraft;
//! use otani::domain::value_objects::{AnalystId, Timestamp};
//!
//! let draft = CompanyDraft {
//!     name: Some("Ledgerly".into()),
//!     industry: Some("Fintech".into()),
//!     stage: Some("Seed".into()),
//!     location: Some("North America".into()),
//!     ..CompanyDraft::default()
//! };
//!
//! let company = draft.into_company(AnalystId::new_v4(), Timestamp::now()).unwrap();
//! assert_eq!(company.name(), "Ledgerly");
//! assert!(company.website().is_none());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AnalystId, CompanyId, Grade, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw company submission before validation.
///
/// Every field is optional so that a missing field can be reported by name
/// instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyDraft {
    /// Company name (required).
    #[serde(default)]
    pub name: Option<String>,
    /// Industry sector (required).
    #[serde(default)]
    pub industry: Option<String>,
    /// Funding stage (required).
    #[serde(default)]
    pub stage: Option<String>,
    /// Geography (required).
    #[serde(default)]
    pub location: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Analyst's own letter rating.
    #[serde(default)]
    pub rating: Option<String>,
}

impl CompanyDraft {
    /// Validates the draft and builds a new company owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for the first required field that
    /// is absent or blank, or [`DomainError::InvalidGrade`] if `rating` is not
    /// a letter A–D.
    pub fn into_company(self, owner: AnalystId, now: Timestamp) -> DomainResult<Company> {
        let name = required(self.name, "name")?;
        let industry = required(self.industry, "industry")?;
        let stage = required(self.stage, "stage")?;
        let location = required(self.location, "location")?;
        let rating = Grade::parse_optional(self.rating.as_deref())?;

        Ok(CompanyBuilder::new(owner, name, industry, stage, location)
            .website(optional(self.website))
            .contact_email(optional(self.email))
            .description(optional(self.description))
            .analyst_rating(rating)
            .created_at(now)
            .build())
    }
}

fn required(value: Option<String>, field: &'static str) -> DomainResult<String> {
    optional(value).ok_or(DomainError::MissingField(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A company tracked by an analyst.
///
/// Industry, stage and location are kept as entered; the fit grade compares
/// their normalized forms against the owner's preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    analyst_id: AnalystId,
    name: String,
    industry: String,
    stage: String,
    location: String,
    website: Option<String>,
    contact_email: Option<String>,
    description: Option<String>,
    analyst_rating: Option<Grade>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Company {
    /// Returns the company identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CompanyId {
        self.id
    }

    /// Returns the owning analyst.
    #[inline]
    #[must_use]
    pub fn analyst_id(&self) -> AnalystId {
        self.analyst_id
    }

    /// Returns true if `analyst` owns this company.
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, analyst: &AnalystId) -> bool {
        self.analyst_id == *analyst
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the industry as entered.
    #[must_use]
    pub fn industry(&self) -> &str {
        &self.industry
    }

    /// Returns the funding stage as entered.
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Returns the location as entered.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the website, if any.
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Returns the contact email, if any.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the analyst's own rating, if any.
    #[must_use]
    pub fn analyst_rating(&self) -> Option<Grade> {
        self.analyst_rating
    }

    /// Returns when the company was recorded.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the company was last modified.
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Company({} {} [{}/{}/{}])",
            self.id, self.name, self.industry, self.stage, self.location
        )
    }
}

/// Builder for [`Company`].
///
/// Used both for new submissions and for rehydrating stored rows.
#[derive(Debug, Clone)]
#[must_use]
pub struct CompanyBuilder {
    company: Company,
}

impl CompanyBuilder {
    /// Starts a builder with the required fields and a fresh id.
    pub fn new(
        analyst_id: AnalystId,
        name: impl Into<String>,
        industry: impl Into<String>,
        stage: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            company: Company {
                id: CompanyId::new_v4(),
                analyst_id,
                name: name.into(),
                industry: industry.into(),
                stage: stage.into(),
                location: location.into(),
                website: None,
                contact_email: None,
                description: None,
                analyst_rating: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Overrides the identifier.
    pub fn id(mut self, id: CompanyId) -> Self {
        self.company.id = id;
        self
    }

    /// Sets the website.
    pub fn website(mut self, website: Option<String>) -> Self {
        self.company.website = website;
        self
    }

    /// Sets the contact email.
    pub fn contact_email(mut self, email: Option<String>) -> Self {
        self.company.contact_email = email;
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.company.description = description;
        self
    }

    /// Sets the analyst's own rating.
    pub fn analyst_rating(mut self, rating: Option<Grade>) -> Self {
        self.company.analyst_rating = rating;
        self
    }

    /// Sets both creation and update time.
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.company.created_at = at;
        self.company.updated_at = at;
        self
    }

    /// Sets the update time.
    pub fn updated_at(mut self, at: Timestamp) -> Self {
        self.company.updated_at = at;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Company {
        self.company
    }
}
