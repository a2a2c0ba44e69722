//! # Domain Entities
//!
//! ## Aggregates
//!
//! - [`Analyst`]: a registered user
//! - [`Company`]: a deal tracked by an analyst
//! - [`PreferenceModel`]: an analyst's investment criteria

pub mod analyst;
pub mod company;
pub mod preferences;

pub use analyst::Analyst;
pub use company::{Company, CompanyBuilder, CompanyDraft};
pub use preferences::{PreferenceModel, PreferenceModelBuilder};
