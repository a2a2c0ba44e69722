//! # Application Services
//!
//! Use cases that orchestrate domain logic and infrastructure:
//! - [`AuthService`]: registration, login, session resolution
//! - [`CompanyService`]: company CRUD with fit ratings
//! - [`PreferenceService`]: preference read and replace
//! - [`DashboardService`]: the combined landing view

pub mod auth_service;
pub mod company_service;
pub mod dashboard;
pub mod preference_service;

pub use auth_service::{AuthService, LoginCommand, RegisterCommand, Session};
pub use company_service::{AddOutcome, CompanyService, DEFAULT_DUPLICATE_WINDOW};
pub use dashboard::{Dashboard, DashboardService};
pub use preference_service::{PreferenceService, PreferenceUpdate};
