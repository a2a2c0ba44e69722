//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`AnalystId`], [`CompanyId`]: UUID-based identifiers
//! - [`EmailAddress`]: canonical login identifier
//!
//! ## Rating Types
//!
//! - [`Grade`]: the A–D letter scale
//! - [`PreferenceSet`]: normalized preference tokens
//!
//! ## Time
//!
//! - [`Timestamp`]: UTC point in time

pub mod email;
pub mod grade;
pub mod ids;
pub mod preference;
pub mod timestamp;

pub use email::EmailAddress;
pub use grade::Grade;
pub use ids::{AnalystId, CompanyId};
pub use preference::{normalize_token, PreferenceSet};
pub use timestamp::Timestamp;
