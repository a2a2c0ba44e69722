//! # Domain Services
//!
//! Domain logic that does not belong to a single entity.
//!
//! ## Services
//!
//! - [`rating::RatingStrategy`]: grades a company against an analyst's preferences

pub mod rating;

pub use rating::{MatchBreakdown, PreferenceMatchStrategy, RatedCompany, Rating, RatingStrategy};
