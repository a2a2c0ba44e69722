//! # Domain Layer
//!
//! Entities, value objects and the fit-rating service. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
