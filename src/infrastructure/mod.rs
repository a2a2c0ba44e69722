//! # Infrastructure Layer
//!
//! Adapters for everything outside the domain: storage, password hashing,
//! session tokens and log output.

pub mod credentials;
pub mod logging;
pub mod persistence;
pub mod session;
