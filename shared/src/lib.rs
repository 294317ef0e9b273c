//! Shared types for the HR workspace
//!
//! Common types used by both hr-server and hr-client: the error
//! taxonomy, domain models, API DTOs, token claims and the role policy
//! table that both enforcement points consult.

pub mod client;
pub mod error;
pub mod models;
pub mod policy;
pub mod util;
