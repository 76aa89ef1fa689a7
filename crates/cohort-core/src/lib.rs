//! Cohort Core — domain models, error types, repository traits and the
//! group access policy shared by every other crate.

pub mod error;
pub mod models;
pub mod policy;
pub mod query;
pub mod repository;
pub mod roles;

pub use error::{CohortError, CohortResult};
pub use models::permission::Permission;
pub use policy::{AccessPolicy, Decision, Operation};
pub use roles::RoleRegistry;
