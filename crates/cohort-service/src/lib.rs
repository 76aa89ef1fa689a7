//! Cohort Service — group lifecycle orchestration on top of a
//! [`GroupRepository`](cohort_core::repository::GroupRepository) and the
//! [`AccessPolicy`](cohort_core::AccessPolicy).

pub mod config;
pub mod request;
pub mod service;

pub use config::ServiceConfig;
pub use request::{CreateGroupRequest, UpdateGroupRequest};
pub use service::GroupService;
