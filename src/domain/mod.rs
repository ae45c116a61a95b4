//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Services receive repositories by injection (see [`crate::application::services`])
//! - Uniqueness invariants are ultimately enforced by store constraints; repository
//!   implementations surface violations as [`crate::error::AppError::AlreadyExists`]

pub mod entities;
pub mod repositories;
