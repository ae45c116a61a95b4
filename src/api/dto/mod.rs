//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `Validate` for field-level checks; response DTOs are
//! explicit view structs built from service results, one per use case.

pub mod catalog;
pub mod health;
pub mod pagination;
pub mod recipe;
pub mod short_link;
pub mod user;
