//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short codes and API tokens

pub mod code_generator;
