//! Crate-wide primitives: error taxonomy and small shared helpers.

pub mod color;
pub mod error;
