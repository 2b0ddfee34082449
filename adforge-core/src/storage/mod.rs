//! Generated-image persistence and the optional remote mirror seam.

pub mod generated_store;
pub mod mirror;
