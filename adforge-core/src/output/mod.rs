//! Run outputs: the campaign manifest, run metrics, and file writing.

pub mod manifest;
pub mod metrics;
pub mod writer;
