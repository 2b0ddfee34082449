//! Generative image backend contract and built-in implementations.

pub mod mock;

use image::RgbaImage;

use crate::foundation::error::AdforgeResult;

/// Capability contract for generative image backends.
///
/// A failure here is fatal to the current run; the pipeline surfaces it
/// without retrying. Remote backends (developer/vertex style) implement this
/// trait and enter the pipeline through
/// [`crate::pipeline::run_pipeline_with`].
pub trait ImageProvider {
    /// Short backend name recorded into the manifest.
    fn name(&self) -> &str;

    /// Generate a base hero image for `prompt` at `size`.
    fn generate_base_hero(
        &self,
        prompt: &str,
        size: (u32, u32),
        negative_prompt: Option<&str>,
    ) -> AdforgeResult<RgbaImage>;
}

/// Built-in provider selection keyed on run configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// Deterministic offline provider for tests and dry runs.
    #[default]
    Mock,
}

impl ProviderKind {
    /// Name recorded into manifests for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
        }
    }
}

/// Construct the built-in provider for `kind`.
pub fn create_provider(kind: ProviderKind) -> Box<dyn ImageProvider> {
    match kind {
        ProviderKind::Mock => Box::new(mock::MockImageProvider),
    }
}
