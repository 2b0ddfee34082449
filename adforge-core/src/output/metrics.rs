use std::time::Instant;

use serde::Serialize;

/// Additive counters for one run, serialized once at the end.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct RunMetrics {
    /// Products fully processed.
    pub total_products_processed: u32,
    /// Products skipped.
    pub products_skipped: u32,
    /// Products whose hero came from reuse (including prior generations).
    pub assets_reused: u32,
    /// Products whose hero required a fresh generation.
    pub assets_generated: u32,
    /// Ratio-by-locale variants produced.
    pub total_variants_produced: u32,
    /// Wall-clock run duration in seconds.
    pub execution_time_seconds: f64,
}

/// Wall-clock timer for run metrics.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the timer started.
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/metrics.rs"]
mod tests;
