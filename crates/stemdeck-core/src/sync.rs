//! Sync monitor - drift correction between stems of one deck
//!
//! Independently buffered sources accumulate positional disagreement over
//! time. On every position-update tick of the reference stem, any other
//! stem that has drifted past the threshold is hard-snapped back to the
//! reference position. Snapping can produce a micro-click; that trade-off
//! buys bounded worst-case drift with no rate manipulation.

use crate::source::StemSource;
use crate::stem_set::StemSet;
use crate::types::DRIFT_THRESHOLD_SECS;

/// Drift watcher for one deck's stem set
#[derive(Debug, Clone)]
pub struct SyncMonitor {
    /// Drift beyond this many seconds triggers a snap
    threshold: f64,
}

impl Default for SyncMonitor {
    fn default() -> Self {
        Self {
            threshold: DRIFT_THRESHOLD_SECS,
        }
    }
}

impl SyncMonitor {
    /// Create a monitor with a custom threshold in seconds
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold in seconds
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Measure every non-reference stem against the reference and snap the
    /// ones that drifted too far. Returns the number of corrections.
    ///
    /// Never adjusts the reference stem itself and never touches playback
    /// rates.
    pub fn tick<S: StemSource>(&self, set: &mut StemSet<S>) -> usize {
        let reference = set.reference_kind();
        let t_ref = set.reference_position();

        let mut corrected = 0;
        for (kind, source) in set.iter_mut() {
            if kind == reference {
                continue;
            }
            let drift = (source.position() - t_ref).abs();
            if drift > self.threshold {
                log::debug!("[SYNC] snapping '{kind}': drift {drift:.3}s at t={t_ref:.3}s");
                source.seek(t_ref);
                corrected += 1;
            }
        }
        corrected
    }
}
