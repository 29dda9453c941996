use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress counter for a running sweep.
///
/// Counts completed model invocations out of `reps × total_points`. Clones
/// share the same counters, so a UI thread can poll while the sweep runs.
#[derive(Debug, Clone, Default)]
pub struct SweepProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    passes: Arc<AtomicUsize>,
}

impl SweepProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Repetition passes finished so far
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Relaxed)
    }

    /// Fraction complete in `[0, 1]`; zero before the sweep starts
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `n` more finished repetition passes
    pub(crate) fn add_passes(&self, n: usize) {
        self.passes.fetch_add(n, Ordering::Relaxed);
    }

    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.passes.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }
}
