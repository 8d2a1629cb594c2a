//! Collectors produce one snapshot per tick.

use crate::seed::rng_for;
use crate::snapshot::{DashboardSnapshot, Snapshot};
use rand::rngs::StdRng;
use rand::Rng;

/// Source of snapshots driven by a [`crate::Ticker`].
///
/// `collect` runs on the ticker thread, so the collector owns everything it
/// needs and shares nothing with the display side.
pub trait Collector: Send + 'static {
    type Snapshot: Snapshot;

    fn collect(&mut self) -> Self::Snapshot;
}

/// Generates [`DashboardSnapshot`]s by independent uniform sampling.
#[derive(Debug, Clone)]
pub struct SyntheticCollector<R = StdRng> {
    rng: R,
    tick: u64,
}

impl SyntheticCollector<StdRng> {
    /// Reproducible collector for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(rng_for(Some(seed)))
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::with_rng(rng_for(seed))
    }
}

impl<R: Rng> SyntheticCollector<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng, tick: 0 }
    }

    /// Number of snapshots produced so far.
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Produce the next snapshot.
    pub fn next_snapshot(&mut self) -> DashboardSnapshot {
        self.tick += 1;
        DashboardSnapshot::sample(self.tick, &mut self.rng)
    }
}

impl<R: Rng + Send + 'static> Collector for SyntheticCollector<R> {
    type Snapshot = DashboardSnapshot;

    fn collect(&mut self) -> DashboardSnapshot {
        self.next_snapshot()
    }
}

impl<R: Rng> Iterator for SyntheticCollector<R> {
    type Item = DashboardSnapshot;

    fn next(&mut self) -> Option<DashboardSnapshot> {
        Some(self.next_snapshot())
    }
}
