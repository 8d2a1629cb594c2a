//! Immutable per-tick snapshot of all four metric groups.

use crate::display::{MetricGroup, MetricRecord, MetricRow};
use crate::metrics::{AiDiagnostics, DatabaseCluster, LedgerNetwork, SystemResources};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Something a [`crate::Collector`] produces and a display consumes.
pub trait Snapshot: Clone + Send + 'static {
    /// State shown before the first tick.
    fn empty() -> Self;
}

/// All four records produced by one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// 0 for the initial snapshot, then 1, 2, ...
    pub tick: u64,
    pub system: SystemResources,
    pub ai: AiDiagnostics,
    pub ledger: LedgerNetwork,
    pub database: DatabaseCluster,
}

impl DashboardSnapshot {
    /// Sample every field of every group independently.
    pub fn sample<R: Rng + ?Sized>(tick: u64, rng: &mut R) -> Self {
        Self {
            tick,
            system: SystemResources::sample(rng),
            ai: AiDiagnostics::sample(rng),
            ledger: LedgerNetwork::sample(rng),
            database: DatabaseCluster::sample(rng),
        }
    }

    /// Rows for one card.
    #[must_use]
    pub fn rows(&self, group: MetricGroup) -> Vec<MetricRow> {
        match group {
            MetricGroup::SystemResources => self.system.rows(),
            MetricGroup::AiDiagnostics => self.ai.rows(),
            MetricGroup::LedgerNetwork => self.ledger.rows(),
            MetricGroup::DatabaseCluster => self.database.rows(),
        }
    }

    /// Every card in display order.
    #[must_use]
    pub fn cards(&self) -> Vec<(MetricGroup, Vec<MetricRow>)> {
        MetricGroup::all()
            .into_iter()
            .map(|group| (group, self.rows(group)))
            .collect()
    }
}

impl Snapshot for DashboardSnapshot {
    fn empty() -> Self {
        Self {
            tick: 0,
            system: SystemResources::initial(),
            ai: AiDiagnostics::initial(),
            ledger: LedgerNetwork::initial(),
            database: DatabaseCluster::initial(),
        }
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
