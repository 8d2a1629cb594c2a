//! The four synthetic metric records.
//!
//! Every field is drawn independently on each tick. Nothing is carried over
//! from the previous record: no smoothing, no cross-group correlation.

use crate::display::{group_thousands, MetricGroup, MetricRecord, MetricRow};
use crate::range::{IntRange, JitterRange};
use crate::status::{Status, StatusRule};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Host resource usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemResources {
    /// Percent.
    pub cpu_usage: u32,
    /// Percent.
    pub memory_usage: u32,
    /// MB/s.
    pub disk_io: u32,
    /// MB/s.
    pub network_io: u32,
}

impl SystemResources {
    pub const CPU_USAGE: IntRange = IntRange::new(25, 30);
    pub const MEMORY_USAGE: IntRange = IntRange::new(35, 40);
    pub const DISK_IO: IntRange = IntRange::new(120, 50);
    pub const NETWORK_IO: IntRange = IntRange::new(340, 80);

    pub const CPU_RULE: StatusRule = StatusRule::Below(50.0);
    pub const MEMORY_RULE: StatusRule = StatusRule::Below(60.0);

    /// Values shown before the first tick.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            cpu_usage: 0,
            memory_usage: 0,
            disk_io: 0,
            network_io: 0,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cpu_usage: Self::CPU_USAGE.sample(rng) as u32,
            memory_usage: Self::MEMORY_USAGE.sample(rng) as u32,
            disk_io: Self::DISK_IO.sample(rng) as u32,
            network_io: Self::NETWORK_IO.sample(rng) as u32,
        }
    }
}

impl MetricRecord for SystemResources {
    const GROUP: MetricGroup = MetricGroup::SystemResources;

    fn rows(&self) -> Vec<MetricRow> {
        let cpu = f64::from(self.cpu_usage);
        let mem = f64::from(self.memory_usage);
        vec![
            MetricRow::new(
                "cpu_usage",
                "CPU Usage",
                format!("{}%", self.cpu_usage),
                Self::CPU_RULE,
                cpu,
            )
            .with_fill(cpu),
            MetricRow::new(
                "memory_usage",
                "Memory Usage",
                format!("{}%", self.memory_usage),
                Self::MEMORY_RULE,
                mem,
            )
            .with_fill(mem),
            MetricRow::new(
                "disk_io",
                "Disk I/O",
                format!("{} MB/s", self.disk_io),
                StatusRule::Fixed(Status::Info),
                f64::from(self.disk_io),
            ),
            MetricRow::new(
                "network_io",
                "Network I/O",
                format!("{} MB/s", self.network_io),
                StatusRule::Fixed(Status::Info),
                f64::from(self.network_io),
            ),
        ]
    }
}

/// Diagnostic model throughput.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiDiagnostics {
    /// Percent, jittering around a fixed baseline.
    pub covid_accuracy: f64,
    pub diagnoses_per_hour: u32,
    pub false_positives: u32,
    /// Constant; out of [`AiDiagnostics::MODELS_TOTAL`].
    pub models_active: u32,
}

impl AiDiagnostics {
    pub const COVID_ACCURACY: JitterRange = JitterRange::new(98.0, 0.2);
    pub const DIAGNOSES_PER_HOUR: IntRange = IntRange::new(1800, 200);
    pub const FALSE_POSITIVES: IntRange = IntRange::new(2, 5);
    pub const MODELS_ACTIVE: u32 = 5;
    pub const MODELS_TOTAL: u32 = 5;

    pub const FALSE_POSITIVE_RULE: StatusRule = StatusRule::Below(4.0);

    #[must_use]
    pub const fn initial() -> Self {
        Self {
            covid_accuracy: Self::COVID_ACCURACY.center(),
            diagnoses_per_hour: 0,
            false_positives: 0,
            models_active: Self::MODELS_ACTIVE,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            covid_accuracy: Self::COVID_ACCURACY.sample(rng),
            diagnoses_per_hour: Self::DIAGNOSES_PER_HOUR.sample(rng) as u32,
            false_positives: Self::FALSE_POSITIVES.sample(rng) as u32,
            models_active: Self::MODELS_ACTIVE,
        }
    }
}

impl MetricRecord for AiDiagnostics {
    const GROUP: MetricGroup = MetricGroup::AiDiagnostics;

    fn rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new(
                "covid_accuracy",
                "Model Accuracy",
                format!("{:.1}%", self.covid_accuracy),
                StatusRule::Fixed(Status::Good),
                self.covid_accuracy,
            )
            .with_fill(self.covid_accuracy),
            MetricRow::new(
                "diagnoses_per_hour",
                "Diagnoses/hour",
                group_thousands(u64::from(self.diagnoses_per_hour)),
                StatusRule::Fixed(Status::Info),
                f64::from(self.diagnoses_per_hour),
            ),
            MetricRow::new(
                "false_positives",
                "False Positives",
                self.false_positives.to_string(),
                Self::FALSE_POSITIVE_RULE,
                f64::from(self.false_positives),
            ),
            MetricRow::new(
                "models_active",
                "Active Models",
                format!("{}/{}", self.models_active, Self::MODELS_TOTAL),
                StatusRule::Fixed(Status::Good),
                f64::from(self.models_active),
            ),
        ]
    }
}

/// Ledger network statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerNetwork {
    /// Baseline plus a small random increment; not accumulated across ticks.
    pub total_blocks_mined: u64,
    pub current_tps: u32,
    /// Milliseconds.
    pub avg_latency: u32,
    /// Baseline plus or minus a small jitter.
    pub active_validators: u32,
}

impl LedgerNetwork {
    pub const BLOCKS_BASELINE: u64 = 2_847_291;
    pub const TOTAL_BLOCKS_MINED: IntRange = IntRange::new(Self::BLOCKS_BASELINE, 10);
    pub const CURRENT_TPS: IntRange = IntRange::new(4500, 1000);
    pub const AVG_LATENCY: IntRange = IntRange::new(85, 100);
    pub const VALIDATORS_BASELINE: u32 = 247;
    /// `247 + [0, 6) - 3`.
    pub const ACTIVE_VALIDATORS: IntRange = IntRange::new(244, 6);

    pub const TPS_RULE: StatusRule = StatusRule::Above(4000.0);
    pub const LATENCY_RULE: StatusRule = StatusRule::Below(100.0);
    /// TPS fill is `tps / 60`, saturating at 100.
    pub const TPS_FILL_DIVISOR: f64 = 60.0;

    #[must_use]
    pub const fn initial() -> Self {
        Self {
            total_blocks_mined: Self::BLOCKS_BASELINE,
            current_tps: 0,
            avg_latency: 0,
            active_validators: Self::VALIDATORS_BASELINE,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            total_blocks_mined: Self::TOTAL_BLOCKS_MINED.sample(rng),
            current_tps: Self::CURRENT_TPS.sample(rng) as u32,
            avg_latency: Self::AVG_LATENCY.sample(rng) as u32,
            active_validators: Self::ACTIVE_VALIDATORS.sample(rng) as u32,
        }
    }

    #[must_use]
    pub fn tps_fill(&self) -> f64 {
        f64::from(self.current_tps) / Self::TPS_FILL_DIVISOR
    }
}

impl MetricRecord for LedgerNetwork {
    const GROUP: MetricGroup = MetricGroup::LedgerNetwork;

    fn rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new(
                "total_blocks_mined",
                "Total Blocks Mined",
                group_thousands(self.total_blocks_mined),
                StatusRule::Fixed(Status::Info),
                self.total_blocks_mined as f64,
            ),
            MetricRow::new(
                "current_tps",
                "Current TPS",
                group_thousands(u64::from(self.current_tps)),
                Self::TPS_RULE,
                f64::from(self.current_tps),
            )
            .with_fill(self.tps_fill()),
            MetricRow::new(
                "avg_latency",
                "Avg Latency",
                format!("{}ms", self.avg_latency),
                Self::LATENCY_RULE,
                f64::from(self.avg_latency),
            ),
            MetricRow::new(
                "active_validators",
                "Active Validators",
                self.active_validators.to_string(),
                StatusRule::Fixed(Status::Good),
                f64::from(self.active_validators),
            ),
        ]
    }
}

/// Database cluster statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseCluster {
    pub queries_per_sec: u32,
    /// Milliseconds.
    pub avg_query_time: u32,
    /// Out of [`DatabaseCluster::MAX_CONNECTIONS`].
    pub active_connections: u32,
    /// Percent.
    pub cache_hit_rate: u32,
}

impl DatabaseCluster {
    pub const QUERIES_PER_SEC: IntRange = IntRange::new(2200, 500);
    pub const AVG_QUERY_TIME: IntRange = IntRange::new(45, 20);
    pub const ACTIVE_CONNECTIONS: IntRange = IntRange::new(120, 30);
    pub const CACHE_HIT_RATE: IntRange = IntRange::new(92, 5);
    pub const MAX_CONNECTIONS: u32 = 200;

    pub const QUERY_TIME_RULE: StatusRule = StatusRule::Below(50.0);
    pub const CONNECTIONS_RULE: StatusRule = StatusRule::Below(140.0);
    pub const CACHE_RULE: StatusRule = StatusRule::Above(90.0);

    #[must_use]
    pub const fn initial() -> Self {
        Self {
            queries_per_sec: 0,
            avg_query_time: 0,
            active_connections: 0,
            cache_hit_rate: 0,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            queries_per_sec: Self::QUERIES_PER_SEC.sample(rng) as u32,
            avg_query_time: Self::AVG_QUERY_TIME.sample(rng) as u32,
            active_connections: Self::ACTIVE_CONNECTIONS.sample(rng) as u32,
            cache_hit_rate: Self::CACHE_HIT_RATE.sample(rng) as u32,
        }
    }
}

impl MetricRecord for DatabaseCluster {
    const GROUP: MetricGroup = MetricGroup::DatabaseCluster;

    fn rows(&self) -> Vec<MetricRow> {
        let query_time = f64::from(self.avg_query_time);
        vec![
            MetricRow::new(
                "queries_per_sec",
                "Queries per Second",
                group_thousands(u64::from(self.queries_per_sec)),
                StatusRule::Fixed(Status::Info),
                f64::from(self.queries_per_sec),
            ),
            MetricRow::new(
                "avg_query_time",
                "Avg Query Time",
                format!("{}ms", self.avg_query_time),
                Self::QUERY_TIME_RULE,
                query_time,
            )
            .with_fill(query_time),
            MetricRow::new(
                "active_connections",
                "Active Connections",
                format!("{}/{}", self.active_connections, Self::MAX_CONNECTIONS),
                Self::CONNECTIONS_RULE,
                f64::from(self.active_connections),
            ),
            MetricRow::new(
                "cache_hit_rate",
                "Cache Hit Rate",
                format!("{}%", self.cache_hit_rate),
                Self::CACHE_RULE,
                f64::from(self.cache_hit_rate),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn status_of(rows: &[MetricRow], key: &str) -> Status {
        rows.iter()
            .find(|r| r.key == key)
            .map(|r| r.status)
            .expect("row present")
    }

    #[test]
    fn test_system_rows_status_and_fill() {
        let rec = SystemResources {
            cpu_usage: 49,
            memory_usage: 60,
            disk_io: 130,
            network_io: 350,
        };
        let rows = rec.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(status_of(&rows, "cpu_usage"), Status::Good);
        assert_eq!(status_of(&rows, "memory_usage"), Status::Warning);
        assert_eq!(status_of(&rows, "disk_io"), Status::Info);
        assert_eq!(rows[0].value, "49%");
        assert_eq!(rows[0].fill, Some(49.0));
        assert_eq!(rows[2].value, "130 MB/s");
        assert_eq!(rows[2].fill, None);
    }

    #[test]
    fn test_ai_rows_formatting() {
        let rec = AiDiagnostics {
            covid_accuracy: 97.94,
            diagnoses_per_hour: 1_950,
            false_positives: 4,
            models_active: 5,
        };
        let rows = rec.rows();
        assert_eq!(rows[0].value, "97.9%");
        assert_eq!(rows[1].value, "1,950");
        assert_eq!(status_of(&rows, "false_positives"), Status::Warning);
        assert_eq!(rows[3].value, "5/5");
    }

    #[test]
    fn test_ledger_tps_fill_saturates() {
        let rec = LedgerNetwork {
            total_blocks_mined: 2_847_295,
            current_tps: 5_400,
            avg_latency: 99,
            active_validators: 245,
        };
        let rows = rec.rows();
        assert_eq!(rows[0].value, "2,847,295");
        assert_eq!(rows[1].fill, Some(90.0));
        assert_eq!(status_of(&rows, "current_tps"), Status::Good);
        assert_eq!(status_of(&rows, "avg_latency"), Status::Good);

        let hot = LedgerNetwork {
            current_tps: 7_200,
            ..rec
        };
        assert_eq!(hot.rows()[1].fill, Some(100.0));
    }

    #[test]
    fn test_database_rows() {
        let rec = DatabaseCluster {
            queries_per_sec: 2_500,
            avg_query_time: 50,
            active_connections: 139,
            cache_hit_rate: 90,
        };
        let rows = rec.rows();
        assert_eq!(status_of(&rows, "avg_query_time"), Status::Warning);
        assert_eq!(status_of(&rows, "active_connections"), Status::Good);
        assert_eq!(status_of(&rows, "cache_hit_rate"), Status::Warning);
        assert_eq!(rows[2].value, "139/200");
        assert_eq!(rows[1].fill, Some(50.0));
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(SystemResources::initial().cpu_usage, 0);
        assert_eq!(AiDiagnostics::initial().covid_accuracy, 98.0);
        assert_eq!(AiDiagnostics::initial().models_active, 5);
        assert_eq!(LedgerNetwork::initial().total_blocks_mined, 2_847_291);
        assert_eq!(LedgerNetwork::initial().active_validators, 247);
        assert_eq!(DatabaseCluster::initial().cache_hit_rate, 0);
    }

    #[test]
    fn test_models_active_constant() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert_eq!(AiDiagnostics::sample(&mut rng).models_active, 5);
        }
    }

    #[test]
    fn test_validators_within_jitter() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let v = LedgerNetwork::sample(&mut rng).active_validators;
            assert!((244..250).contains(&v), "validators {v}");
        }
    }
}
