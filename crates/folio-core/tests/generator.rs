//! Integration tests for the synthetic metrics generator.
//!
//! These tests exercise the public API the display surfaces depend on.

use folio_core::{
    AiDiagnostics, DashboardSnapshot, DatabaseCluster, LatestSnapshot, LedgerNetwork,
    MetricGroup, Snapshot, Status, StatusRule, SyntheticCollector, SystemResources, Ticker,
};
use proptest::prelude::*;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const TICKS: usize = 10_000;

fn assert_in_bounds(s: &DashboardSnapshot) {
    assert!(SystemResources::CPU_USAGE.contains(u64::from(s.system.cpu_usage)));
    assert!(SystemResources::MEMORY_USAGE.contains(u64::from(s.system.memory_usage)));
    assert!(SystemResources::DISK_IO.contains(u64::from(s.system.disk_io)));
    assert!(SystemResources::NETWORK_IO.contains(u64::from(s.system.network_io)));

    assert!(AiDiagnostics::COVID_ACCURACY.contains(s.ai.covid_accuracy));
    assert!(AiDiagnostics::DIAGNOSES_PER_HOUR.contains(u64::from(s.ai.diagnoses_per_hour)));
    assert!(AiDiagnostics::FALSE_POSITIVES.contains(u64::from(s.ai.false_positives)));
    assert_eq!(s.ai.models_active, AiDiagnostics::MODELS_ACTIVE);

    assert!(LedgerNetwork::TOTAL_BLOCKS_MINED.contains(s.ledger.total_blocks_mined));
    assert!(LedgerNetwork::CURRENT_TPS.contains(u64::from(s.ledger.current_tps)));
    assert!(LedgerNetwork::AVG_LATENCY.contains(u64::from(s.ledger.avg_latency)));
    assert!(LedgerNetwork::ACTIVE_VALIDATORS.contains(u64::from(s.ledger.active_validators)));

    assert!(DatabaseCluster::QUERIES_PER_SEC.contains(u64::from(s.database.queries_per_sec)));
    assert!(DatabaseCluster::AVG_QUERY_TIME.contains(u64::from(s.database.avg_query_time)));
    assert!(DatabaseCluster::ACTIVE_CONNECTIONS.contains(u64::from(s.database.active_connections)));
    assert!(DatabaseCluster::CACHE_HIT_RATE.contains(u64::from(s.database.cache_hit_rate)));
}

#[test]
fn test_every_field_within_bounds_over_many_ticks() {
    for snapshot in SyntheticCollector::seeded(2024).take(TICKS) {
        assert_in_bounds(&snapshot);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cpu_stays_in_25_to_55(seed in any::<u64>()) {
        for snapshot in SyntheticCollector::seeded(seed).take(200) {
            let cpu = snapshot.system.cpu_usage;
            prop_assert!((25..55).contains(&cpu), "cpu_usage {} out of [25, 55)", cpu);
        }
    }

    #[test]
    fn prop_every_field_in_bounds(seed in any::<u64>()) {
        for snapshot in SyntheticCollector::seeded(seed).take(50) {
            assert_in_bounds(&snapshot);
        }
    }

    #[test]
    fn prop_fills_always_clamped(seed in any::<u64>()) {
        for snapshot in SyntheticCollector::seeded(seed).take(50) {
            for (_, rows) in snapshot.cards() {
                for fill in rows.iter().filter_map(|r| r.fill) {
                    prop_assert!((0.0..=100.0).contains(&fill), "fill {}", fill);
                }
            }
        }
    }

    #[test]
    fn prop_same_seed_same_sequence(seed in any::<u64>()) {
        let first: Vec<DashboardSnapshot> = SyntheticCollector::seeded(seed).take(10).collect();
        let second: Vec<DashboardSnapshot> = SyntheticCollector::seeded(seed).take(10).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_status_is_pure_function_of_value() {
    for snapshot in SyntheticCollector::seeded(31).take(1_000) {
        let rows = snapshot.rows(MetricGroup::SystemResources);
        let expected = if snapshot.system.cpu_usage < 50 {
            Status::Good
        } else {
            Status::Warning
        };
        assert_eq!(rows[0].status, expected);
        assert_eq!(
            rows[0].status,
            StatusRule::Below(50.0).classify(f64::from(snapshot.system.cpu_usage))
        );

        let cache = snapshot.rows(MetricGroup::DatabaseCluster)[3].status;
        let expected = if snapshot.database.cache_hit_rate > 90 {
            Status::Good
        } else {
            Status::Warning
        };
        assert_eq!(cache, expected);
    }
}

#[test]
fn test_no_updates_after_stop() {
    let latest = LatestSnapshot::<DashboardSnapshot>::new();
    let mut ticker = Ticker::spawn(
        SyntheticCollector::seeded(5),
        Duration::from_millis(3),
        latest.clone(),
    )
    .expect("ticker starts");

    let deadline = Instant::now() + Duration::from_secs(2);
    while latest.get().tick < 3 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    ticker.stop();

    let frozen = latest.get();
    assert!(frozen.tick >= 1);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(latest.get(), frozen);
}

#[test]
fn test_channel_sees_no_snapshot_after_stop() {
    let (tx, rx) = mpsc::channel();
    let mut ticker = Ticker::spawn(SyntheticCollector::seeded(6), Duration::from_millis(2), tx)
        .expect("ticker starts");
    rx.recv_timeout(Duration::from_secs(2)).expect("first tick");
    ticker.stop();

    let drained: Vec<DashboardSnapshot> = rx.try_iter().collect();
    let last_tick = drained.last().map_or(0, |s| s.tick);
    thread::sleep(Duration::from_millis(20));
    assert!(rx.try_recv().is_err(), "published after stop (last {last_tick})");
}

#[test]
fn test_initial_snapshot_is_shown_before_first_tick() {
    let latest = LatestSnapshot::<DashboardSnapshot>::new();
    let _ticker = Ticker::spawn(
        SyntheticCollector::seeded(1),
        Duration::from_secs(30),
        latest.clone(),
    )
    .expect("ticker starts");
    assert_eq!(latest.get(), DashboardSnapshot::empty());
}
