//! Core types for the folio portfolio dashboard.
//!
//! This crate owns everything that is not presentation:
//! - The four synthetic metric records and their sampling ranges
//! - Status classification and progress-bar fills: [`StatusRule`], [`clamp_fill`]
//! - The display contract rendered by every surface: [`MetricRow`]
//! - Periodic collection: [`Collector`], [`Ticker`], [`SnapshotSink`]
//! - Headline and counter animations: [`Typewriter`], [`CountUp`]
//!
//! # Example
//!
//! ```no_run
//! use folio_core::{DashboardSnapshot, LatestSnapshot, SyntheticCollector, Ticker, DEFAULT_INTERVAL};
//!
//! let latest = LatestSnapshot::<DashboardSnapshot>::new();
//! let mut ticker = Ticker::spawn(SyntheticCollector::from_seed(None), DEFAULT_INTERVAL, latest.clone())?;
//! // ... render latest.get() ...
//! ticker.stop();
//! # Ok::<(), folio_core::TickerError>(())
//! ```

mod animation;
mod collector;
mod color;
mod display;
mod metrics;
mod range;
pub mod seed;
mod snapshot;
mod status;
mod ticker;

pub use animation::{CountUp, Typewriter, DEFAULT_COUNTER_DURATION, DEFAULT_TYPEWRITER_STEP};
pub use collector::{Collector, SyntheticCollector};
pub use color::Color;
pub use display::{group_thousands, MetricGroup, MetricRecord, MetricRow};
pub use metrics::{AiDiagnostics, DatabaseCluster, LedgerNetwork, SystemResources};
pub use range::{IntRange, JitterRange};
pub use snapshot::{DashboardSnapshot, Snapshot};
pub use status::{clamp_fill, Status, StatusRule};
pub use ticker::{LatestSnapshot, SnapshotSink, Ticker, TickerError, DEFAULT_INTERVAL};
