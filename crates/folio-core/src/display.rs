//! Display contract shared by the terminal and HTML surfaces.

use crate::color::Color;
use crate::status::{clamp_fill, Status, StatusRule};
use serde::Serialize;

/// The four dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    SystemResources,
    AiDiagnostics,
    LedgerNetwork,
    DatabaseCluster,
}

impl MetricGroup {
    /// Display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::SystemResources,
            Self::AiDiagnostics,
            Self::LedgerNetwork,
            Self::DatabaseCluster,
        ]
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SystemResources => "System Resources",
            Self::AiDiagnostics => "AI COVID-19 Diagnosis",
            Self::LedgerNetwork => "CelestialChain Network",
            Self::DatabaseCluster => "Database Cluster",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SystemResources => "system",
            Self::AiDiagnostics => "ai",
            Self::LedgerNetwork => "ledger",
            Self::DatabaseCluster => "database",
        }
    }

    /// Card accent colour.
    #[must_use]
    pub const fn accent(self) -> Color {
        match self {
            Self::SystemResources => Color::CYAN,
            Self::AiDiagnostics => Color::GREEN,
            Self::LedgerNetwork => Color::PINK,
            Self::DatabaseCluster => Color::AMBER,
        }
    }
}

/// One rendered line of a metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Stable identifier, e.g. `cpu_usage`.
    pub key: &'static str,
    pub label: &'static str,
    /// Formatted value including its unit.
    pub value: String,
    pub status: Status,
    /// Progress-bar fill in `[0, 100]`, for rows that draw a bar.
    pub fill: Option<f64>,
}

impl MetricRow {
    pub(crate) fn new(
        key: &'static str,
        label: &'static str,
        value: String,
        rule: StatusRule,
        raw: f64,
    ) -> Self {
        Self {
            key,
            label,
            value,
            status: rule.classify(raw),
            fill: None,
        }
    }

    /// Attach a progress bar; the fill is clamped into `[0, 100]`.
    #[must_use]
    pub(crate) fn with_fill(mut self, raw_fill: f64) -> Self {
        self.fill = Some(clamp_fill(raw_fill));
        self
    }
}

/// A metric record that renders into card rows.
pub trait MetricRecord {
    const GROUP: MetricGroup;

    fn rows(&self) -> Vec<MetricRow>;
}

/// Format an integer with comma thousands separators (`2847291` -> `2,847,291`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(2_847_291), "2,847,291");
        assert_eq!(group_thousands(123_456), "123,456");
    }

    #[test]
    fn test_group_order_and_keys() {
        let keys: Vec<_> = MetricGroup::all().iter().map(|g| g.key()).collect();
        assert_eq!(keys, ["system", "ai", "ledger", "database"]);
    }

    #[test]
    fn test_with_fill_clamps() {
        let row = MetricRow::new("x", "X", "1".into(), StatusRule::Fixed(Status::Info), 1.0)
            .with_fill(250.0);
        assert_eq!(row.fill, Some(100.0));
    }
}
