//! One metric card: a framed list of rows with status colours and meters.

use super::{Border, Meter, Paint, Rect};
use crate::direct::{CellBuffer, Style};
use folio_core::{Color, DashboardSnapshot, MetricGroup, MetricRow};
use unicode_width::UnicodeWidthStr;

/// Card for one [`MetricGroup`].
#[derive(Debug, Clone)]
pub struct MetricPanel {
    group: MetricGroup,
    rows: Vec<MetricRow>,
}

impl MetricPanel {
    #[must_use]
    pub fn new(group: MetricGroup, rows: Vec<MetricRow>) -> Self {
        Self { group, rows }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &DashboardSnapshot, group: MetricGroup) -> Self {
        Self::new(group, snapshot.rows(group))
    }

    #[must_use]
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Height with a meter under every row that has one.
    #[must_use]
    pub fn full_height(&self) -> u16 {
        let meters = self.rows.iter().filter(|r| r.fill.is_some()).count();
        (2 + self.rows.len() + meters) as u16
    }

    /// Height with value lines only.
    #[must_use]
    pub fn compact_height(&self) -> u16 {
        (2 + self.rows.len()) as u16
    }
}

impl Paint for MetricPanel {
    fn paint(&self, buffer: &mut CellBuffer, area: Rect) {
        Border::new()
            .with_title(self.group.title())
            .with_color(self.group.accent())
            .with_title_style(Style::fg(self.group.accent()).bold())
            .paint(buffer, area);

        let inner = area.inset(1);
        if inner.width < 4 {
            return;
        }
        let left = inner.x + 1;
        let right = inner.right() - 1;
        let with_meters = area.height >= self.full_height();

        let mut y = inner.y;
        for row in &self.rows {
            if y >= inner.bottom() {
                break;
            }
            let value_width = UnicodeWidthStr::width(row.value.as_str()) as u16;
            let value_x = right.saturating_sub(value_width).max(left);
            buffer.write_clipped(left, y, row.label, Style::fg(Color::DIM), value_x.saturating_sub(1));
            buffer.write_clipped(
                value_x,
                y,
                &row.value,
                Style::fg(row.status.color()).bold(),
                right,
            );
            y += 1;

            if let (true, Some(fill)) = (with_meters, row.fill) {
                if y < inner.bottom() {
                    Meter::new(fill)
                        .with_color(row.status.color())
                        .paint(buffer, Rect::new(left, y, right - left, 1));
                    y += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Status, SyntheticCollector};

    fn sample() -> DashboardSnapshot {
        SyntheticCollector::seeded(7).next_snapshot()
    }

    #[test]
    fn test_heights() {
        let panel = MetricPanel::from_snapshot(&sample(), MetricGroup::SystemResources);
        assert_eq!(panel.rows().len(), 4);
        assert_eq!(panel.compact_height(), 6);
        // cpu and memory carry meters
        assert_eq!(panel.full_height(), 8);
    }

    #[test]
    fn test_paints_title_labels_and_values() {
        let snapshot = sample();
        let panel = MetricPanel::from_snapshot(&snapshot, MetricGroup::SystemResources);
        let mut buf = CellBuffer::new(40, 10);
        panel.paint(&mut buf, Rect::new(0, 0, 40, 8));

        let text = buf.to_plain_text();
        assert!(text.contains("System Resources"));
        assert!(text.contains("CPU Usage"));
        assert!(text.contains(&format!("{}%", snapshot.system.cpu_usage)));
        assert!(text.contains("Network I/O"));
        assert!(text.contains('█') || text.contains('░'));
    }

    #[test]
    fn test_value_is_right_aligned_in_status_color() {
        let snapshot = sample();
        let panel = MetricPanel::from_snapshot(&snapshot, MetricGroup::SystemResources);
        let mut buf = CellBuffer::new(30, 8);
        panel.paint(&mut buf, Rect::new(0, 0, 30, 8));

        let line = buf.row_text(1);
        let value = format!("{}%", snapshot.system.cpu_usage);
        assert!(line.trim_end_matches(|c: char| c == '│' || c == ' ').ends_with(&value), "{line}");

        let expected = panel.rows()[0].status.color();
        let x = line.find(&value).map(|b| line[..b].chars().count()).unwrap() as u16;
        assert_eq!(buf.get(x, 1).unwrap().style.fg, expected);
    }

    #[test]
    fn test_compact_when_short() {
        let panel = MetricPanel::from_snapshot(&sample(), MetricGroup::SystemResources);
        let mut buf = CellBuffer::new(30, 6);
        panel.paint(&mut buf, Rect::new(0, 0, 30, 6));
        let text = buf.to_plain_text();
        assert!(!text.contains('░') && !text.contains('█'));
        assert!(text.contains("Network I/O"));
    }

    #[test]
    fn test_status_colors_follow_rows() {
        let rows = vec![MetricRow {
            key: "x",
            label: "X",
            value: "1".into(),
            status: Status::Warning,
            fill: None,
        }];
        let panel = MetricPanel::new(MetricGroup::AiDiagnostics, rows);
        let mut buf = CellBuffer::new(12, 3);
        panel.paint(&mut buf, Rect::new(0, 0, 12, 3));
        // inner width 10, right edge at 10, value at 9
        assert_eq!(buf.get(9, 1).unwrap().symbol, "1");
        assert_eq!(buf.get(9, 1).unwrap().style.fg, Color::AMBER);
    }
}
