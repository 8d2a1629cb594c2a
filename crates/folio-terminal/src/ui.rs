//! Dashboard layout and rendering.
//!
//! ```text
//! name                                   ● LIVE  tick 12
//! headline (typewriter)
//! about
//! ╭ System Resources ─╮╭ AI Diagnostics ───╮
//! ╰───────────────────╯╰───────────────────╯
//! ╭ Ledger Network ───╮╭ Database Cluster ─╮
//! ╰───────────────────╯╰───────────────────╯
//! 20+ Projects Completed   4/8 Semester Progress ...
//! ▸ Celestial Chain · Full-Fledged Blockchain
//! contact@…  github  linkedin                   [q] quit
//! ```

use crate::direct::{CellBuffer, Style};
use crate::widgets::{MetricPanel, Paint, Rect};
use folio_core::{Color, DashboardSnapshot, MetricGroup, Snapshot, Typewriter};
use folio_yaml::{AnimationConfig, SiteManifest};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Smallest terminal the layout draws into.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

/// Everything a frame is drawn from.
#[derive(Debug, Clone)]
pub struct DashboardView {
    snapshot: DashboardSnapshot,
    site: SiteManifest,
    headline: Typewriter,
    counter_duration: Duration,
}

impl DashboardView {
    #[must_use]
    pub fn new(site: SiteManifest, animation: &AnimationConfig) -> Self {
        let headline = Typewriter::new(site.headline.clone(), animation.typewriter_step());
        Self {
            snapshot: DashboardSnapshot::empty(),
            site,
            headline,
            counter_duration: animation.counter_duration(),
        }
    }

    /// Replace the whole snapshot; partial updates never happen.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.snapshot = snapshot;
    }

    #[must_use]
    pub const fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn site(&self) -> &SiteManifest {
        &self.site
    }

    /// Whether animations still change the frame at `elapsed`.
    #[must_use]
    pub fn is_animating(&self, elapsed: Duration) -> bool {
        !self.headline.is_complete(elapsed) || elapsed < self.counter_duration
    }
}

/// Draw one frame. `elapsed` is time since the dashboard opened.
pub fn draw(view: &DashboardView, buffer: &mut CellBuffer, elapsed: Duration) {
    buffer.clear();
    let w = buffer.width();
    let h = buffer.height();
    if w < MIN_WIDTH || h < MIN_HEIGHT {
        draw_too_small(buffer);
        return;
    }

    let area = Rect::new(0, 0, w, h);
    let (header, rest) = area.split_top(4);
    let (body, footer) = rest.split_top(rest.height - 1);

    draw_header(view, buffer, header, elapsed);
    let used = draw_metric_grid(view, buffer, body);
    let (_, below) = body.split_top(used);
    draw_extras(view, buffer, below, elapsed);
    draw_footer(view, buffer, footer);
}

fn draw_too_small(buffer: &mut CellBuffer) {
    let msg = format!("need {MIN_WIDTH}x{MIN_HEIGHT}");
    let y = buffer.height() / 2;
    let x = buffer.width().saturating_sub(msg.len() as u16) / 2;
    buffer.write_str(x, y, &msg, Style::fg(Color::AMBER));
}

fn draw_header(view: &DashboardView, buffer: &mut CellBuffer, area: Rect, elapsed: Duration) {
    let right = area.right();
    buffer.write_str(area.x + 1, area.y, &view.site.name, Style::fg(Color::CYAN).bold());

    let tick = format!("tick {}", view.snapshot.tick);
    let live = "● LIVE";
    let live_w = UnicodeWidthStr::width(live) as u16;
    let tick_x = right.saturating_sub(tick.len() as u16 + 1);
    let live_x = tick_x.saturating_sub(live_w + 2);
    buffer.write_str(live_x, area.y, live, Style::fg(Color::GREEN).bold());
    buffer.write_str(tick_x, area.y, &tick, Style::fg(Color::DIM));

    let shown = view.headline.visible(elapsed);
    let used = buffer.write_clipped(area.x + 1, area.y + 1, shown, Style::fg(Color::WHITE).bold(), right);
    if !view.headline.is_complete(elapsed) {
        buffer.write_clipped(area.x + 1 + used, area.y + 1, "▌", Style::fg(Color::CYAN), right);
    }

    buffer.write_clipped(area.x + 1, area.y + 2, &view.site.about, Style::fg(Color::DIM), right - 1);
}

/// 2×2 grid of cards. Returns the rows it used.
fn draw_metric_grid(view: &DashboardView, buffer: &mut CellBuffer, area: Rect) -> u16 {
    let panels: Vec<MetricPanel> = MetricGroup::all()
        .into_iter()
        .map(|g| MetricPanel::from_snapshot(&view.snapshot, g))
        .collect();

    let full = panels.iter().map(MetricPanel::full_height).max().unwrap_or(0);
    let compact = panels.iter().map(MetricPanel::compact_height).max().unwrap_or(0);
    let card_h = if full * 2 <= area.height {
        full
    } else {
        compact.min(area.height / 2)
    };
    if card_h < 3 {
        return 0;
    }

    for (row, pair) in panels.chunks(2).enumerate() {
        let y = area.y + row as u16 * card_h;
        let cols = Rect::new(area.x, y, area.width, card_h).columns(2);
        for (panel, cell) in pair.iter().zip(cols) {
            panel.paint(buffer, cell);
        }
    }
    card_h * 2
}

/// Stats counters then projects, as far as space allows.
fn draw_extras(view: &DashboardView, buffer: &mut CellBuffer, area: Rect, elapsed: Duration) {
    if area.is_empty() {
        return;
    }
    let right = area.right();
    let mut y = area.y;

    if !view.site.stats.is_empty() {
        let mut x = area.x + 1;
        for stat in &view.site.stats {
            let number = stat.display_at(view.counter_duration, elapsed);
            x += buffer.write_clipped(x, y, &number, Style::fg(Color::CYAN).bold(), right);
            x += buffer.write_clipped(x, y, " ", Style::default(), right);
            x += buffer.write_clipped(x, y, &stat.label, Style::fg(Color::DIM), right);
            x += buffer.write_clipped(x, y, "   ", Style::default(), right);
            if x >= right {
                break;
            }
        }
        y += 1;
    }

    for project in &view.site.projects {
        if y >= area.bottom() {
            break;
        }
        let mut x = area.x + 1;
        x += buffer.write_clipped(x, y, "▸ ", Style::fg(Color::PINK), right);
        x += buffer.write_clipped(x, y, &project.title, Style::fg(Color::WHITE).bold(), right);
        if let Some(badge) = &project.badge {
            x += buffer.write_clipped(x, y, " · ", Style::fg(Color::DIM), right);
            buffer.write_clipped(x, y, badge, Style::fg(Color::AMBER), right);
        }
        y += 1;
    }
}

fn draw_footer(view: &DashboardView, buffer: &mut CellBuffer, area: Rect) {
    let contact = &view.site.contact;
    let links: Vec<&str> = [
        contact.email.as_deref(),
        contact.github.as_deref(),
        contact.linkedin.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let keys = "[q] quit";
    let keys_x = area.right().saturating_sub(keys.len() as u16 + 1);
    buffer.write_clipped(area.x + 1, area.y, &links.join("  "), Style::fg(Color::DIM), keys_x.saturating_sub(1));
    buffer.write_str(keys_x, area.y, keys, Style::fg(Color::CYAN));
}
