//! Criterion benchmarks for folio-terminal
//!
//! Run with: cargo bench -p folio-terminal

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio_core::SyntheticCollector;
use folio_terminal::direct::{CellBuffer, DiffRenderer};
use folio_terminal::{ui, ColorMode, DashboardView};
use folio_yaml::{AnimationConfig, SiteManifest};
use std::time::Duration;

const SETTLED: Duration = Duration::from_secs(60);

fn view(seed: u64) -> DashboardView {
    let mut view = DashboardView::new(SiteManifest::bundled(), &AnimationConfig::default());
    view.apply_snapshot(SyntheticCollector::seeded(seed).next_snapshot());
    view
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    let view = view(42);

    for (w, h) in [(80u16, 24u16), (120, 40), (200, 60)] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &(w, h), |b, &(w, h)| {
            let mut buffer = CellBuffer::new(w, h);
            b.iter(|| {
                ui::draw(&view, &mut buffer, SETTLED);
                black_box(buffer.dirty_count())
            });
        });
    }

    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");

    group.bench_function("full_frame", |b| {
        let view = view(42);
        let mut buffer = CellBuffer::new(120, 40);
        let mut renderer = DiffRenderer::with_color_mode(ColorMode::TrueColor);
        let mut out = Vec::with_capacity(64 * 1024);
        b.iter(|| {
            ui::draw(&view, &mut buffer, SETTLED);
            buffer.mark_all_dirty();
            out.clear();
            renderer.flush(&mut buffer, &mut out).expect("write to vec");
            black_box(out.len())
        });
    });

    group.bench_function("tick_diff", |b| {
        let mut collector = SyntheticCollector::seeded(7);
        let mut view = view(7);
        let mut front = CellBuffer::new(120, 40);
        let mut frame = CellBuffer::new(120, 40);
        let mut renderer = DiffRenderer::with_color_mode(ColorMode::TrueColor);
        let mut out = Vec::with_capacity(64 * 1024);
        b.iter(|| {
            view.apply_snapshot(collector.next_snapshot());
            ui::draw(&view, &mut frame, SETTLED);
            front.sync_from(&frame);
            out.clear();
            renderer.flush(&mut front, &mut out).expect("write to vec");
            black_box(out.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_draw, bench_flush);
criterion_main!(benches);
