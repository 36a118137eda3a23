// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_placement::fallback::{plan, prioritize_around};
use understory_placement::screen_area::{adjust, tooltip_positions};
use understory_placement::{
    Direction, EdgeThresholds, HorizontalAlign, ScreenArea, TooltipPlacement, VerticalAlign,
};

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let pairs: Vec<(HorizontalAlign, VerticalAlign)> = HorizontalAlign::ALL
        .into_iter()
        .flat_map(|h| VerticalAlign::ALL.into_iter().map(move |v| (h, v)))
        .collect();
    group.throughput(Throughput::Elements(pairs.len() as u64));

    group.bench_function("all_pairs_with_fallbacks", |b| {
        b.iter(|| {
            let mut total = 0_usize;
            for &(h, v) in &pairs {
                total += plan(black_box(h), black_box(v), false).len();
            }
            black_box(total)
        });
    });

    group.bench_function("all_pairs_forced", |b| {
        b.iter(|| {
            let mut total = 0_usize;
            for &(h, v) in &pairs {
                total += plan(black_box(h), black_box(v), true).len();
            }
            black_box(total)
        });
    });
    group.finish();
}

fn bench_prioritize(c: &mut Criterion) {
    let mut group = c.benchmark_group("prioritize_around");
    for n in [5_usize, 64, 1024] {
        let options: Vec<usize> = (0..n).collect();
        let target = n / 3;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| black_box(prioritize_around(black_box(&target), black_box(&options))));
        });
    }
    group.finish();
}

fn bench_tooltip(c: &mut Criterion) {
    let viewport = Size::new(1280.0, 800.0);
    let anchors: Vec<Point> = (0..32)
        .flat_map(|y| (0..32).map(move |x| Point::new(x as f64 * 40.0, y as f64 * 25.0)))
        .collect();
    let mut group = c.benchmark_group("tooltip");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    group.bench_function("classify_adjust_positions", |b| {
        b.iter(|| {
            for &p in &anchors {
                let area = ScreenArea::classify(p, viewport, EdgeThresholds::default());
                let adj = adjust(TooltipPlacement::Bottom, area);
                black_box(tooltip_positions(&adj, Direction::Ltr, 12.0));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_plan, bench_prioritize, bench_tooltip);
criterion_main!(benches);
