//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;
use vignette_core::{LayoutItem, Size};
use vignette_layout::{
    FillMode, GridLayoutManager, GridLimit, LayoutManager, StackDirection, StackLayoutManager,
    TableLayoutManager, WrapLayoutManager,
};

fn items(count: usize) -> Vec<Option<LayoutItem>> {
    (0..count)
        .map(|i| Some(LayoutItem::sized(10.0 + (i % 7) as f64, 8.0 + (i % 5) as f64)))
        .collect()
}

fn layout_grid(c: &mut Criterion) {
    let mut grid = GridLayoutManager::new(GridLimit::Columns(16), Size::new(24.0, 24.0))
        .with_square_separator(2.0);
    let mut nodes = items(1_000);
    c.bench_function("layout_grid_1000", |b| {
        b.iter(|| grid.layout(black_box(&mut nodes)))
    });
    c.bench_function("grid_square_at_location", |b| {
        b.iter(|| grid.square_at_location(black_box(DVec2::new(37.0, -12.0))))
    });
}

fn layout_table(c: &mut Criterion) {
    let mut table = TableLayoutManager::new(8)
        .with_constrained_size(Size::new(800.0, 0.0))
        .with_column_widths(vec![60.0, 0.0, -1.0, -2.0])
        .with_column_separator(4.0);
    let mut nodes = items(1_000);
    c.bench_function("layout_table_1000", |b| {
        b.iter(|| table.layout(black_box(&mut nodes)))
    });
}

fn layout_stack_and_wrap(c: &mut Criterion) {
    let mut stack = StackLayoutManager::new(StackDirection::Down).with_cell_separator(1.0);
    let mut wrap = WrapLayoutManager::new(FillMode::RightThenDown, 320.0).with_line_separator(20.0);
    let mut nodes = items(1_000);
    c.bench_function("layout_stack_1000", |b| {
        b.iter(|| stack.layout(black_box(&mut nodes)))
    });
    c.bench_function("layout_wrap_1000", |b| {
        b.iter(|| wrap.layout(black_box(&mut nodes)))
    });
}

criterion_group!(benches, layout_grid, layout_table, layout_stack_and_wrap);
criterion_main!(benches);
