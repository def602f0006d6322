use criterion::{black_box, criterion_group, criterion_main, Criterion};

use venue_console::models::{GridMode, SeatGrid};

// Максимум формы консоли: 26 рядов на 50 мест.
fn bench_create(c: &mut Criterion) {
    c.bench_function("grid_create_26x50", |b| {
        b.iter(|| SeatGrid::create(black_box(26), black_box(50)).unwrap())
    });
}

fn bench_stats(c: &mut Criterion) {
    let mut grid = SeatGrid::create(26, 50).unwrap();
    for row in 0..26 {
        for col in 0..50 {
            if (row + col) % 3 == 0 {
                grid.cycle_seat(row, col).unwrap();
            }
        }
    }

    c.bench_function("grid_stats_26x50", |b| b.iter(|| black_box(&grid).stats()));

    c.bench_function("grid_capacity_classification_26x50", |b| {
        b.iter(|| black_box(&grid).capacity(GridMode::Classification))
    });
}

criterion_group!(benches, bench_create, bench_stats);
criterion_main!(benches);
