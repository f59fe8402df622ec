//! Benchmarks for CLAHE
//!
//! Compares parallel and sequential row processing over a few image sizes
//! and block radii.

use clahe_rust::{clahe_gray_u8, clahe_gray_u8_sequential, ClaheParams};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use std::time::Duration;

/// Synthetic image with smooth gradients and a high-frequency texture
fn create_test_image(width: usize, height: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        let ramp = (x * 255 / width.max(1)) as u32;
        let texture = ((x / 4 + y / 4) % 2) as u32 * 24;
        ((ramp / 2 + texture + (y as u32 % 32)) % 256) as u8
    })
}

fn benchmark_clahe_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("clahe_sizes");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let params = ClaheParams::default().with_block_radius(31);

    for size in [64usize, 128, 256] {
        let img = create_test_image(size, size);

        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{}x{}", size, size)),
            &img,
            |b, img| {
                b.iter(|| clahe_gray_u8(black_box(img.view()), &params));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{}x{}", size, size)),
            &img,
            |b, img| {
                b.iter(|| clahe_gray_u8_sequential(black_box(img.view()), &params));
            },
        );
    }

    group.finish();
}

fn benchmark_clahe_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("clahe_radius");
    group.sample_size(10);

    let img = create_test_image(256, 256);

    for radius in [8usize, 32, 63] {
        let params = ClaheParams::default().with_block_radius(radius);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &params, |b, params| {
            b.iter(|| clahe_gray_u8(black_box(img.view()), params));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_clahe_sizes, benchmark_clahe_radius);
criterion_main!(benches);
