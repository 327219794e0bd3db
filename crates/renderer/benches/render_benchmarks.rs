//! Benchmarks for line rendering and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use projection::PixelPoint;
use renderer::{png, Canvas, LineStyle, RasterCanvas};

/// Zigzag paths spread evenly over the canvas.
fn generate_paths(count: usize, vertices: usize, width: u32, height: u32) -> Vec<Vec<PixelPoint>> {
    let step = width as f64 / vertices.max(1) as f64;
    (0..count)
        .map(|i| {
            let base = (i as f64 + 0.5) * height as f64 / count as f64;
            (0..vertices)
                .map(|v| {
                    let wobble = if v % 2 == 0 { 2.0 } else { -2.0 };
                    PixelPoint::new(v as f64 * step, base + wobble)
                })
                .collect()
        })
        .collect()
}

fn bench_draw_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_paths");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("bench.png");

    for count in [100usize, 1000] {
        let paths = generate_paths(count, 20, 1024, 512);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &paths, |b, paths| {
            b.iter(|| {
                let mut canvas = RasterCanvas::new(1024, 512, LineStyle::default(), &output).unwrap();
                for path in paths {
                    canvas.draw_path(black_box(path), 1.0).unwrap();
                }
                black_box(canvas.pixel(512, 256))
            });
        });
    }

    group.finish();
}

fn bench_encode_png(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_png");

    for size in [256u32, 1024] {
        let pixels: Vec<u8> = (0..size * size)
            .flat_map(|i| {
                let v = (i % 251) as u8;
                [v, v, v, 255]
            })
            .collect();
        group.throughput(Throughput::Bytes(pixels.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &pixels, |b, pixels| {
            b.iter(|| png::encode_png(black_box(pixels), size, size).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draw_paths, bench_encode_png);
criterion_main!(benches);
