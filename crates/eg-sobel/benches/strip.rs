use criterion::{Criterion, black_box, criterion_group, criterion_main};
use eg_core::{Bgr8, Raster};
use eg_sobel::{process_full, process_strip};

fn build_slanted_bgr(width: usize, height: usize) -> Raster {
    let theta = 20.0f32.to_radians();
    let nx = theta.cos();
    let ny = theta.sin();
    let t = nx * (0.5 * width as f32) + ny * (0.5 * height as f32);

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let d = nx * x as f32 + ny * y as f32 - t;
            pixels.push(if d >= 0.0 {
                Bgr8::new(255, 200, 120)
            } else {
                Bgr8::new(0, 40, 90)
            });
        }
    }

    Raster::from_pixels(width, height, &pixels).expect("valid raster")
}

fn bench_full(c: &mut Criterion) {
    let img = build_slanted_bgr(1280, 1024);
    let view = img.as_view();

    c.bench_function("sobel_full_bgr_1280x1024", |b| {
        b.iter(|| {
            let out = process_full(black_box(&view)).expect("valid run");
            black_box(out);
        });
    });
}

fn bench_strip(c: &mut Criterion) {
    let img = build_slanted_bgr(1280, 1024);
    let view = img.as_view();
    let stride = eg_core::aligned_stride(1278);
    let mut out = vec![0u8; stride * 128];

    c.bench_function("sobel_strip_128_rows_bgr_1280", |b| {
        b.iter(|| {
            process_strip(black_box(&view), &mut out, stride, 449, 577).expect("valid strip");
            black_box(&out);
        });
    });
}

criterion_group!(benches, bench_full, bench_strip);
criterion_main!(benches);
