use criterion::{Criterion, black_box, criterion_group, criterion_main};
use eg_core::{Bgr8, Raster};
use eg_par::{Schedule, SobelConfig, sobel};

fn build_pattern(width: usize, height: usize) -> Raster {
    let mut pixels = Vec::with_capacity(width * height);
    for i in 0..(width * height) {
        let v = (i % 251) as u8;
        pixels.push(Bgr8::new(v, v.wrapping_mul(3), 255 - v));
    }
    Raster::from_pixels(width, height, &pixels).expect("valid raster")
}

fn bench_schedules(c: &mut Criterion) {
    let img = build_pattern(1920, 1080);
    let view = img.as_view();

    for (name, schedule) in [
        ("serial", Schedule::Serial),
        ("scoped_threads", Schedule::ScopedThreads),
        ("rayon", Schedule::Rayon),
    ] {
        let cfg = SobelConfig {
            schedule,
            ..SobelConfig::default()
        };
        c.bench_function(&format!("sobel_{name}_1920x1080"), |b| {
            b.iter(|| {
                let out = sobel(black_box(&view), black_box(&cfg)).expect("valid run");
                black_box(out);
            });
        });
    }
}

criterion_group!(benches, bench_schedules);
criterion_main!(benches);
