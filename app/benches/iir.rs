use criterion::{criterion_group, criterion_main, Criterion};
use recblur::{BlurChannels, BlurImageMut, ThreadingPolicy};

pub fn criterion_benchmark(c: &mut Criterion) {
    let width = 1024u32;
    let height = 768u32;

    // Per-pixel cost must stay flat across sigma, that is the whole point.
    for sigma in [2f32, 15., 60., 150.] {
        c.bench_function(&format!("recblur: rgb f32 sigma={sigma}"), |b| {
            let mut image = BlurImageMut::alloc(width, height, BlurChannels::Channels3);
            b.iter(|| {
                recblur::recursive_blur_f32_in_place(&mut image, sigma, ThreadingPolicy::Single)
                    .unwrap();
            });
        });
    }

    c.bench_function("recblur: rgb f32 sigma=15 threaded", |b| {
        let mut image = BlurImageMut::alloc(width, height, BlurChannels::Channels3);
        b.iter(|| {
            recblur::recursive_blur_f32_in_place(&mut image, 15., ThreadingPolicy::Adaptive)
                .unwrap();
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
