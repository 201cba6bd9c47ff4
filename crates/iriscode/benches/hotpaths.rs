use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use iriscode::{match_codes, FeatureEncoder, IrisCode, IrisMatcher, MatcherConfig};

fn synthetic_eye(seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = GrayImage::new(256, 256);
    for y in 0..256u32 {
        for x in 0..256u32 {
            let dx = x as f32 - 128.0;
            let dy = y as f32 - 128.0;
            if (dx * dx + dy * dy).sqrt() <= 90.0 {
                img.put_pixel(x, y, Luma([rng.gen_range(40..=220)]));
            }
        }
    }
    img
}

fn random_code(len: usize, seed: u64) -> IrisCode {
    let mut rng = StdRng::seed_from_u64(seed);
    IrisCode::from_bits((0..len).map(|_| rng.gen_range(0..=1u8)).collect())
}

fn bench_encode(c: &mut Criterion) {
    let matcher = IrisMatcher::new();
    let eye = DynamicImage::ImageLuma8(synthetic_eye(1));
    c.bench_function("encode_256px_eye", |b| {
        b.iter(|| {
            matcher
                .encode_image(black_box(&eye), iriscode::Side::A)
                .unwrap()
        })
    });

    let encoder = FeatureEncoder::default();
    c.bench_function("encoder_construction", |b| {
        b.iter(|| black_box(FeatureEncoder::default()));
    });
    black_box(encoder);
}

fn bench_match(c: &mut Criterion) {
    let a = random_code(64 * 360 * 4, 11);
    let b2 = random_code(64 * 360 * 4, 13);
    let cfg = MatcherConfig::default();
    c.bench_function("match_92160_bits", |b| {
        b.iter(|| match_codes(black_box(&a), black_box(&b2), &cfg))
    });
}

criterion_group!(benches, bench_encode, bench_match);
criterion_main!(benches);
