use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::RgbImage;
use season_palette::{ColorQuantizer, PaletteAnalyzer, PipelineConfig, PixelSampler, Rgb};

/// Deterministic skin-like gradient so every pixel passes the default mask
fn synthetic_face(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let shade = ((x + y) % 60) as u8;
        image::Rgb([170 + shade / 2, 115 + shade / 2, 85 + shade / 3])
    })
}

fn synthetic_pixels(n: u32) -> Vec<Rgb> {
    (0..n)
        .map(|i| Rgb::new((i * 37 % 256) as u8, (i * 91 % 256) as u8, (i * 13 % 256) as u8))
        .collect()
}

fn benchmark_color_analysis(c: &mut Criterion) {
    let pixels = synthetic_pixels(90_000);
    let quantizer = ColorQuantizer::new(42);
    c.bench_function("quantize_90k_k6", |b| {
        b.iter(|| quantizer.quantize(black_box(&pixels), 6))
    });

    let face = synthetic_face(200, 240);
    let sampler = PixelSampler::new();
    c.bench_function("sample_skin_200x240", |b| {
        b.iter(|| sampler.sample(black_box(&face)))
    });

    let analyzer = match PaletteAnalyzer::new(PipelineConfig::default()) {
        Ok(analyzer) => analyzer,
        Err(e) => panic!("default configuration rejected: {}", e),
    };
    c.bench_function("analyze_skin_200x240", |b| {
        b.iter(|| analyzer.analyze_skin(black_box(&face)))
    });
}

criterion_group!(benches, benchmark_color_analysis);
criterion_main!(benches);
