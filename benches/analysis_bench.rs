//! Performance benchmarks for the analysis engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exo_insight::{Classifier, ClassifierConfig, Engine, PlanetRecord, SpectralSample};

fn catalog(n: usize) -> Vec<PlanetRecord> {
    (0..n)
        .map(|i| PlanetRecord {
            mass: Some(0.5 + (i % 97) as f64 * 3.1),
            radius: Some(0.6 + (i % 53) as f64 * 0.2),
            temperature: Some(150.0 + (i % 41) as f64 * 45.0),
            orbital_period: Some(1.0 + (i % 37) as f64 * 11.0),
            distance: Some(10.0 + (i % 29) as f64 * 40.0),
            discovery_year: Some(2000 + (i % 24) as i32),
            discovery_method: Some(["Transit", "Radial Velocity", "Imaging"][i % 3].to_string()),
            ..PlanetRecord::named(format!("synthetic-{}", i))
        })
        .collect()
}

fn bench_classify_batch(c: &mut Criterion) {
    let planets = catalog(1000);

    c.bench_function("classify_batch_1000_uncached", |b| {
        b.iter(|| {
            // Fresh classifier each iteration so nothing is served from cache
            let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
            classifier.classify_batch(black_box(&planets))
        });
    });
}

fn bench_analyze_spectrum(c: &mut Criterion) {
    // 500 nm to 5000 nm at 1 nm resolution
    let samples: Vec<SpectralSample> = (0..4500)
        .map(|i| {
            let w = 500.0 + i as f64;
            let dip = if (1360.0..=1440.0).contains(&w) { 0.2 } else { 0.0 };
            SpectralSample::new(w, 100.0 * (1.0 - dip) + (i as f64 * 0.37).sin(), 30.0)
        })
        .collect();
    let planet = PlanetRecord::named("bench");
    let engine = Engine::default();

    c.bench_function("analyze_spectrum_4500", |b| {
        b.iter(|| engine.analyze_spectrum(black_box(&samples), black_box(&planet)));
    });
}

fn bench_discovery_patterns(c: &mut Criterion) {
    let history = catalog(5000);
    let engine = Engine::default();

    c.bench_function("discovery_patterns_5000", |b| {
        b.iter(|| engine.analyze_discovery_patterns(black_box(&history)));
    });
}

criterion_group!(
    benches,
    bench_classify_batch,
    bench_analyze_spectrum,
    bench_discovery_patterns
);
criterion_main!(benches);
