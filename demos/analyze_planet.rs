//! Example: Analyze a single planet
//!
//! Usage:
//!   cargo run --example analyze_planet -- [planet.json] [spectrum.json]
//!
//! Without arguments a built-in Earth analog and a synthetic spectrum are used.

use exo_insight::spectral::samples_from_json;
use exo_insight::{Engine, EngineConfig, PlanetRecord, SpectralSample};
use std::env;
use std::fs;

fn read_json(path: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Flat continuum with water and carbon dioxide bands
fn synthetic_spectrum() -> Vec<SpectralSample> {
    let bands = [(1360.0, 1440.0, 0.25), (1970.0, 2070.0, 0.2)];
    (0..=1250)
        .map(|i| {
            let wavelength = 500.0 + i as f64 * 2.0;
            let depth = bands
                .iter()
                .filter(|(lo, hi, _)| (*lo..=*hi).contains(&wavelength))
                .map(|(_, _, d)| *d)
                .fold(0.0, f64::max);
            SpectralSample::new(wavelength, 100.0 * (1.0 - depth), 25.0)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let planet = match args.first() {
        Some(path) => PlanetRecord::from_json_value(&read_json(path)?)?,
        None => PlanetRecord {
            mass: Some(1.0),
            radius: Some(1.0),
            temperature: Some(288.0),
            orbital_period: Some(365.0),
            distance: Some(50.0),
            atmosphere: Some("N2/O2, H2O".to_string()),
            ai_confidence: Some(0.9),
            ..PlanetRecord::named("Earth analog")
        },
    };
    let samples = match args.get(1) {
        Some(path) => samples_from_json(&read_json(path)?)?,
        None => synthetic_spectrum(),
    };

    let engine = Engine::new(EngineConfig::default())?;

    let classification = engine.classify_planet(&planet);
    let spectrum = engine.analyze_spectrum(&samples, &planet);
    let priority = engine.calculate_priority_score(&planet);
    let plan = engine.recommend_observation_plan(&planet);

    println!("Planet: {}", planet.name);
    println!(
        "  Type: {} (probability: {:.3}, confidence: {:.3})",
        classification.predicted_type.name(),
        classification.probability(classification.predicted_type),
        classification.confidence
    );
    for factor in &classification.explanation.top_factors {
        println!("    {:<14} {:.3}", factor.label.name(), factor.probability);
    }
    println!("  Spectrum: {}", spectrum.summary);
    println!("  Spectral confidence: {:.3}", spectrum.confidence);
    println!(
        "  Priority: {:.3}{}",
        priority.score,
        if priority.habitability_estimated {
            " (habitability estimated)"
        } else {
            ""
        }
    );
    println!(
        "  Plan: {} for {}h, {}",
        plan.instruments.join(" + "),
        plan.exposure_hours,
        plan.cadence.as_str()
    );
    for recommendation in &spectrum.recommendations {
        println!("  - {}", recommendation);
    }

    Ok(())
}
