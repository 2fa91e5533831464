//! Example: Classify and prioritize a catalog in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_catalog -- [--jobs N] [--json] <catalog.json>
//!
//! The catalog is a JSON array of planet records. Malformed numeric fields fall
//! back to defaults; entries that are not objects are reported and skipped.

use exo_insight::{Engine, EngineConfig, PlanetRecord};
use rayon::prelude::*;
use std::env;
use std::fs;
use std::time::Instant;

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).max(1))
        .unwrap_or(1)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut path: Option<String> = None;

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = if args.is_empty() { None } else { Some(args.remove(0)) };
                jobs = Some(v.ok_or("--jobs requires a value")?.parse()?);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_catalog [--jobs N] [--json] <catalog.json>\n\
                     \n\
                     --jobs N   Worker threads (default: CPU threads - 1)\n\
                     --json     Emit one JSON object per planet (JSONL)\n"
                );
                return Ok(());
            }
            _ => path = Some(a),
        }
    }

    let path = path.ok_or("Provide a catalog path. Use --help for usage.")?;
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let entries = value.as_array().ok_or("catalog must be a JSON array")?;

    let mut planets = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match PlanetRecord::from_json_value(entry) {
            Ok(planet) => planets.push(planet),
            Err(e) => eprintln!("Skipping entry {}: {}", i, e),
        }
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Catalog: {} planets, jobs={}", planets.len(), jobs);

    let engine = Engine::new(EngineConfig::default())?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let t0 = Instant::now();
    let (classifications, priorities) = pool.install(|| {
        let classifications = engine.classify_batch(&planets);
        let priorities: Vec<_> = planets
            .par_iter()
            .map(|planet| engine.calculate_priority_score(planet))
            .collect();
        (classifications, priorities)
    });
    let trends = engine.analyze_discovery_patterns(&planets);
    let elapsed = t0.elapsed();

    if json {
        for (classification, priority) in classifications.iter().zip(&priorities) {
            let line = serde_json::json!({
                "name": classification.planet_name,
                "type": classification.predicted_type,
                "confidence": classification.confidence,
                "priority": priority.score,
            });
            println!("{}", line);
        }
        println!("{}", serde_json::to_string(&trends)?);
    } else {
        let mut ranked: Vec<_> = classifications.iter().zip(&priorities).collect();
        ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        for (classification, priority) in ranked {
            println!(
                "{:<24} {:<14} conf={:.3} priority={:.3}",
                classification.planet_name,
                classification.predicted_type.name(),
                classification.confidence,
                priority.score
            );
        }
        println!();
        println!("Discoveries analyzed: {}", trends.total);
        for point in &trends.forecast {
            println!("  {} forecast: {:.2}", point.year, point.expected);
        }
        println!("  Growth ratio: {:.3}", trends.growth_ratio);
    }

    let stats = engine.classifier().cache_stats();
    eprintln!(
        "Done in {:.1} ms (cache: {} hits, {} misses)",
        elapsed.as_secs_f64() * 1000.0,
        stats.hits,
        stats.misses
    );

    Ok(())
}
