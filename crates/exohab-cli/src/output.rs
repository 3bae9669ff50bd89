//! Plain-text and JSON printing helpers shared by the subcommands.

use exohab_core::prelude::*;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_kv(key: &str, value: &str) {
    println!("  {:<22} {}", key, value);
}

pub fn print_prediction(p: &HabitabilityPrediction) {
    println!("Habitability prediction:");
    print_kv("Score:", &format!("{:.1}", p.habitability_score));
    print_kv("Classification:", p.classification.label());
    print_kv("Confidence:", &format!("{:.1}%", p.confidence));
    print_kv("Processing time:", &format!("{:.2}s", p.processing_time));
    println!("Factors:");
    for (name, factor) in p.factors.iter() {
        print_kv(
            &format!("{}:", name),
            &format!("{:>3}  {}", factor.score, factor.description),
        );
    }
    println!("Recommendations:");
    for r in &p.recommendations {
        println!("  - {}", r);
    }
}

pub fn print_catalog(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("No matching planets.");
        return;
    }
    for e in entries {
        println!(
            "  {:<4} {:<14} {:>5.1}  {:<20} {:<6} {}",
            e.id, e.name, e.habitability_score, e.habitability, e.discovery_year, e.source
        );
    }
}

pub fn print_saved(records: &[SavedPlanetRecord]) {
    if records.is_empty() {
        println!("No saved planets.");
        return;
    }
    for r in records {
        let score = r
            .score()
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".into());
        let class = r.label().unwrap_or("-");
        println!(
            "  {:<14} {:<24} {:>5}  {:<20} {}",
            r.id,
            r.name,
            score,
            class,
            r.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
}
