//! ExoHab Headless Validation Harness
//!
//! Validates scoring logic, the catalog fixture and the saved-planet store
//! without any UI or network. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p exohab-simtest
//!   cargo run -p exohab-simtest -- --verbose

use exohab_core::catalog::CATALOG_JSON;
use exohab_core::persistence::MemoryStore;
use exohab_core::prelude::*;
use exohab_logic::catalog::CatalogEntry;
use exohab_logic::prediction::{assemble_prediction, Draws};
use exohab_logic::scoring::{self, SubScores};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== ExoHab Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog fixture validation
    results.extend(validate_catalog_fixture(verbose));

    // 2. Sub-score step functions
    results.extend(validate_sub_scores(verbose));

    // 3. Composite + classification sweep
    results.extend(validate_composite(verbose));

    // 4. Provider behavior
    results.extend(validate_provider(verbose));

    // 5. Saved-planet store
    results.extend(validate_store(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog Fixture ──────────────────────────────────────────────────

fn validate_catalog_fixture(verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog Fixture ---");
    let mut results = Vec::new();

    let catalog: Vec<CatalogEntry> = match serde_json::from_str(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: !catalog.is_empty(),
        detail: format!("{} reference planets loaded", catalog.len()),
    });

    let bad_score: Vec<_> = catalog
        .iter()
        .filter(|e| !(0.0..=100.0).contains(&e.habitability_score))
        .collect();
    results.push(TestResult {
        name: "catalog_scores_in_range".into(),
        passed: bad_score.is_empty(),
        detail: if bad_score.is_empty() {
            "all scores within 0-100".into()
        } else {
            format!(
                "{} entries out of range: {}",
                bad_score.len(),
                bad_score
                    .iter()
                    .map(|e| e.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        },
    });

    let mut ids: Vec<u32> = catalog.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    results.push(TestResult {
        name: "catalog_unique_ids".into(),
        passed: ids.len() == catalog.len(),
        detail: format!("{} unique ids for {} entries", ids.len(), catalog.len()),
    });

    let bad_year: Vec<_> = catalog
        .iter()
        .filter(|e| e.discovery_year_value() < 1990)
        .collect();
    results.push(TestResult {
        name: "catalog_discovery_years".into(),
        passed: bad_year.is_empty(),
        detail: if bad_year.is_empty() {
            "all discovery years plausible (>= 1990)".into()
        } else {
            format!("{} entries with implausible year", bad_year.len())
        },
    });

    if verbose {
        for e in &catalog {
            println!(
                "    {:<14} {:>5.1}  {:<20} {}",
                e.name, e.habitability_score, e.habitability, e.source
            );
        }
    }

    results
}

// ── 2. Sub-scores ───────────────────────────────────────────────────────

fn validate_sub_scores(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sub-scores ---");
    let mut results = Vec::new();

    // Temperature plateau 273..=323 and floor outside 150..=500
    let plateau_ok = (273..=323).all(|t| scoring::temperature_score(t as f64) == 1.0);
    let floor_ok = (0..150)
        .chain(501..1500)
        .all(|t| scoring::temperature_score(t as f64) == 0.1);
    results.push(TestResult {
        name: "temp_plateau_and_floor".into(),
        passed: plateau_ok && floor_ok,
        detail: "1.0 across 273-323 K, 0.1 below 150 K and above 500 K".into(),
    });

    // Temperature is monotone non-increasing away from the plateau
    let cold_side: Vec<f64> = (0..=273).rev().map(|t| scoring::temperature_score(t as f64)).collect();
    let hot_side: Vec<f64> = (323..=1000).map(|t| scoring::temperature_score(t as f64)).collect();
    let monotone = cold_side.windows(2).all(|w| w[1] <= w[0])
        && hot_side.windows(2).all(|w| w[1] <= w[0]);
    results.push(TestResult {
        name: "temp_monotone_from_plateau".into(),
        passed: monotone,
        detail: "score never rises moving away from 273-323 K".into(),
    });

    let size_ok = (80..=150).all(|r| scoring::size_score(r as f64 / 100.0) == 1.0);
    results.push(TestResult {
        name: "size_plateau".into(),
        passed: size_ok,
        detail: "1.0 across 0.8-1.5 Earth radii".into(),
    });

    let o1 = scoring::orbital_score(0.05, 365.0);
    let o2 = scoring::orbital_score(0.5, 365.0);
    let o3 = scoring::orbital_score(0.05, 5.0);
    results.push(TestResult {
        name: "orbital_reference_points".into(),
        passed: o1 == 1.0 && o2 == 0.5 && (o3 - 0.7).abs() < 1e-12,
        detail: format!("circular={:.2} eccentric={:.2} short-period={:.2}", o1, o2, o3),
    });

    let s1 = scoring::stellar_score(1.0, 1.0);
    let s2 = scoring::stellar_score(0.2, 1.0);
    results.push(TestResult {
        name: "stellar_reference_points".into(),
        passed: s1 == 1.0 && s2 == 0.4,
        detail: format!("sun={:.2} small-red-dwarf={:.2}", s1, s2),
    });

    results
}

// ── 3. Composite & Classification ───────────────────────────────────────

fn validate_composite(verbose: bool) -> Vec<TestResult> {
    println!("--- Composite & Classification ---");
    let mut results = Vec::new();

    let earth = SubScores::compute(&PlanetParameters::earth()).raw_composite();
    results.push(TestResult {
        name: "composite_earth_full_marks".into(),
        passed: (earth - 100.0).abs() < 1e-9,
        detail: format!("earth raw={:.3}", earth),
    });

    let mars = SubScores::compute(&PlanetParameters::mars()).raw_composite();
    results.push(TestResult {
        name: "composite_mars".into(),
        passed: (mars - 76.5).abs() < 1e-9,
        detail: format!("mars raw={:.3}", mars),
    });

    // Jitter window: every draw keeps the score within ±5 of raw and in range
    let mut worst_dev: f64 = 0.0;
    let mut out_of_range = 0;
    for i in 0..=100 {
        let draws = Draws {
            jitter: i as f64 / 101.0,
            ..Draws::neutral()
        };
        for params in [PlanetParameters::earth(), PlanetParameters::mars()] {
            let raw = scoring::raw_score(&params);
            let p = assemble_prediction(&params, draws);
            let unclamped_dev = (p.habitability_score - raw).abs();
            if p.habitability_score < 100.0 {
                worst_dev = worst_dev.max(unclamped_dev);
            }
            if !(0.0..=100.0).contains(&p.habitability_score) {
                out_of_range += 1;
            }
        }
    }
    results.push(TestResult {
        name: "jitter_window".into(),
        passed: worst_dev <= 5.05 && out_of_range == 0,
        detail: format!("max deviation {:.2}, {} out of range", worst_dev, out_of_range),
    });

    // Band thresholds line up with the recommendation tiers where they should
    let tiers_ok = Classification::all()
        .iter()
        .all(|c| Classification::from_score(c.lower_bound()) == *c);
    results.push(TestResult {
        name: "classification_bounds".into(),
        passed: tiers_ok,
        detail: "each band's lower bound classifies into itself".into(),
    });

    if verbose {
        for (label, params) in [
            ("earth", PlanetParameters::earth()),
            ("mars", PlanetParameters::mars()),
            ("form default", PlanetParameters::default()),
        ] {
            let p = assemble_prediction(&params, Draws::neutral());
            println!(
                "    {:<13} score={:>5.1} class={}",
                label, p.habitability_score, p.classification
            );
        }
    }

    results
}

// ── 4. Provider ─────────────────────────────────────────────────────────

fn validate_provider(_verbose: bool) -> Vec<TestResult> {
    println!("--- Provider ---");
    let mut results = Vec::new();

    let mut a = LocalHeuristicProvider::seeded(2024);
    let mut b = LocalHeuristicProvider::seeded(2024);
    let params = PlanetParameters::mars();
    let same = (0..20).all(|_| match (a.predict(&params), b.predict(&params)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    });
    results.push(TestResult {
        name: "provider_seeded_repeatable".into(),
        passed: same,
        detail: "same seed → identical predictions".into(),
    });

    let mut provider = LocalHeuristicProvider::seeded(1);
    let nan = PlanetParameters {
        stellar_mass: f64::NAN,
        ..PlanetParameters::earth()
    };
    let rejected = matches!(
        provider.predict(&nan),
        Err(PredictionError::NonFiniteInput { .. })
    );
    results.push(TestResult {
        name: "provider_rejects_nan".into(),
        passed: rejected,
        detail: "NaN stellar mass is refused, not scored".into(),
    });

    let earth_prime = (0..100).all(|_| {
        provider
            .predict(&PlanetParameters::earth())
            .map(|p| p.classification == Classification::PrimeHabitable)
            .unwrap_or(false)
    });
    results.push(TestResult {
        name: "provider_earth_prime".into(),
        passed: earth_prime,
        detail: "100 earth predictions all Prime Habitable".into(),
    });

    results
}

// ── 5. Saved Store ──────────────────────────────────────────────────────

fn validate_store(_verbose: bool) -> Vec<TestResult> {
    println!("--- Saved Store ---");
    let mut results = Vec::new();

    let mut store = match PlanetCatalogStore::new(MemoryStore::new()) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "store_open".into(),
                passed: false,
                detail: format!("could not open store: {}", e),
            });
            return results;
        }
    };
    let mut provider = LocalHeuristicProvider::seeded(7);

    let mut ids = Vec::new();
    for params in [
        PlanetParameters::earth(),
        PlanetParameters::mars(),
        PlanetParameters::default(),
    ] {
        let saved = provider
            .predict(&params)
            .map_err(|e| e.to_string())
            .and_then(|p| {
                store
                    .save(NewPlanetRecord::custom(params, p))
                    .map_err(|e| e.to_string())
            });
        if let Ok(r) = saved {
            ids.push(r.id);
        }
    }
    let listed = store.list().map(|l| l.len()).unwrap_or(0);
    results.push(TestResult {
        name: "store_save_list".into(),
        passed: ids.len() == 3 && listed == 3,
        detail: format!("{} saved, {} listed", ids.len(), listed),
    });

    let distinct = ids.windows(2).all(|w| w[1] > w[0]);
    results.push(TestResult {
        name: "store_ids_increasing".into(),
        passed: distinct,
        detail: format!("ids {:?}", ids),
    });

    let roundtrip = store
        .export_all()
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Vec<SavedPlanetRecord>>(&bytes).ok())
        .zip(store.list().ok())
        .map_or(false, |(exported, listed)| exported == listed);
    results.push(TestResult {
        name: "store_export_roundtrip".into(),
        passed: roundtrip,
        detail: "export parses back to the listed records".into(),
    });

    let deleted = ids
        .first()
        .map(|id| store.delete(*id).is_ok() && store.delete(*id).is_ok())
        .unwrap_or(false);
    let remaining = store.list().map(|l| l.len()).unwrap_or(0);
    results.push(TestResult {
        name: "store_delete_idempotent".into(),
        passed: deleted && remaining == 2,
        detail: format!("{} remaining after deleting one id twice", remaining),
    });

    let kepler = store.search(&CatalogQuery::default().text("kepler"));
    results.push(TestResult {
        name: "store_catalog_search".into(),
        passed: kepler.len() == 2 && kepler[0].name == "Kepler-186f",
        detail: format!("{} Kepler entries", kepler.len()),
    });

    results
}
