//! Integration tests for the scoring pipeline.
//!
//! Exercises: PlanetParameters → SubScores → composite → jitter
//! → Classification / Factors / recommendations
//!
//! All tests are pure logic with no RNG and no storage.

use exohab_logic::classification::Classification;
use exohab_logic::params::PlanetParameters;
use exohab_logic::prediction::{assemble_prediction, Draws};
use exohab_logic::scoring::{
    orbital_score, raw_score, size_score, stellar_score, temperature_score, SubScores,
};

// ── Helpers ────────────────────────────────────────────────────────────

/// Evenly spaced samples over [lo, hi], both ends included.
fn sweep(lo: f64, hi: f64, steps: usize) -> impl Iterator<Item = f64> {
    (0..=steps).map(move |i| lo + (hi - lo) * i as f64 / steps as f64)
}

fn jitter_draws() -> impl Iterator<Item = Draws> {
    sweep(0.0, 0.999, 20).map(|u| Draws {
        jitter: u,
        ..Draws::neutral()
    })
}

// ── Sub-score properties ───────────────────────────────────────────────

#[test]
fn temperature_plateau_and_floor() {
    for t in sweep(273.0, 323.0, 100) {
        assert_eq!(temperature_score(t), 1.0, "T={}", t);
    }
    for t in sweep(-500.0, 149.99, 100).chain(sweep(500.01, 5000.0, 100)) {
        assert_eq!(temperature_score(t), 0.1, "T={}", t);
    }
}

#[test]
fn size_plateau() {
    for r in sweep(0.8, 1.5, 70) {
        assert_eq!(size_score(r), 1.0, "R={}", r);
    }
}

#[test]
fn orbital_reference_points() {
    assert_eq!(orbital_score(0.05, 365.0), 1.0);
    assert_eq!(orbital_score(0.5, 365.0), 0.5);
    assert!((orbital_score(0.05, 5.0) - 0.7).abs() < 1e-12);
}

#[test]
fn stellar_reference_points() {
    assert_eq!(stellar_score(1.0, 1.0), 1.0);
    assert_eq!(stellar_score(0.2, 1.0), 0.4);
}

#[test]
fn sub_scores_stay_in_unit_interval() {
    for v in sweep(-10.0, 2000.0, 400) {
        for s in [
            temperature_score(v),
            size_score(v / 100.0),
            orbital_score(v / 1000.0, v),
            stellar_score(v / 500.0, v / 500.0),
        ] {
            assert!((0.0..=1.0).contains(&s), "v={} s={}", v, s);
        }
    }
}

// ── Composite + classification ─────────────────────────────────────────

#[test]
fn earth_like_is_prime_under_any_jitter() {
    let earth = PlanetParameters::earth();
    assert!((raw_score(&earth) - 100.0).abs() < 1e-9);

    for draws in jitter_draws() {
        let p = assemble_prediction(&earth, draws);
        assert!(
            (95.0..=100.0).contains(&p.habitability_score),
            "score {}",
            p.habitability_score
        );
        assert_eq!(p.classification, Classification::PrimeHabitable);
    }
}

#[test]
fn mars_like_band_tracks_raw_window() {
    let mars = PlanetParameters::mars();
    let raw = SubScores::compute(&mars).raw_composite();
    assert!((raw - 76.5).abs() < 1e-9);

    for draws in jitter_draws() {
        let p = assemble_prediction(&mars, draws);
        assert!(p.habitability_score >= raw - 5.0 - 0.05);
        assert!(p.habitability_score <= raw + 5.0 + 0.05);
        // 71.5..81.5 straddles the Prime threshold at 80
        assert!(matches!(
            p.classification,
            Classification::MarginalHabitable | Classification::PrimeHabitable
        ));
        let expected = if p.habitability_score >= 80.0 {
            Classification::PrimeHabitable
        } else {
            Classification::MarginalHabitable
        };
        // Only a score that rounds up onto the threshold can disagree
        if (p.habitability_score - 80.0).abs() > 0.05 {
            assert_eq!(p.classification, expected);
        }
    }
}

#[test]
fn scores_are_clamped_and_one_decimal() {
    let params = [
        PlanetParameters::earth(),
        PlanetParameters::mars(),
        PlanetParameters::default(),
        PlanetParameters {
            planet_radius: 11.0,
            orbital_period: 2.0,
            stellar_mass: 8.0,
            equilibrium_temperature: 1500.0,
            eccentricity: 0.8,
            stellar_radius: 6.0,
        },
    ];
    for p in params {
        for draws in jitter_draws() {
            let pred = assemble_prediction(&p, draws);
            let s = pred.habitability_score;
            assert!((0.0..=100.0).contains(&s));
            assert!(((s * 10.0).round() - s * 10.0).abs() < 1e-6, "{} not 1dp", s);
            assert_eq!(pred.recommendations.len(), 2);
        }
    }
}

#[test]
fn hostile_planet_is_non_habitable() {
    let p = PlanetParameters {
        planet_radius: 11.0,
        orbital_period: 2.0,
        stellar_mass: 8.0,
        equilibrium_temperature: 1500.0,
        eccentricity: 0.8,
        stellar_radius: 6.0,
    };
    // 0.4*0.1 + 0.25*0.2 + 0.2*0.35 + 0.15*0.4 = 0.22
    assert!((raw_score(&p) - 22.0).abs() < 1e-9);
    for draws in jitter_draws() {
        let pred = assemble_prediction(&p, draws);
        assert_eq!(pred.classification, Classification::NonHabitable);
        assert_eq!(
            pred.recommendations[0],
            "Low priority for habitability studies"
        );
    }
}
