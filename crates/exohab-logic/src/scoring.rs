//! Habitability sub-scores and the weighted composite.
//!
//! Each sub-score is a step function normalized to [0.0, 1.0]. Band checks
//! are inclusive and tested narrowest first, so a value sitting in several
//! overlapping bands gets the best one. Any finite input (including zero and
//! negatives) lands in some band; nothing here can fail.

use crate::params::PlanetParameters;

/// Weight of the temperature sub-score in the composite.
pub const TEMPERATURE_WEIGHT: f64 = 0.40;
/// Weight of the planet-size sub-score in the composite.
pub const SIZE_WEIGHT: f64 = 0.25;
/// Weight of the orbital-stability sub-score in the composite.
pub const ORBITAL_WEIGHT: f64 = 0.20;
/// Weight of the stellar-suitability sub-score in the composite.
pub const STELLAR_WEIGHT: f64 = 0.15;

/// Half-width of the symmetric jitter added to the composite, in score points.
pub const JITTER_HALF_WIDTH: f64 = 5.0;

/// Temperature bands in Kelvin (inclusive) and their scores, narrowest first.
const TEMPERATURE_BANDS: [(f64, f64, f64); 4] = [
    (273.0, 323.0, 1.0),
    (250.0, 373.0, 0.8),
    (200.0, 400.0, 0.6),
    (150.0, 500.0, 0.3),
];
const TEMPERATURE_FLOOR: f64 = 0.1;

/// Radius bands in Earth radii (inclusive) and their scores, narrowest first.
const SIZE_BANDS: [(f64, f64, f64); 3] = [(0.8, 1.5, 1.0), (0.5, 2.0, 0.7), (0.3, 3.0, 0.4)];
const SIZE_FLOOR: f64 = 0.2;

fn banded(value: f64, bands: &[(f64, f64, f64)], floor: f64) -> f64 {
    bands
        .iter()
        .find(|(lo, hi, _)| value >= *lo && value <= *hi)
        .map(|(_, _, score)| *score)
        .unwrap_or(floor)
}

/// Temperature sub-score from equilibrium temperature in Kelvin.
///
/// 1.0 for 273–323 K (liquid water at the surface), stepping down through
/// 0.8, 0.6 and 0.3 to 0.1 outside 150–500 K.
pub fn temperature_score(kelvin: f64) -> f64 {
    banded(kelvin, &TEMPERATURE_BANDS, TEMPERATURE_FLOOR)
}

/// Size sub-score from planet radius in Earth radii.
pub fn size_score(earth_radii: f64) -> f64 {
    banded(earth_radii, &SIZE_BANDS, SIZE_FLOOR)
}

/// Orbital-stability sub-score.
///
/// Starts at 1.0. Eccentricity above 0.3 halves it, above 0.1 takes 20% off.
/// A period shorter than 10 days or longer than 1000 days applies a further
/// 0.7 multiplier; both penalties compose.
pub fn orbital_score(eccentricity: f64, period_days: f64) -> f64 {
    let mut score = 1.0;

    if eccentricity > 0.3 {
        score *= 0.5;
    } else if eccentricity > 0.1 {
        score *= 0.8;
    }

    if period_days < 10.0 || period_days > 1000.0 {
        score *= 0.7;
    }

    score
}

/// Stellar-suitability sub-score from host star mass and radius (solar units).
pub fn stellar_score(solar_masses: f64, solar_radii: f64) -> f64 {
    if (0.5..=1.5).contains(&solar_masses) && (0.7..=1.3).contains(&solar_radii) {
        1.0
    } else if (0.3..=2.0).contains(&solar_masses) {
        0.7
    } else {
        0.4
    }
}

/// The four sub-scores for one set of parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub temperature: f64,
    pub size: f64,
    pub orbital: f64,
    pub stellar: f64,
}

impl SubScores {
    pub fn compute(params: &PlanetParameters) -> Self {
        Self {
            temperature: temperature_score(params.equilibrium_temperature),
            size: size_score(params.planet_radius),
            orbital: orbital_score(params.eccentricity, params.orbital_period),
            stellar: stellar_score(params.stellar_mass, params.stellar_radius),
        }
    }

    /// Weighted composite on a 0–100 scale, before jitter.
    pub fn raw_composite(&self) -> f64 {
        100.0
            * (TEMPERATURE_WEIGHT * self.temperature
                + SIZE_WEIGHT * self.size
                + ORBITAL_WEIGHT * self.orbital
                + STELLAR_WEIGHT * self.stellar)
    }
}

/// Deterministic composite score for the given parameters.
pub fn raw_score(params: &PlanetParameters) -> f64 {
    SubScores::compute(params).raw_composite()
}

/// Add jitter to a raw composite and clamp to [0, 100].
///
/// `unit` is a uniform draw in [0, 1); 0.5 means no jitter. The result is
/// not rounded, since classification reads the unrounded value.
pub fn apply_jitter(raw: f64, unit: f64) -> f64 {
    let jitter = (unit - 0.5) * 2.0 * JITTER_HALF_WIDTH;
    (raw + jitter).clamp(0.0, 100.0)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_bands() {
        for t in [273.0, 288.0, 300.0, 323.0] {
            assert_eq!(temperature_score(t), 1.0, "T={}", t);
        }
        assert_eq!(temperature_score(250.0), 0.8);
        assert_eq!(temperature_score(373.0), 0.8);
        assert_eq!(temperature_score(323.5), 0.8);
        assert_eq!(temperature_score(210.0), 0.6);
        assert_eq!(temperature_score(400.0), 0.6);
        assert_eq!(temperature_score(150.0), 0.3);
        assert_eq!(temperature_score(500.0), 0.3);
        for t in [-10.0, 0.0, 149.9, 500.1, 5000.0] {
            assert_eq!(temperature_score(t), 0.1, "T={}", t);
        }
    }

    #[test]
    fn test_size_bands() {
        for r in [0.8, 1.0, 1.11, 1.5] {
            assert_eq!(size_score(r), 1.0, "R={}", r);
        }
        assert_eq!(size_score(0.53), 0.7);
        assert_eq!(size_score(2.0), 0.7);
        assert_eq!(size_score(0.3), 0.4);
        assert_eq!(size_score(3.0), 0.4);
        assert_eq!(size_score(0.0), 0.2);
        assert_eq!(size_score(-2.0), 0.2);
        assert_eq!(size_score(11.2), 0.2);
    }

    #[test]
    fn test_orbital_penalties() {
        assert_eq!(orbital_score(0.05, 365.0), 1.0);
        assert_eq!(orbital_score(0.5, 365.0), 0.5);
        assert!((orbital_score(0.05, 5.0) - 0.7).abs() < 1e-12);
        assert!((orbital_score(0.2, 365.0) - 0.8).abs() < 1e-12);
        // Boundaries are exclusive for eccentricity penalties
        assert_eq!(orbital_score(0.1, 365.0), 1.0);
        assert!((orbital_score(0.3, 365.0) - 0.8).abs() < 1e-12);
        // Both penalties apply together
        assert!((orbital_score(0.5, 2000.0) - 0.35).abs() < 1e-12);
        // Period bounds are inclusive of 10 and 1000
        assert_eq!(orbital_score(0.0, 10.0), 1.0);
        assert_eq!(orbital_score(0.0, 1000.0), 1.0);
    }

    #[test]
    fn test_stellar_bands() {
        assert_eq!(stellar_score(1.0, 1.0), 1.0);
        assert_eq!(stellar_score(0.2, 1.0), 0.4);
        // Sun-like mass but oversized radius drops to the mass-only band
        assert_eq!(stellar_score(1.0, 2.0), 0.7);
        assert_eq!(stellar_score(1.8, 1.0), 0.7);
        assert_eq!(stellar_score(3.0, 1.0), 0.4);
    }

    #[test]
    fn test_earth_composite_is_full_marks() {
        let raw = raw_score(&PlanetParameters::earth());
        assert!((raw - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mars_composite() {
        let subs = SubScores::compute(&PlanetParameters::mars());
        assert_eq!(subs.temperature, 0.6);
        assert_eq!(subs.size, 0.7);
        assert_eq!(subs.orbital, 1.0);
        assert_eq!(subs.stellar, 1.0);
        assert!((subs.raw_composite() - 76.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_score_low() {
        let p = PlanetParameters {
            planet_radius: 0.0,
            orbital_period: 0.0,
            stellar_mass: 0.0,
            equilibrium_temperature: 0.0,
            eccentricity: 0.0,
            stellar_radius: 0.0,
        };
        // 0.4*0.1 + 0.25*0.2 + 0.2*0.7 + 0.15*0.4
        assert!((raw_score(&p) - 29.0).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_window_and_clamp() {
        assert!((apply_jitter(50.0, 0.5) - 50.0).abs() < 1e-12);
        assert!((apply_jitter(50.0, 0.0) - 45.0).abs() < 1e-12);
        assert!(apply_jitter(50.0, 0.999_999) < 55.0);
        assert_eq!(apply_jitter(99.0, 0.99), 100.0);
        assert_eq!(apply_jitter(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(76.54), 76.5);
        assert_eq!(round1(76.56), 76.6);
        assert_eq!(round2(1.234), 1.23);
    }
}
