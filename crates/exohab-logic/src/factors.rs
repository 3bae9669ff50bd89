//! Per-factor breakdown shown next to the headline score.

use serde::{Deserialize, Serialize};

use crate::params::PlanetParameters;
use crate::scoring::SubScores;

/// One factor of the breakdown.
///
/// `flag` reads as "optimal" for temperature and size, "stable" for the
/// orbit and "suitable" for the star. Those names are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Sub-score scaled to 0–100.
    pub score: u8,
    #[serde(alias = "optimal", alias = "stable", alias = "suitable")]
    pub flag: bool,
    pub description: String,
}

/// Breakdown keyed by factor name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factors {
    pub temperature: FactorScore,
    pub size: FactorScore,
    pub orbital: FactorScore,
    pub stellar: FactorScore,
}

impl Factors {
    pub fn build(params: &PlanetParameters, subs: &SubScores) -> Self {
        let t = params.equilibrium_temperature;
        let r = params.planet_radius;
        let e = params.eccentricity;
        let m = params.stellar_mass;

        Self {
            temperature: FactorScore {
                score: percent(subs.temperature),
                flag: temperature_optimal(t),
                description: temperature_description(t).to_string(),
            },
            size: FactorScore {
                score: percent(subs.size),
                flag: size_optimal(r),
                description: size_description(r).to_string(),
            },
            orbital: FactorScore {
                score: percent(subs.orbital),
                flag: orbit_stable(e),
                description: orbital_description(e).to_string(),
            },
            stellar: FactorScore {
                score: percent(subs.stellar),
                flag: star_suitable(m),
                description: stellar_description(m).to_string(),
            },
        }
    }

    /// Factors in display order with their names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FactorScore)> {
        [
            ("temperature", &self.temperature),
            ("size", &self.size),
            ("orbital", &self.orbital),
            ("stellar", &self.stellar),
        ]
        .into_iter()
    }
}

fn percent(unit: f64) -> u8 {
    (unit * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn temperature_optimal(kelvin: f64) -> bool {
    (273.0..=323.0).contains(&kelvin)
}

pub fn size_optimal(earth_radii: f64) -> bool {
    (0.8..=1.5).contains(&earth_radii)
}

pub fn orbit_stable(eccentricity: f64) -> bool {
    eccentricity < 0.3
}

/// Mass-only check; the radius window only affects the sub-score.
pub fn star_suitable(solar_masses: f64) -> bool {
    (0.5..=1.5).contains(&solar_masses)
}

fn temperature_description(kelvin: f64) -> &'static str {
    if temperature_optimal(kelvin) {
        "Optimal for liquid water"
    } else if kelvin < 273.0 {
        "Too cold - water likely frozen"
    } else if kelvin > 373.0 {
        "Too hot - water likely vaporized"
    } else {
        "Marginal temperature range"
    }
}

fn size_description(earth_radii: f64) -> &'static str {
    if size_optimal(earth_radii) {
        "Earth-like size"
    } else if earth_radii < 0.8 {
        "Smaller than Earth - thin atmosphere risk"
    } else {
        "Larger than Earth - thick atmosphere likely"
    }
}

fn orbital_description(eccentricity: f64) -> &'static str {
    if eccentricity < 0.1 {
        "Stable circular orbit"
    } else if eccentricity < 0.3 {
        "Moderately elliptical orbit"
    } else {
        "Highly elliptical - temperature variations"
    }
}

fn stellar_description(solar_masses: f64) -> &'static str {
    if star_suitable(solar_masses) {
        "Sun-like star - stable energy output"
    } else if solar_masses < 0.5 {
        "Red dwarf - potentially tidally locked"
    } else {
        "Massive star - shorter lifetime"
    }
}
