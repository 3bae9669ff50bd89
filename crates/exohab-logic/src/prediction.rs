//! Full habitability prediction assembled from parameters and random draws.
//!
//! The heuristic has three random inputs: the score jitter, a simulated
//! confidence, and a simulated processing time. They arrive here as plain
//! unit draws so the assembly stays deterministic and testable; the provider
//! that owns the RNG samples them.

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::factors::Factors;
use crate::params::PlanetParameters;
use crate::scoring::{apply_jitter, round1, round2, SubScores};

/// Uniform draws in [0, 1) consumed by one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draws {
    /// Maps to a score jitter of `(jitter - 0.5) * 10`.
    pub jitter: f64,
    /// Maps to a confidence of `85 + confidence * 10`.
    pub confidence: f64,
    /// Maps to a processing time of `0.5 + processing_time * 2` seconds.
    pub processing_time: f64,
}

impl Draws {
    /// Draws that add no jitter, centered confidence and processing time.
    pub fn neutral() -> Self {
        Self {
            jitter: 0.5,
            confidence: 0.5,
            processing_time: 0.5,
        }
    }
}

/// Result of scoring one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitabilityPrediction {
    /// 0–100, one decimal place.
    pub habitability_score: f64,
    /// 85–95, one decimal place. Not derived from the score.
    pub confidence: f64,
    pub classification: Classification,
    pub factors: Factors,
    pub recommendations: Vec<String>,
    /// Simulated seconds, two decimal places.
    pub processing_time: f64,
}

/// Score `params` using the given draws.
///
/// Classification and recommendations read the jittered, clamped score
/// before it is rounded to one decimal.
pub fn assemble_prediction(params: &PlanetParameters, draws: Draws) -> HabitabilityPrediction {
    let subs = SubScores::compute(params);
    let score = apply_jitter(subs.raw_composite(), draws.jitter);

    HabitabilityPrediction {
        habitability_score: round1(score),
        confidence: round1(85.0 + draws.confidence * 10.0),
        classification: Classification::from_score(score),
        factors: Factors::build(params, &subs),
        recommendations: recommendations(score)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        processing_time: round2(0.5 + draws.processing_time * 2.0),
    }
}

/// Follow-up suggestions for a final score.
pub fn recommendations(score: f64) -> [&'static str; 2] {
    if score >= 70.0 {
        [
            "High priority target for atmospheric analysis",
            "Candidate for biosignature detection",
        ]
    } else if score >= 40.0 {
        [
            "Requires additional observational data",
            "Consider atmospheric modeling studies",
        ]
    } else {
        [
            "Low priority for habitability studies",
            "May be suitable for comparative planetology",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_neutral() {
        let p = assemble_prediction(&PlanetParameters::earth(), Draws::neutral());
        assert_eq!(p.habitability_score, 100.0);
        assert_eq!(p.confidence, 90.0);
        assert_eq!(p.processing_time, 1.5);
        assert_eq!(p.classification, Classification::PrimeHabitable);
        assert_eq!(
            p.recommendations,
            vec![
                "High priority target for atmospheric analysis".to_string(),
                "Candidate for biosignature detection".to_string(),
            ]
        );
    }

    #[test]
    fn test_earth_worst_jitter_still_prime() {
        let draws = Draws {
            jitter: 0.0,
            ..Draws::neutral()
        };
        let p = assemble_prediction(&PlanetParameters::earth(), draws);
        assert_eq!(p.habitability_score, 95.0);
        assert_eq!(p.classification, Classification::PrimeHabitable);
    }

    #[test]
    fn test_mars_band_follows_jitter() {
        let mars = PlanetParameters::mars();
        let low = assemble_prediction(&mars, Draws { jitter: 0.0, ..Draws::neutral() });
        assert_eq!(low.habitability_score, 71.5);
        assert_eq!(low.classification, Classification::MarginalHabitable);

        let high = assemble_prediction(&mars, Draws { jitter: 0.9, ..Draws::neutral() });
        assert_eq!(high.habitability_score, 80.5);
        assert_eq!(high.classification, Classification::PrimeHabitable);
    }

    #[test]
    fn test_confidence_and_processing_ranges() {
        let lo = assemble_prediction(
            &PlanetParameters::default(),
            Draws {
                jitter: 0.5,
                confidence: 0.0,
                processing_time: 0.0,
            },
        );
        assert_eq!(lo.confidence, 85.0);
        assert_eq!(lo.processing_time, 0.5);

        let hi = assemble_prediction(
            &PlanetParameters::default(),
            Draws {
                jitter: 0.5,
                confidence: 0.999,
                processing_time: 0.999,
            },
        );
        assert!(hi.confidence <= 95.0);
        assert!(hi.processing_time <= 2.5);
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(recommendations(70.0)[0], "High priority target for atmospheric analysis");
        assert_eq!(recommendations(69.9)[0], "Requires additional observational data");
        assert_eq!(recommendations(40.0)[1], "Consider atmospheric modeling studies");
        assert_eq!(recommendations(39.9)[0], "Low priority for habitability studies");
    }

    #[test]
    fn test_hostile_input_never_panics() {
        let p = PlanetParameters {
            planet_radius: -4.0,
            orbital_period: -1.0,
            stellar_mass: -1.0,
            equilibrium_temperature: -300.0,
            eccentricity: 5.0,
            stellar_radius: -1.0,
        };
        let pred = assemble_prediction(&p, Draws::neutral());
        assert!(pred.habitability_score >= 0.0 && pred.habitability_score <= 100.0);
        assert_eq!(pred.classification, Classification::NonHabitable);
    }

    #[test]
    fn test_wire_shape() {
        let p = assemble_prediction(&PlanetParameters::earth(), Draws::neutral());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["habitabilityScore"], 100.0);
        assert_eq!(json["classification"], "Prime Habitable");
        assert_eq!(json["factors"]["orbital"]["score"], 100);
        assert!(json["processingTime"].is_number());
    }
}
