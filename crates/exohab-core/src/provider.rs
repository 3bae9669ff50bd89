//! Prediction providers.
//!
//! Callers depend on [`PredictionProvider`] only. The local variant runs the
//! heuristic from `exohab_logic` with its own RNG; the remote variant (behind
//! the `remote` feature) forwards parameters to an HTTP service.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use exohab_logic::params::PlanetParameters;
use exohab_logic::prediction::{assemble_prediction, Draws, HabitabilityPrediction};

use crate::error::PredictionError;

/// Anything that can turn planet parameters into a prediction.
pub trait PredictionProvider {
    fn predict(
        &mut self,
        params: &PlanetParameters,
    ) -> Result<HabitabilityPrediction, PredictionError>;

    /// Short identifier for logs and CLI output.
    fn name(&self) -> &'static str;
}

impl<P: PredictionProvider + ?Sized> PredictionProvider for Box<P> {
    fn predict(
        &mut self,
        params: &PlanetParameters,
    ) -> Result<HabitabilityPrediction, PredictionError> {
        (**self).predict(params)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Rejects parameters holding NaN or infinities.
pub fn check_finite(params: &PlanetParameters) -> Result<(), PredictionError> {
    match params.first_non_finite() {
        Some(field) => Err(PredictionError::NonFiniteInput { field }),
        None => Ok(()),
    }
}

/// Runs the scoring heuristic in-process.
///
/// Generic over the RNG so tests can pass a seeded generator and get
/// repeatable jitter.
#[derive(Debug, Clone)]
pub struct LocalHeuristicProvider<R = StdRng> {
    rng: R,
    simulate_latency: bool,
}

impl LocalHeuristicProvider<StdRng> {
    /// Provider seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Provider whose draws repeat for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LocalHeuristicProvider<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            simulate_latency: false,
        }
    }

    /// Sleep 1–3 s before answering, like a slow model server would.
    pub fn with_simulated_latency(mut self, enabled: bool) -> Self {
        self.simulate_latency = enabled;
        self
    }

    fn sample_draws(&mut self) -> Draws {
        Draws {
            jitter: self.rng.gen::<f64>(),
            confidence: self.rng.gen::<f64>(),
            processing_time: self.rng.gen::<f64>(),
        }
    }
}

impl<R: Rng> PredictionProvider for LocalHeuristicProvider<R> {
    fn predict(
        &mut self,
        params: &PlanetParameters,
    ) -> Result<HabitabilityPrediction, PredictionError> {
        check_finite(params)?;

        let draws = self.sample_draws();
        if self.simulate_latency {
            let secs = 1.0 + self.rng.gen::<f64>() * 2.0;
            thread::sleep(Duration::from_secs_f64(secs));
        }

        let prediction = assemble_prediction(params, draws);
        log::debug!(
            "Local prediction: score={:.1} class={} jitter_draw={:.3}",
            prediction.habitability_score,
            prediction.classification,
            draws.jitter
        );
        Ok(prediction)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
