//! Habitability bands derived from the final score.

use serde::{Deserialize, Serialize};

/// One of four habitability bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Score >= 80.
    #[serde(rename = "Prime Habitable")]
    PrimeHabitable,
    /// Score 60..80.
    #[serde(rename = "Marginal Habitable")]
    MarginalHabitable,
    /// Score 30..60.
    #[serde(rename = "Partially Habitable")]
    PartiallyHabitable,
    /// Score < 30.
    #[serde(rename = "Non-Habitable")]
    NonHabitable,
}

impl Classification {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::PrimeHabitable
        } else if score >= 60.0 {
            Self::MarginalHabitable
        } else if score >= 30.0 {
            Self::PartiallyHabitable
        } else {
            Self::NonHabitable
        }
    }

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::PrimeHabitable => "Prime Habitable",
            Self::MarginalHabitable => "Marginal Habitable",
            Self::PartiallyHabitable => "Partially Habitable",
            Self::NonHabitable => "Non-Habitable",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            Self::PrimeHabitable,
            Self::MarginalHabitable,
            Self::PartiallyHabitable,
            Self::NonHabitable,
        ]
    }

    /// Lowest score that still falls in this band.
    pub fn lower_bound(self) -> f64 {
        match self {
            Self::PrimeHabitable => 80.0,
            Self::MarginalHabitable => 60.0,
            Self::PartiallyHabitable => 30.0,
            Self::NonHabitable => 0.0,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score from which a planet counts as potentially habitable in summaries.
pub const POTENTIALLY_HABITABLE_SCORE: f64 = 60.0;
