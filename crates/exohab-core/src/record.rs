//! Saved planet records and the views over a saved collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use exohab_logic::catalog::CatalogEntry;
use exohab_logic::classification::{Classification, POTENTIALLY_HABITABLE_SCORE};
use exohab_logic::factors::Factors;
use exohab_logic::params::PlanetParameters;
use exohab_logic::prediction::HabitabilityPrediction;

/// Prediction fields that may or may not accompany a saved planet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPrediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitability_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Factors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl PartialPrediction {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<HabitabilityPrediction> for PartialPrediction {
    fn from(p: HabitabilityPrediction) -> Self {
        Self {
            habitability_score: Some(p.habitability_score),
            confidence: Some(p.confidence),
            classification: Some(p.classification),
            factors: Some(p.factors),
            recommendations: Some(p.recommendations),
            processing_time: Some(p.processing_time),
        }
    }
}

/// A planet entered through the prediction form, with whatever prediction
/// came back for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPlanet {
    #[serde(flatten)]
    pub params: PlanetParameters,
    #[serde(flatten)]
    pub prediction: PartialPrediction,
}

/// Display fields of a reference catalog entry, kept as the catalog wrote
/// them ("129.9 days", "188 K").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub habitability: String,
    pub habitability_score: f64,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub radius: String,
    #[serde(default)]
    pub orbital_period: String,
    #[serde(default)]
    pub equilibrium_temp: String,
    #[serde(default)]
    pub discovery_year: String,
    #[serde(default)]
    pub discovery_method: String,
    #[serde(default)]
    pub stellar_type: String,
    #[serde(default)]
    pub source: String,
}

impl From<&CatalogEntry> for CatalogSnapshot {
    fn from(e: &CatalogEntry) -> Self {
        Self {
            habitability: e.habitability.clone(),
            habitability_score: e.habitability_score,
            distance: e.distance.clone(),
            mass: e.mass.clone(),
            radius: e.radius.clone(),
            orbital_period: e.orbital_period.clone(),
            equilibrium_temp: e.equilibrium_temp.clone(),
            discovery_year: e.discovery_year.clone(),
            discovery_method: e.discovery_method.clone(),
            stellar_type: e.stellar_type.clone(),
            source: e.source.clone(),
        }
    }
}

/// Body of a saved record. Both shapes share the flat JSON object of the
/// saved slot and are told apart by field types: custom planets carry
/// numeric parameters, catalog planets carry display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedPlanet {
    Custom(CustomPlanet),
    Catalog(CatalogSnapshot),
}

impl SavedPlanet {
    pub fn params(&self) -> Option<&PlanetParameters> {
        match self {
            Self::Custom(c) => Some(&c.params),
            Self::Catalog(_) => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Custom(c) => c.prediction.habitability_score,
            Self::Catalog(c) => Some(c.habitability_score),
        }
    }

    fn has_prediction(&self) -> bool {
        matches!(self, Self::Custom(c) if !c.prediction.is_empty())
    }
}

/// What a caller hands to the store to save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanetRecord {
    #[serde(flatten)]
    pub planet: SavedPlanet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Defaults to "a prediction is attached" when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prediction: Option<bool>,
}

impl NewPlanetRecord {
    /// Parameters only, no prediction attached.
    pub fn from_params(params: PlanetParameters) -> Self {
        Self {
            planet: SavedPlanet::Custom(CustomPlanet {
                params,
                prediction: PartialPrediction::default(),
            }),
            name: None,
            custom_prediction: None,
        }
    }

    /// A user-entered planet together with its fresh prediction.
    pub fn custom(params: PlanetParameters, prediction: HabitabilityPrediction) -> Self {
        Self {
            planet: SavedPlanet::Custom(CustomPlanet {
                params,
                prediction: prediction.into(),
            }),
            name: None,
            custom_prediction: Some(true),
        }
    }

    /// A reference catalog planet, saved under its catalog name.
    pub fn from_catalog(entry: &CatalogEntry) -> Self {
        Self {
            planet: SavedPlanet::Catalog(entry.into()),
            name: Some(entry.name.clone()),
            custom_prediction: Some(false),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the saved record should be flagged as a custom prediction.
    pub(crate) fn is_custom_prediction(&self) -> bool {
        self.custom_prediction
            .unwrap_or_else(|| self.planet.has_prediction())
    }
}

/// A planet persisted in the saved collection. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlanetRecord {
    pub id: i64,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub custom_prediction: bool,
    #[serde(flatten)]
    pub planet: SavedPlanet,
}

impl SavedPlanetRecord {
    pub fn score(&self) -> Option<f64> {
        self.planet.score()
    }

    /// Predicted class of a custom planet, or the class its catalog score
    /// falls in.
    pub fn classification(&self) -> Option<Classification> {
        match &self.planet {
            SavedPlanet::Custom(c) => c.prediction.classification,
            SavedPlanet::Catalog(c) => Some(Classification::from_score(c.habitability_score)),
        }
    }

    /// Label shown next to the record: the predicted class, or the
    /// catalog's own habitability text.
    pub fn label(&self) -> Option<&str> {
        match &self.planet {
            SavedPlanet::Custom(c) => c.prediction.classification.map(Classification::label),
            SavedPlanet::Catalog(c) => Some(c.habitability.as_str()),
        }
    }
}

/// Ordering for the saved-planets list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavedSort {
    /// Most recently saved first.
    #[default]
    SavedAt,
    /// Name, A–Z.
    Name,
    /// Highest score first; records without a score count as 0.
    HabitabilityScore,
}

/// Search and ordering applied to the saved list for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedView {
    /// Case-insensitive substring of name or classification.
    pub query: Option<String>,
    pub sort: SavedSort,
}

impl SavedView {
    pub fn apply(&self, records: &[SavedPlanetRecord]) -> Vec<SavedPlanetRecord> {
        let needle = self
            .query
            .as_deref()
            .map(str::to_lowercase)
            .filter(|q| !q.is_empty());

        let mut out: Vec<SavedPlanetRecord> = records
            .iter()
            .filter(|r| match &needle {
                None => true,
                Some(q) => {
                    r.name.to_lowercase().contains(q)
                        || r.classification()
                            .map_or(false, |c| c.label().to_lowercase().contains(q))
                        || r.label().map_or(false, |l| l.to_lowercase().contains(q))
                }
            })
            .cloned()
            .collect();

        match self.sort {
            SavedSort::SavedAt => out.sort_by(|a, b| b.saved_at.cmp(&a.saved_at)),
            SavedSort::Name => out.sort_by(|a, b| a.name.cmp(&b.name)),
            SavedSort::HabitabilityScore => out.sort_by(|a, b| {
                let (sa, sb) = (a.score().unwrap_or(0.0), b.score().unwrap_or(0.0));
                sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        out
    }
}

/// Summary counts over a saved collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStats {
    pub total: usize,
    /// Records scoring at least 60.
    pub potentially_habitable: usize,
    pub custom_predictions: usize,
}

impl SavedStats {
    pub fn compute(records: &[SavedPlanetRecord]) -> Self {
        Self {
            total: records.len(),
            potentially_habitable: records
                .iter()
                .filter(|r| r.score().unwrap_or(0.0) >= POTENTIALLY_HABITABLE_SCORE)
                .count(),
            custom_predictions: records.iter().filter(|r| r.custom_prediction).count(),
        }
    }
}
