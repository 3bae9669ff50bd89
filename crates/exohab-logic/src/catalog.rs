//! Reference exoplanet catalog: entry model, queries, and sorting.
//!
//! Entries are read-only reference data. Display fields such as distance
//! and mass keep their unit suffix ("582 ly", "1.2 ME") exactly as the
//! source archive reports them.

use serde::{Deserialize, Serialize};

/// One known exoplanet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    /// Free-text habitability label, e.g. "High Habitability".
    pub habitability: String,
    pub habitability_score: f64,
    pub distance: String,
    pub mass: String,
    pub radius: String,
    pub orbital_period: String,
    pub equilibrium_temp: String,
    pub discovery_year: String,
    pub discovery_method: String,
    pub stellar_type: String,
    pub source: String,
}

impl CatalogEntry {
    /// Discovery year as a number, 0 when the field is not numeric.
    pub fn discovery_year_value(&self) -> u32 {
        self.discovery_year.trim().parse().unwrap_or(0)
    }
}

/// Ordering requested by a catalog caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSort {
    /// Name, A–Z.
    Name,
    /// Highest score first.
    HabitabilityScore,
    /// Newest discovery first.
    DiscoveryYear,
}

/// Catalog filters. `None` and empty strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// Case-insensitive substring of the planet name.
    #[serde(default, rename = "search", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Case-insensitive substring of the habitability label.
    #[serde(default, rename = "habitability", skip_serializing_if = "Option::is_none")]
    pub habitability_band: Option<String>,
    /// Case-insensitive substring of the data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort: Option<CatalogSort>,
}

impl CatalogQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn habitability(mut self, band: impl Into<String>) -> Self {
        self.habitability_band = Some(band.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn sorted_by(mut self, sort: CatalogSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether `entry` passes every filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        contains_ci(&entry.name, self.text.as_deref())
            && contains_ci(&entry.habitability, self.habitability_band.as_deref())
            && contains_ci(&entry.source, self.source.as_deref())
    }

    /// True when no filter is set.
    pub fn is_unfiltered(&self) -> bool {
        [&self.text, &self.habitability_band, &self.source]
            .iter()
            .all(|f| f.as_deref().map_or(true, str::is_empty))
    }
}

/// Case-insensitive substring check. A missing or empty needle matches.
pub fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) if n.is_empty() => true,
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Entries that pass `query`, cloned, in fixture order unless a sort is set.
pub fn filter_catalog(entries: &[CatalogEntry], query: &CatalogQuery) -> Vec<CatalogEntry> {
    let mut out: Vec<CatalogEntry> = entries
        .iter()
        .filter(|e| query.matches(e))
        .cloned()
        .collect();
    if let Some(sort) = query.sort {
        sort_catalog(&mut out, sort);
    }
    out
}

/// Stable in-place sort.
pub fn sort_catalog(entries: &mut [CatalogEntry], sort: CatalogSort) {
    match sort {
        CatalogSort::Name => entries.sort_by(|a, b| a.name.cmp(&b.name)),
        CatalogSort::HabitabilityScore => entries.sort_by(|a, b| {
            b.habitability_score
                .partial_cmp(&a.habitability_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        CatalogSort::DiscoveryYear => {
            entries.sort_by_key(|e| std::cmp::Reverse(e.discovery_year_value()))
        }
    }
}

/// A page of catalog results together with the filters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub planets: Vec<CatalogEntry>,
    pub total_count: usize,
    pub filters: CatalogQuery,
}

impl CatalogPage {
    pub fn new(planets: Vec<CatalogEntry>, filters: CatalogQuery) -> Self {
        Self {
            total_count: planets.len(),
            planets,
            filters,
        }
    }
}
