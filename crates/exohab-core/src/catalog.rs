//! Compiled-in reference catalog.

use exohab_logic::catalog::CatalogEntry;

use crate::error::{Result, StoreError};

// ── Reference planets (shared with the simtest harness) ─────────────────
pub const CATALOG_JSON: &str = include_str!("../../../data/exoplanet_catalog.json");

/// Parse the bundled catalog fixture.
pub fn fixture_catalog() -> Result<Vec<CatalogEntry>> {
    parse_catalog(CATALOG_JSON)
}

/// Parse a catalog JSON array, e.g. one fetched from a remote archive.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>> {
    serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
        slot: "catalog".into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_parses() {
        let entries = fixture_catalog().unwrap();
        assert_eq!(entries.len(), 3);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Kepler-186f", "Kepler-442b", "TOI-715 b"]);
        assert_eq!(entries[1].habitability_score, 84.2);
        assert_eq!(entries[2].discovery_year_value(), 2024);
    }

    #[test]
    fn test_ids_unique() {
        let entries = fixture_catalog().unwrap();
        let mut ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn test_parse_catalog_reports_bad_json() {
        assert!(matches!(
            parse_catalog("[{\"id\": 1}]"),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
