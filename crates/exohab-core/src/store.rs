//! Planet catalog search and the persisted saved-planet collection.
//!
//! The saved collection lives in one [`SAVED_PLANETS_SLOT`] of a
//! [`KeyValueStore`] as a JSON array. Every operation loads the whole array
//! and, when mutating, writes the whole array back, so a `list()` right after
//! a `save()` or `delete()` always observes the change.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use exohab_logic::catalog::{filter_catalog, CatalogEntry, CatalogPage, CatalogQuery};

use crate::catalog::fixture_catalog;
use crate::error::{Result, StoreError};
use crate::persistence::{load_json, store_json, KeyValueStore, SAVED_PLANETS_SLOT};
use crate::record::{NewPlanetRecord, SavedPlanetRecord, SavedStats, SavedView};

/// File name used when exporting the saved collection.
pub const EXPORT_FILE_NAME: &str = "saved_exoplanets.json";

/// Read-only catalog plus the user's saved planets.
pub struct PlanetCatalogStore<S> {
    catalog: Vec<CatalogEntry>,
    backend: S,
    /// Highest id handed out by this instance.
    last_id: i64,
}

impl<S: KeyValueStore> PlanetCatalogStore<S> {
    /// Store over the bundled reference catalog.
    pub fn new(backend: S) -> Result<Self> {
        Ok(Self::with_catalog(backend, fixture_catalog()?))
    }

    /// Store over a caller-supplied catalog.
    pub fn with_catalog(backend: S, catalog: Vec<CatalogEntry>) -> Self {
        Self {
            catalog,
            backend,
            last_id: 0,
        }
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    // ========================================================================
    // CATALOG
    // ========================================================================

    /// Catalog entries passing `query`, in catalog order unless a sort is set.
    pub fn search(&self, query: &CatalogQuery) -> Vec<CatalogEntry> {
        let out = filter_catalog(&self.catalog, query);
        log::debug!("Catalog search {:?} -> {} entries", query, out.len());
        out
    }

    /// [`search`](Self::search) wrapped with its count and filters.
    pub fn search_page(&self, query: &CatalogQuery) -> CatalogPage {
        CatalogPage::new(self.search(query), query.clone())
    }

    // ========================================================================
    // SAVED COLLECTION
    // ========================================================================

    /// All saved records in storage order.
    pub fn list(&self) -> Result<Vec<SavedPlanetRecord>> {
        load_json(&self.backend, SAVED_PLANETS_SLOT)
    }

    pub fn get(&self, id: i64) -> Result<Option<SavedPlanetRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Persist a new record and return it as stored.
    ///
    /// Ids are millisecond timestamps, bumped past the highest id already in
    /// use so rapid saves never collide.
    pub fn save(&mut self, new: NewPlanetRecord) -> Result<SavedPlanetRecord> {
        let mut records = self.list()?;
        let now = Utc::now();
        let id = self.next_id(&records, now.timestamp_millis());

        let custom_prediction = new.is_custom_prediction();
        let name = match new.name {
            Some(name) if !name.trim().is_empty() => name,
            _ if custom_prediction => format!("Custom Planet {}", id),
            _ => format!("Planet {}", id),
        };

        let record = SavedPlanetRecord {
            id,
            name,
            saved_at: truncate_to_millis(now),
            custom_prediction,
            planet: new.planet,
        };

        records.push(record.clone());
        store_json(&mut self.backend, SAVED_PLANETS_SLOT, &records)?;
        log::info!("Saved planet '{}' (id {})", record.name, record.id);
        Ok(record)
    }

    /// Save a reference catalog planet under its catalog name.
    pub fn save_catalog_entry(&mut self, entry: &CatalogEntry) -> Result<SavedPlanetRecord> {
        self.save(NewPlanetRecord::from_catalog(entry))
    }

    /// Remove the record with `id`. A missing id is a no-op.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            log::debug!("Delete of unknown planet id {} ignored", id);
            return Ok(());
        }
        store_json(&mut self.backend, SAVED_PLANETS_SLOT, &records)?;
        log::info!("Deleted planet id {}", id);
        Ok(())
    }

    /// The whole saved collection as a pretty-printed JSON array.
    pub fn export_all(&self) -> Result<Vec<u8>> {
        let records = self.list()?;
        Ok(serde_json::to_vec_pretty(&records)?)
    }

    /// Write [`export_all`](Self::export_all) to `dir/saved_exoplanets.json`.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, self.export_all()?)?;
        log::info!("Exported saved planets to {}", path.display());
        Ok(path)
    }

    /// Append records from a previous export, skipping ids already present.
    ///
    /// Returns how many records were added.
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<usize> {
        let incoming: Vec<SavedPlanetRecord> =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt {
                slot: EXPORT_FILE_NAME.into(),
                reason: e.to_string(),
            })?;

        let mut records = self.list()?;
        let mut added = 0;
        for rec in incoming {
            if records.iter().any(|r| r.id == rec.id) {
                log::warn!("Import skipped duplicate planet id {}", rec.id);
                continue;
            }
            self.last_id = self.last_id.max(rec.id);
            records.push(rec);
            added += 1;
        }
        if added > 0 {
            store_json(&mut self.backend, SAVED_PLANETS_SLOT, &records)?;
        }
        log::info!("Imported {} saved planets", added);
        Ok(added)
    }

    /// Saved records filtered and ordered for display.
    pub fn view(&self, view: &SavedView) -> Result<Vec<SavedPlanetRecord>> {
        Ok(view.apply(&self.list()?))
    }

    pub fn stats(&self) -> Result<SavedStats> {
        Ok(SavedStats::compute(&self.list()?))
    }

    fn next_id(&mut self, existing: &[SavedPlanetRecord], now_ms: i64) -> i64 {
        let floor = existing
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        let id = if now_ms > floor { now_ms } else { floor + 1 };
        self.last_id = id;
        id
    }
}

fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}
