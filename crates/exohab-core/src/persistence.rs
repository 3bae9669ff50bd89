//! Key-value persistence for saved planets and user settings.
//!
//! Each slot holds one JSON document and is always read and written whole.
//! Two backends: [`MemoryStore`] for tests and throwaway sessions, and
//! [`JsonFileStore`] which keeps one `<slot>.json` file per slot in a
//! directory.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Slot holding the JSON array of saved planet records.
pub const SAVED_PLANETS_SLOT: &str = "savedExoplanets";
/// Slot holding the user's display preferences.
pub const PREFERENCES_SLOT: &str = "exoplanet_preferences";
/// Slot holding recent catalog searches.
pub const RECENT_SEARCHES_SLOT: &str = "exoplanet_recent_searches";

/// Named slots of text, loaded and stored wholesale.
pub trait KeyValueStore {
    /// Contents of `slot`, or `None` if it was never written.
    fn load(&self, slot: &str) -> Result<Option<String>>;
    /// Replace the contents of `slot`.
    fn store(&mut self, slot: &str, value: &str) -> Result<()>;
    /// Drop `slot`. Removing a missing slot is not an error.
    fn remove(&mut self, slot: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        (**self).load(slot)
    }
    fn store(&mut self, slot: &str, value: &str) -> Result<()> {
        (**self).store(slot, value)
    }
    fn remove(&mut self, slot: &str) -> Result<()> {
        (**self).remove(slot)
    }
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn store(&mut self, slot: &str, value: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<()> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Directory of `<slot>.json` files.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write leaves the previous contents in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Corrupt {
                slot: slot.to_string(),
                reason: "slot names may only contain letters, digits, '_' and '-'".into(),
            });
        }
        Ok(self.root.join(format!("{}.json", slot)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&mut self, slot: &str, value: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote slot '{}' ({} bytes)", slot, value.len());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Parse a JSON slot into `T`, treating a missing slot as `T::default()`.
pub(crate) fn load_json<T, S>(backend: &S, slot: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match backend.load(slot)? {
        None => Ok(T::default()),
        Some(text) if text.trim().is_empty() => Ok(T::default()),
        Some(text) => serde_json::from_str(&text).map_err(|e| {
            log::warn!("Slot '{}' could not be parsed: {}", slot, e);
            StoreError::Corrupt {
                slot: slot.to_string(),
                reason: e.to_string(),
            }
        }),
    }
}

/// Serialize `value` and store it in `slot`.
pub(crate) fn store_json<T, S>(backend: &mut S, slot: &str, value: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    backend.store(slot, &text)
}
