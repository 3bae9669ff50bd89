//! ExoHab Core - habitability predictions and the saved-planet store
//!
//! Wraps the pure scoring and catalog rules from `exohab_logic` with the
//! pieces that hold state or touch the outside world:
//! - **Providers**: turn parameters into predictions, either in-process with
//!   an owned RNG or through a remote HTTP service (`remote` feature)
//! - **Persistence**: named JSON slots behind the [`persistence::KeyValueStore`]
//!   trait, in memory or as files in a directory
//! - **Store**: catalog search plus the saved-planet collection
//!
//! # Example
//!
//! ```rust,no_run
//! use exohab_core::prelude::*;
//!
//! let mut provider = LocalHeuristicProvider::from_entropy();
//! let params = PlanetParameters::earth();
//! let prediction = provider.predict(&params).unwrap();
//!
//! let mut store = PlanetCatalogStore::new(JsonFileStore::open(".exohab").unwrap()).unwrap();
//! store.save(NewPlanetRecord::custom(params, prediction)).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod preferences;
pub mod provider;
pub mod record;
#[cfg(feature = "remote")]
pub mod remote;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{build_provider, ProviderConfig, ProviderMode};
    pub use crate::error::{FetchError, PredictionError, StoreError};
    pub use crate::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    pub use crate::provider::{LocalHeuristicProvider, PredictionProvider};
    pub use crate::record::{
        CatalogSnapshot, CustomPlanet, NewPlanetRecord, SavedPlanet, SavedPlanetRecord, SavedSort,
        SavedStats, SavedView,
    };
    pub use crate::store::PlanetCatalogStore;
    pub use exohab_logic::catalog::{CatalogEntry, CatalogQuery, CatalogSort};
    pub use exohab_logic::classification::Classification;
    pub use exohab_logic::params::PlanetParameters;
    pub use exohab_logic::prediction::HabitabilityPrediction;
}
