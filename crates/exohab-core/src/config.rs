//! Provider selection: local heuristic or remote service, chosen once.

use exohab_logic::catalog::{CatalogPage, CatalogQuery};

use crate::error::{FetchError, PredictionError};
use crate::provider::{LocalHeuristicProvider, PredictionProvider};

/// Default base URL of the remote prediction service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Which prediction backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderMode {
    /// In-process heuristic.
    #[default]
    Local,
    /// HTTP prediction service at `base_url`.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub mode: ProviderMode,
    pub base_url: String,
    /// Seed for the local provider; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Sleep like a model server before answering (local only).
    pub simulate_latency: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::Local,
            base_url: DEFAULT_API_URL.to_string(),
            seed: None,
            simulate_latency: false,
        }
    }
}

impl ProviderConfig {
    /// Read `EXOHAB_API_URL`, `EXOHAB_MOCK_MODE` and `EXOHAB_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("EXOHAB_API_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        // Mock mode stays on unless explicitly switched off.
        if let Some(mock) = lookup("EXOHAB_MOCK_MODE") {
            if mock.trim().eq_ignore_ascii_case("false") {
                config.mode = ProviderMode::Remote;
            }
        }
        if let Some(seed) = lookup("EXOHAB_SEED") {
            match seed.trim().parse() {
                Ok(s) => config.seed = Some(s),
                Err(_) => log::warn!("Ignoring non-numeric EXOHAB_SEED '{}'", seed),
            }
        }
        config
    }
}

/// Build the provider `config` asks for.
pub fn build_provider(
    config: &ProviderConfig,
) -> Result<Box<dyn PredictionProvider>, PredictionError> {
    match config.mode {
        ProviderMode::Local => {
            let provider = match config.seed {
                Some(seed) => LocalHeuristicProvider::seeded(seed),
                None => LocalHeuristicProvider::from_entropy(),
            };
            log::debug!("Using local heuristic provider (seed {:?})", config.seed);
            Ok(Box::new(
                provider.with_simulated_latency(config.simulate_latency),
            ))
        }
        ProviderMode::Remote => remote_provider(config),
    }
}

#[cfg(feature = "remote")]
fn remote_provider(
    config: &ProviderConfig,
) -> Result<Box<dyn PredictionProvider>, PredictionError> {
    log::debug!("Using remote provider at {}", config.base_url);
    Ok(Box::new(crate::remote::RemoteServiceProvider::new(
        config.base_url.clone(),
    )))
}

#[cfg(not(feature = "remote"))]
fn remote_provider(
    _config: &ProviderConfig,
) -> Result<Box<dyn PredictionProvider>, PredictionError> {
    Err(PredictionError::RemoteDisabled)
}

/// Fetch a catalog page from the remote service at `config.base_url`.
#[cfg(feature = "remote")]
pub fn fetch_remote_catalog(
    config: &ProviderConfig,
    query: &CatalogQuery,
) -> Result<CatalogPage, FetchError> {
    crate::remote::RemoteClient::new(config.base_url.clone()).fetch_catalog(query)
}

#[cfg(not(feature = "remote"))]
pub fn fetch_remote_catalog(
    _config: &ProviderConfig,
    _query: &CatalogQuery,
) -> Result<CatalogPage, FetchError> {
    Err(FetchError::RemoteDisabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.mode, ProviderMode::Local);
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_env_overrides() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("EXOHAB_API_URL", "https://exo.example/api"),
            ("EXOHAB_MOCK_MODE", "FALSE"),
            ("EXOHAB_SEED", "1234"),
        ]));
        assert_eq!(config.mode, ProviderMode::Remote);
        assert_eq!(config.base_url, "https://exo.example/api");
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_mock_mode_true_stays_local_and_bad_seed_ignored() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("EXOHAB_MOCK_MODE", "true"),
            ("EXOHAB_SEED", "abc"),
        ]));
        assert_eq!(config.mode, ProviderMode::Local);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_build_local_seeded() {
        let config = ProviderConfig {
            seed: Some(5),
            ..ProviderConfig::default()
        };
        let mut a = build_provider(&config).unwrap();
        let mut b = build_provider(&config).unwrap();
        assert_eq!(a.name(), "local");
        let params = exohab_logic::params::PlanetParameters::mars();
        assert_eq!(a.predict(&params).unwrap(), b.predict(&params).unwrap());
    }

    #[cfg(not(feature = "remote"))]
    #[test]
    fn test_remote_without_feature() {
        let config = ProviderConfig {
            mode: ProviderMode::Remote,
            ..ProviderConfig::default()
        };
        assert!(matches!(
            build_provider(&config),
            Err(PredictionError::RemoteDisabled)
        ));
        assert!(matches!(
            fetch_remote_catalog(&config, &CatalogQuery::default()),
            Err(FetchError::RemoteDisabled)
        ));
    }
}
