// Persisted user configuration over an injected key-value capability
use crate::domain::config::{RendererMode, UserConfiguration};
use std::collections::HashMap;
use std::sync::Arc;

/// Minimal storage capability so the store can run against a real backend,
/// an in-memory map, or nothing at all.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

const CHARTS_COUNT_KEY: &str = "chart_bench_charts_count";
const DATA_POINTS_KEY: &str = "chart_bench_data_points";
const RENDERER_KEY: &str = "chart_bench_renderer";

#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ConfigStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Loads the persisted configuration. Each field falls back to its
    /// default independently when absent or unparseable.
    pub fn load(&self, defaults: &UserConfiguration) -> UserConfiguration {
        let charts_count = self
            .storage
            .get(CHARTS_COUNT_KEY)
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(defaults.charts_count);

        let data_points = self
            .storage
            .get(DATA_POINTS_KEY)
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(defaults.data_points);

        let renderer = self
            .storage
            .get(RENDERER_KEY)
            .and_then(|raw| RendererMode::parse(&raw))
            .unwrap_or(defaults.renderer);

        UserConfiguration {
            charts_count,
            data_points,
            renderer,
        }
    }

    pub fn save(&self, config: &UserConfiguration) {
        self.storage
            .set(CHARTS_COUNT_KEY, &config.charts_count.to_string());
        self.storage
            .set(DATA_POINTS_KEY, &config.data_points.to_string());
        self.storage.set(RENDERER_KEY, config.renderer.as_str());
    }

    pub fn clear(&self) {
        self.storage.remove(CHARTS_COUNT_KEY);
        self.storage.remove(DATA_POINTS_KEY);
        self.storage.remove(RENDERER_KEY);
    }

    /// Reconciles the persisted configuration against page query parameters:
    /// valid parameters win over persisted values, and the result is saved
    /// so the next session starts from it.
    pub fn resolve(
        &self,
        params: &HashMap<String, String>,
        defaults: &UserConfiguration,
    ) -> UserConfiguration {
        let resolved = self.load(defaults).apply_params(params);
        self.save(&resolved);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStorage;

    fn store() -> ConfigStore {
        ConfigStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_load_without_prior_save_returns_defaults() {
        let defaults = UserConfiguration::default();
        assert_eq!(store().load(&defaults), defaults);
    }

    #[test]
    fn test_round_trip() {
        let store = store();
        let defaults = UserConfiguration::default();

        for charts_count in [1, 5, 10] {
            for data_points in crate::domain::config::VALID_DATA_POINTS {
                for renderer in [RendererMode::Canvas, RendererMode::Svg] {
                    let config = UserConfiguration {
                        charts_count,
                        data_points,
                        renderer,
                    };
                    store.save(&config);
                    assert_eq!(store.load(&defaults), config);
                }
            }
        }
    }

    #[test]
    fn test_malformed_values_fall_back_per_field() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CHARTS_COUNT_KEY, "five");
        storage.set(DATA_POINTS_KEY, "10000");
        storage.set(RENDERER_KEY, "webgl");

        let defaults = UserConfiguration::default();
        let loaded = ConfigStore::new(storage).load(&defaults);
        assert_eq!(loaded.charts_count, defaults.charts_count);
        assert_eq!(loaded.data_points, 10_000);
        assert_eq!(loaded.renderer, defaults.renderer);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let store = store();
        let defaults = UserConfiguration::default();
        store.save(&UserConfiguration {
            charts_count: 7,
            data_points: 1_000,
            renderer: RendererMode::Svg,
        });

        store.clear();
        assert_eq!(store.load(&defaults), defaults);
    }

    #[test]
    fn test_resolve_prefers_valid_params_over_persisted() {
        let store = store();
        let defaults = UserConfiguration::default();
        store.save(&UserConfiguration {
            charts_count: 2,
            data_points: 1_000,
            renderer: RendererMode::Canvas,
        });

        let mut params = HashMap::new();
        params.insert("dataPoints".to_string(), "100000".to_string());
        params.insert("charts".to_string(), "999".to_string());

        let resolved = store.resolve(&params, &defaults);
        assert_eq!(resolved.data_points, 100_000);
        // Out-of-range charts param is ignored; the persisted value stands.
        assert_eq!(resolved.charts_count, 2);

        // The reconciled configuration was saved back.
        assert_eq!(store.load(&defaults), resolved);
    }
}
