// Key-value storage backends for the configuration store
use crate::application::config_store::KeyValueStorage;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Process-local storage for tests and environments with no durable backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.lock().unwrap().remove(key);
    }
}

/// Flat JSON map on disk. Read and write failures degrade to an empty map
/// and dropped writes; storage being unavailable must never break callers.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed storage file");
                HashMap::new()
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(map) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize storage map");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist storage map");
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chart_bench_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("a"), None);

        storage.set("a", "1");
        assert_eq!(storage.get("a"), Some("1".to_string()));

        storage.remove("a");
        assert_eq!(storage.get("a"), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let path = temp_path("round_trip");
        let storage = JsonFileStorage::new(path.clone());

        storage.set("charts", "5");
        storage.set("renderer", "svg");
        assert_eq!(storage.get("charts"), Some("5".to_string()));
        assert_eq!(storage.get("renderer"), Some("svg".to_string()));

        storage.remove("charts");
        assert_eq!(storage.get("charts"), None);
        assert_eq!(storage.get("renderer"), Some("svg".to_string()));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let storage = JsonFileStorage::new(temp_path("does_not_exist"));
        assert_eq!(storage.get("anything"), None);
    }

    #[test]
    fn test_malformed_file_reads_as_empty() {
        let path = temp_path("malformed");
        fs::write(&path, "not json {").unwrap();

        let storage = JsonFileStorage::new(path.clone());
        assert_eq!(storage.get("anything"), None);

        // Writes still work, replacing the malformed content.
        storage.set("a", "1");
        assert_eq!(storage.get("a"), Some("1".to_string()));

        let _ = fs::remove_file(path);
    }
}
