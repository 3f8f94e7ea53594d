//! Scene persistence
//!
//! The scene is serialized after every mutation under a single fixed key in
//! a key-value store. The record layout is part of the external contract:
//!
//! ```json
//! { "_scale": 80.0, "_offset": [0.0, 0.0], "circles": [[0.0, 0.0, 1.0], [0.0, 0.0]] }
//! ```
//!
//! Loading is forgiving: a missing key, an unreadable store, or content
//! that does not parse leaves the caller on the built-in default scene.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use zirkel_core::{Scene, Shape};

/// The fixed key the scene record is stored under.
pub const STATE_KEY: &str = "geometry-state";

/// Store access error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A minimal key-value store seam; the transport behind it is an external
/// concern.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write `value` under `key`, overwriting any prior value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store over a shared map; clones observe the same contents,
/// which lets tests inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the OS-standard data directory.
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zirkel");
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// The persisted record. Field names are fixed for compatibility with
/// previously saved scenes.
#[derive(Debug, Serialize, Deserialize)]
struct SceneRecord {
    #[serde(rename = "_scale")]
    scale: f32,
    #[serde(rename = "_offset")]
    offset: Vec2,
    circles: Vec<Shape>,
}

/// Serializes the scene into a key-value store.
pub struct SceneStore {
    store: Box<dyn KeyValueStore>,
}

impl SceneStore {
    /// Wrap a key-value store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Overwrite the stored record with the scene's current state.
    ///
    /// Failures are logged and swallowed; persistence must never take the
    /// editor down.
    pub fn save(&mut self, scene: &Scene) {
        let record = SceneRecord {
            scale: scene.view().scale(),
            offset: scene.view().offset(),
            circles: scene.entries().iter().map(|e| e.shape.clone()).collect(),
        };

        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.store.set(STATE_KEY, &json) {
                    warn!("cannot save {STATE_KEY}: {e}");
                }
            }
            Err(e) => warn!("cannot serialize scene: {e}"),
        }
    }

    /// Read back the stored record, if a usable one exists.
    pub fn load(&self) -> Option<(f32, Vec2, Vec<Shape>)> {
        let json = match self.store.get(STATE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                info!("no saved scene, starting from defaults");
                return None;
            }
            Err(e) => {
                warn!("cannot load {STATE_KEY}: {e}");
                return None;
            }
        };

        match serde_json::from_str::<SceneRecord>(&json) {
            Ok(record) => {
                info!("loaded scene with {} shape(s)", record.circles.len());
                Some((record.scale, record.offset, record.circles))
            }
            Err(e) => {
                warn!("cannot load {STATE_KEY}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        // Clones share contents.
        let clone = store.clone();
        assert_eq!(clone.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert!(store.get(STATE_KEY).unwrap().is_none());
        store.set(STATE_KEY, "{}").unwrap();
        assert_eq!(store.get(STATE_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let backing = MemoryStore::new();
        let mut adapter = SceneStore::new(backing.clone());

        let mut scene = Scene::default();
        scene.commit(Shape::circle(Vec2::new(6.0, 0.0), 5.0, Some("red".into())));
        scene.set_scale(120.0);
        scene.move_offset(Vec2::new(1.5, -2.0));
        adapter.save(&scene);

        let (scale, offset, shapes) = adapter.load().unwrap();
        assert_abs_diff_eq!(scale, 120.0, epsilon = 1e-5);
        assert_abs_diff_eq!(offset.x, 1.5, epsilon = 1e-5);
        assert_abs_diff_eq!(offset.y, -2.0, epsilon = 1e-5);
        assert_eq!(shapes.len(), scene.entries().len());
        for (shape, entry) in shapes.iter().zip(scene.entries()) {
            assert_eq!(shape, &entry.shape);
        }
    }

    #[test]
    fn test_record_field_names_are_fixed() {
        let backing = MemoryStore::new();
        let mut adapter = SceneStore::new(backing.clone());
        adapter.save(&Scene::default());

        let json = backing.get(STATE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("_scale").is_some());
        assert_eq!(value["_offset"], serde_json::json!([0.0, 0.0]));
        // Default scene: unit circle at the origin, then the origin point.
        assert_eq!(value["circles"][0], serde_json::json!([0.0, 0.0, 1.0]));
        assert_eq!(value["circles"][1], serde_json::json!([0.0, 0.0]));
    }

    #[test]
    fn test_load_rejects_corrupt_content() {
        let mut backing = MemoryStore::new();
        backing.set(STATE_KEY, "{ not json").unwrap();
        assert!(SceneStore::new(backing).load().is_none());

        let mut backing = MemoryStore::new();
        backing.set(STATE_KEY, r#"{"_scale": "not a number"}"#).unwrap();
        assert!(SceneStore::new(backing).load().is_none());
    }

    #[test]
    fn test_load_missing_key_is_none() {
        assert!(SceneStore::new(MemoryStore::new()).load().is_none());
    }
}
