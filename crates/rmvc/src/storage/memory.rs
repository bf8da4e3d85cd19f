//! Instance-local storage adaptor

use std::collections::HashMap;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::storage::StorageAdaptor;
use crate::Model;

/// Keeps saved models inside the adaptor itself
///
/// Fast but non-persistent: everything is lost when the adaptor is dropped.
#[derive(Debug, Clone, Default)]
pub struct InstanceStorageAdaptor {
    models: HashMap<String, Map<String, Value>>,
}

impl InstanceStorageAdaptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved models
    pub fn size(&self) -> usize {
        self.models.len()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.models.remove(key).is_some()
    }
}

impl StorageAdaptor for InstanceStorageAdaptor {
    fn save(&mut self, model: &Model) -> Result<()> {
        self.models
            .insert(model.key().to_string(), model.data().clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Model>> {
        Ok(self
            .models
            .get(key)
            .map(|data| Model::with_key(key, data.clone())))
    }

    fn name(&self) -> &'static str {
        "instance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_and_load() {
        let mut adaptor = InstanceStorageAdaptor::new();
        let mut model = Model::new();
        model.set("title", "draft");

        adaptor.save(&model).unwrap();

        let loaded = adaptor.load(model.key()).unwrap().unwrap();
        assert_eq!(loaded.key(), model.key());
        assert_eq!(loaded.get("title"), Some(&json!("draft")));
        assert_eq!(adaptor.size(), 1);
    }

    #[test]
    fn test_missing_key_loads_nothing() {
        let adaptor = InstanceStorageAdaptor::new();
        assert!(adaptor.load("nope").unwrap().is_none());
        assert_eq!(adaptor.name(), "instance");
    }

    #[test]
    fn test_save_overwrites() {
        let mut adaptor = InstanceStorageAdaptor::new();
        let mut model = Model::new();
        model.set("v", 1);
        adaptor.save(&model).unwrap();
        model.set("v", 2);
        adaptor.save(&model).unwrap();

        assert_eq!(adaptor.size(), 1);
        let loaded = adaptor.load(model.key()).unwrap().unwrap();
        assert_eq!(loaded.get("v"), Some(&json!(2)));
        assert!(adaptor.remove(model.key()));
    }
}
