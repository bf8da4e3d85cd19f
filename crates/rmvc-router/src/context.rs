//! Default context object handed to every controller

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// String-keyed bag of JSON values shared by every dispatch
///
/// This is the router's default context type. Applications that need typed
/// state (a storage handle, configuration) can use their own `Default`
/// type as the router's context parameter instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }

    /// Stores a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Chainable variant of [`Context::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_replace() {
        let mut context = Context::new();
        assert!(context.insert("user", "ada").is_none());
        assert_eq!(context.insert("user", "grace"), Some(json!("ada")));
        assert_eq!(context.get("user"), Some(&json!("grace")));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let context = Context::new().with("count", 3);
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({ "count": 3 }));
    }
}
