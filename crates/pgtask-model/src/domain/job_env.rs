use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Environment handed to the removal worker container.
///
/// Stored as an ordered list of key–value pairs and serialized as a plain array, which is the shape the job execution environment expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobEnv(Vec<KeyValue>);

impl JobEnv {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .map(|kv| kv.value())
    }

    /// Append a key–value pair.
    ///
    /// Later entries shadow earlier ones when queried via [`JobEnv::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, value));
    }

    /// Builder-style [`JobEnv::push`].
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.push(key, value);
        self
    }
}
