//! Session-scoped state handed in by the agent runtime.

use std::collections::HashMap;

/// Key/value state for one conversational session.
///
/// The runtime owns and mutates this; the search tool only ever reads it.
/// Values are JSON so the runtime can stash arbitrary tool state, but the
/// credential path only cares about string values.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: HashMap<String, serde_json::Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value (runtime side; the tool never calls this).
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Look up a string value, treating empty and whitespace-only strings
    /// as absent. Non-string values are also treated as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl<K: Into<String>> FromIterator<(K, serde_json::Value)> for SessionState {
    fn from_iter<T: IntoIterator<Item = (K, serde_json::Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_str_returns_present_value() {
        let mut state = SessionState::new();
        state.insert("temp:auth", json!("tok-123"));
        assert_eq!(state.get_str("temp:auth"), Some("tok-123"));
    }

    #[test]
    fn get_str_treats_empty_as_absent() {
        let mut state = SessionState::new();
        state.insert("temp:auth", json!(""));
        assert_eq!(state.get_str("temp:auth"), None);

        state.insert("temp:auth", json!("   "));
        assert_eq!(state.get_str("temp:auth"), None);
    }

    #[test]
    fn get_str_ignores_non_string_values() {
        let mut state = SessionState::new();
        state.insert("temp:auth", json!({"nested": true}));
        assert_eq!(state.get_str("temp:auth"), None);
    }
}
