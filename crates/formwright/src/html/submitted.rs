// File: src/html/submitted.rs
// Purpose: Opaque carrier for submitted form data

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Submitted form data handed through to the form element.
///
/// Field values are plain strings the way a browser sends them; string
/// values are trimmed on ingest.
#[derive(Debug, Clone, Default)]
pub struct SubmittedData {
    fields: HashMap<String, String>,
}

impl SubmittedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from form fields with automatic trimming
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k, v.trim().to_string()))
            .collect();
        Self { fields }
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = Self::decode(key);
            let value = Self::decode(value);
            fields.insert(key, value.trim().to_string());
        }
        Self { fields }
    }

    /// Extract fields from a JSON object
    pub fn from_json(json: &JsonValue) -> Self {
        let mut fields = HashMap::new();
        if let JsonValue::Object(map) = json {
            for (key, value) in map {
                if let Some(s) = value.as_str() {
                    fields.insert(key.clone(), s.trim().to_string());
                } else {
                    fields.insert(key.clone(), value.to_string());
                }
            }
        }
        Self { fields }
    }

    fn decode(raw: &str) -> String {
        let raw = raw.replace('+', " ");
        urlencoding::decode(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
