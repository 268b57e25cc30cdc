// File: src/provider/mod.rs
// Purpose: Value provider/storage contracts and the in-memory implementation

use crate::definition::{ValueDefinition, ValueDefinitionProvider};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub mod chain;

/// A raw value handed out by a provider.
///
/// `Lazy` defers the actual fetch (for example one extra query) until the
/// orchestrator needs the value; the closure receives the key it was
/// registered for.
#[derive(Clone)]
pub enum ProvidedValue {
    Plain(Value),
    Lazy(Rc<dyn Fn(&str) -> anyhow::Result<Value>>),
}

impl ProvidedValue {
    pub fn lazy<F>(getter: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Value> + 'static,
    {
        ProvidedValue::Lazy(Rc::new(getter))
    }

    /// Obtain the actual value, invoking the deferred getter if needed
    pub fn resolve(&self, key: &str) -> anyhow::Result<Value> {
        match self {
            ProvidedValue::Plain(value) => Ok(value.clone()),
            ProvidedValue::Lazy(getter) => getter(key),
        }
    }
}

impl fmt::Debug for ProvidedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvidedValue::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            ProvidedValue::Lazy(_) => f.debug_tuple("Lazy").finish(),
        }
    }
}

impl From<Value> for ProvidedValue {
    fn from(value: Value) -> Self {
        ProvidedValue::Plain(value)
    }
}

/// Source of keys and raw values.
///
/// Key order defines iteration and rendering order.
pub trait ValueProvider {
    fn provided_value_keys(&self) -> Vec<String>;

    fn provided_value(&self, key: &str) -> anyhow::Result<Option<ProvidedValue>>;
}

/// Sink for changed values.
///
/// Implementations silently ignore keys outside their own key set and are
/// idempotent: applying the same mapping twice leaves the same state.
pub trait ValueStorage {
    fn save_values(&self, changed: &[(String, Value)]) -> anyhow::Result<()>;
}

/// One data source with its optional capabilities wired explicitly.
///
/// A source always provides values; whether it also resolves definitions or
/// accepts writes is declared here instead of probed at runtime. The handles
/// may all point at one object ([`ValueSource::full`]) or at different ones.
#[derive(Clone)]
pub struct ValueSource {
    provider: Rc<dyn ValueProvider>,
    definitions: Option<Rc<dyn ValueDefinitionProvider>>,
    storage: Option<Rc<dyn ValueStorage>>,
}

impl ValueSource {
    pub fn new(provider: Rc<dyn ValueProvider>) -> Self {
        Self {
            provider,
            definitions: None,
            storage: None,
        }
    }

    /// Wire all three capabilities onto one object
    pub fn full<P>(source: Rc<P>) -> Self
    where
        P: ValueProvider + ValueDefinitionProvider + ValueStorage + 'static,
    {
        Self {
            provider: source.clone(),
            definitions: Some(source.clone()),
            storage: Some(source),
        }
    }

    /// Provider that also resolves its own definitions, no storage
    pub fn providing<P>(source: Rc<P>) -> Self
    where
        P: ValueProvider + ValueDefinitionProvider + 'static,
    {
        Self {
            provider: source.clone(),
            definitions: Some(source),
            storage: None,
        }
    }

    pub fn with_definitions(mut self, definitions: Rc<dyn ValueDefinitionProvider>) -> Self {
        self.definitions = Some(definitions);
        self
    }

    pub fn with_storage(mut self, storage: Rc<dyn ValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn provider(&self) -> &Rc<dyn ValueProvider> {
        &self.provider
    }

    pub fn definitions(&self) -> Option<&Rc<dyn ValueDefinitionProvider>> {
        self.definitions.as_ref()
    }

    pub fn storage(&self) -> Option<&Rc<dyn ValueStorage>> {
        self.storage.as_ref()
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSource")
            .field("definitions", &self.definitions.is_some())
            .field("storage", &self.storage.is_some())
            .finish()
    }
}

/// In-memory provider, definition source, and storage in one.
///
/// Rows keep insertion order. Writes go through interior mutability; like
/// every provider here it is request-scoped and not meant to be shared
/// across threads.
#[derive(Default)]
pub struct MapValueProvider {
    rows: RefCell<Vec<(String, Value)>>,
    definitions: HashMap<String, ValueDefinition>,
}

impl MapValueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a row; a fresh key appends, an existing key keeps
    /// its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        let mut rows = self.rows.borrow_mut();
        match rows.iter_mut().find(|(k, _)| *k == key) {
            Some(row) => row.1 = value,
            None => rows.push((key, value)),
        }
        drop(rows);
        self
    }

    pub fn define(&mut self, key: impl Into<String>, definition: ValueDefinition) -> &mut Self {
        self.definitions.insert(key.into(), definition);
        self
    }

    /// Current value of a key, mainly for assertions in tests
    pub fn value(&self, key: &str) -> Option<Value> {
        self.rows
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl ValueProvider for MapValueProvider {
    fn provided_value_keys(&self) -> Vec<String> {
        self.rows.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    fn provided_value(&self, key: &str) -> anyhow::Result<Option<ProvidedValue>> {
        Ok(self.value(key).map(ProvidedValue::Plain))
    }
}

impl ValueDefinitionProvider for MapValueProvider {
    fn value_definition(&self, key: &str) -> anyhow::Result<Option<ValueDefinition>> {
        Ok(self.definitions.get(key).cloned())
    }
}

impl ValueStorage for MapValueProvider {
    fn save_values(&self, changed: &[(String, Value)]) -> anyhow::Result<()> {
        let mut rows = self.rows.borrow_mut();
        for (key, value) in changed {
            // Unknown keys are ignored
            if let Some(row) = rows.iter_mut().find(|(k, _)| k == key) {
                row.1 = value.clone();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_provider_keeps_order() {
        let mut provider = MapValueProvider::new();
        provider
            .insert("b", 1)
            .insert("a", 2)
            .insert("b", 3);
        assert_eq!(provider.provided_value_keys(), vec!["b", "a"]);
        assert_eq!(provider.value("b"), Some(Value::Int(3)));
    }

    #[test]
    fn test_save_ignores_unknown_keys() {
        let mut provider = MapValueProvider::new();
        provider.insert("known", "old");

        provider
            .save_values(&[
                ("known".to_string(), Value::Text("new".into())),
                ("unknown".to_string(), Value::Int(1)),
            ])
            .unwrap();

        assert_eq!(provider.value("known"), Some(Value::Text("new".into())));
        assert_eq!(provider.value("unknown"), None);
        assert_eq!(provider.provided_value_keys(), vec!["known"]);
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut provider = MapValueProvider::new();
        provider.insert("k", 1);

        let mapping = vec![("k".to_string(), Value::Int(9))];
        provider.save_values(&mapping).unwrap();
        let first = provider.value("k");
        provider.save_values(&mapping).unwrap();
        assert_eq!(provider.value("k"), first);
    }

    #[test]
    fn test_lazy_provided_value() {
        let lazy = ProvidedValue::lazy(|key| Ok(Value::Text(format!("value-for-{key}"))));
        assert_eq!(
            lazy.resolve("x").unwrap(),
            Value::Text("value-for-x".into())
        );
    }
}
