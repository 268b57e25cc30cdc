// File: src/provider/chain.rs
// Purpose: Aggregate several value sources behind one provider facade

use crate::definition::{ValueDefinition, ValueDefinitionProvider};
use crate::provider::{ProvidedValue, ValueProvider, ValueSource, ValueStorage};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

struct Routing {
    /// Keys in exposure order: first occurrence across sources, sources in
    /// registration order
    order: Vec<String>,
    /// Key to index of the owning source
    owner: HashMap<String, usize>,
}

/// Routes each key to the first registered source that declares it.
///
/// A key declared by an earlier source shadows the same key from a later
/// one. The routing table is built lazily on first use and rebuilt on the
/// next use after any source is added or removed.
#[derive(Default)]
pub struct ChainValueProvider {
    sources: Vec<ValueSource>,
    routing: RefCell<Option<Routing>>,
}

impl ChainValueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sources(sources: Vec<ValueSource>) -> Self {
        Self {
            sources,
            routing: RefCell::new(None),
        }
    }

    pub fn add_source(&mut self, source: ValueSource) -> &mut Self {
        self.sources.push(source);
        self.routing.replace(None);
        self
    }

    /// Remove a source by provider identity; true when something was removed
    pub fn remove_source(&mut self, provider: &Rc<dyn ValueProvider>) -> bool {
        let before = self.sources.len();
        self.sources
            .retain(|source| !Rc::ptr_eq(source.provider(), provider));
        if self.sources.len() != before {
            self.routing.replace(None);
            true
        } else {
            false
        }
    }

    pub fn has_source(&self, provider: &Rc<dyn ValueProvider>) -> bool {
        self.sources
            .iter()
            .any(|source| Rc::ptr_eq(source.provider(), provider))
    }

    fn ensure_routing(&self) {
        let mut routing = self.routing.borrow_mut();
        if routing.is_some() {
            return;
        }
        let mut order = Vec::new();
        let mut owner = HashMap::new();
        for (index, source) in self.sources.iter().enumerate() {
            for key in source.provider().provided_value_keys() {
                if !owner.contains_key(&key) {
                    owner.insert(key.clone(), index);
                    order.push(key);
                }
            }
        }
        *routing = Some(Routing { order, owner });
    }

    fn owner_of(&self, key: &str) -> Option<usize> {
        self.ensure_routing();
        self.routing
            .borrow()
            .as_ref()
            .and_then(|routing| routing.owner.get(key).copied())
    }
}

impl ValueProvider for ChainValueProvider {
    fn provided_value_keys(&self) -> Vec<String> {
        self.ensure_routing();
        self.routing
            .borrow()
            .as_ref()
            .map(|routing| routing.order.clone())
            .unwrap_or_default()
    }

    fn provided_value(&self, key: &str) -> anyhow::Result<Option<ProvidedValue>> {
        match self.owner_of(key) {
            Some(index) => self.sources[index].provider().provided_value(key),
            None => Ok(None),
        }
    }
}

impl ValueDefinitionProvider for ChainValueProvider {
    fn value_definition(&self, key: &str) -> anyhow::Result<Option<ValueDefinition>> {
        let Some(index) = self.owner_of(key) else {
            return Ok(None);
        };
        match self.sources[index].definitions() {
            Some(definitions) => definitions.value_definition(key),
            None => Ok(None),
        }
    }
}

impl ValueStorage for ChainValueProvider {
    fn save_values(&self, changed: &[(String, Value)]) -> anyhow::Result<()> {
        self.ensure_routing();

        // Partition by owning source; BTreeMap keeps registration order
        let mut partitions: BTreeMap<usize, Vec<(String, Value)>> = BTreeMap::new();
        for (key, value) in changed {
            if let Some(index) = self.owner_of(key) {
                partitions
                    .entry(index)
                    .or_default()
                    .push((key.clone(), value.clone()));
            }
        }

        for (index, values) in partitions {
            match self.sources[index].storage() {
                Some(storage) => storage.save_values(&values)?,
                None => {
                    tracing::debug!(
                        source = index,
                        keys = values.len(),
                        "dropping values owned by a storage-less source"
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MapValueProvider;
    use pretty_assertions::assert_eq;

    fn provider_with(rows: &[(&str, i64)]) -> Rc<MapValueProvider> {
        let mut provider = MapValueProvider::new();
        for (key, value) in rows {
            provider.insert(*key, *value);
        }
        Rc::new(provider)
    }

    #[test]
    fn test_first_registered_source_wins() {
        let first = provider_with(&[("shared", 1), ("a", 10)]);
        let second = provider_with(&[("shared", 2), ("b", 20)]);

        let mut chain = ChainValueProvider::new();
        chain
            .add_source(ValueSource::full(first))
            .add_source(ValueSource::full(second));

        assert_eq!(chain.provided_value_keys(), vec!["shared", "a", "b"]);
        let value = chain
            .provided_value("shared")
            .unwrap()
            .unwrap()
            .resolve("shared")
            .unwrap();
        assert_eq!(value, Value::Int(1));
    }

    #[test]
    fn test_save_partitions_by_owner() {
        let first = provider_with(&[("a", 1)]);
        let second = provider_with(&[("b", 2)]);

        let mut chain = ChainValueProvider::new();
        chain
            .add_source(ValueSource::full(first.clone()))
            .add_source(ValueSource::full(second.clone()));

        chain
            .save_values(&[
                ("b".to_string(), Value::Int(22)),
                ("a".to_string(), Value::Int(11)),
                ("nobody".to_string(), Value::Int(0)),
            ])
            .unwrap();

        // Each source received exactly its own subset
        assert_eq!(first.value("a"), Some(Value::Int(11)));
        assert_eq!(first.value("b"), None);
        assert_eq!(second.value("b"), Some(Value::Int(22)));
        assert_eq!(second.value("a"), None);
        assert_eq!(second.value("nobody"), None);
    }

    #[test]
    fn test_routing_rebuilds_after_add() {
        let first = provider_with(&[("a", 1)]);
        let mut chain = ChainValueProvider::new();
        chain.add_source(ValueSource::full(first));
        assert_eq!(chain.provided_value_keys(), vec!["a"]);

        let second = provider_with(&[("b", 2)]);
        chain.add_source(ValueSource::full(second));
        assert_eq!(chain.provided_value_keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_source_by_identity() {
        let first = provider_with(&[("a", 1)]);
        let second = provider_with(&[("b", 2)]);

        let mut chain = ChainValueProvider::new();
        chain
            .add_source(ValueSource::full(first.clone()))
            .add_source(ValueSource::full(second));

        let handle: Rc<dyn ValueProvider> = first;
        assert!(chain.has_source(&handle));
        assert!(chain.remove_source(&handle));
        assert!(!chain.has_source(&handle));
        assert_eq!(chain.provided_value_keys(), vec!["b"]);
    }

    #[test]
    fn test_definition_from_owner_only() {
        use crate::definition::ValueDefinition;

        let mut first = MapValueProvider::new();
        first.insert("k", 1);
        first.define("k", ValueDefinition::new("string", 0));
        let first = Rc::new(first);

        let mut second = MapValueProvider::new();
        second.insert("k", 2);
        second.define("k", ValueDefinition::new("other", 0));
        let second = Rc::new(second);

        let mut chain = ChainValueProvider::new();
        chain
            .add_source(ValueSource::full(first))
            .add_source(ValueSource::full(second));

        let definition = chain.value_definition("k").unwrap().unwrap();
        assert_eq!(definition.value_type(), "string");
    }
}
