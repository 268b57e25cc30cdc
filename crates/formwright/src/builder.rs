// File: src/builder.rs
// Purpose: Orchestrates definition resolution, generation, binding, and persistence

use crate::definition::value_type::{ValueType, ValueTypeFactory, ValueTypeRegistry};
use crate::definition::{ValueDefinition, ValueDefinitionProvider};
use crate::html::control::ButtonControl;
use crate::html::form::{FormElement, FormState};
use crate::html::submitted::SubmittedData;
use crate::promise::{ValueAccess, ValuePromise};
use crate::provider::{ValueSource, ValueStorage};
use crate::representation::generator::{ControlRepresentationGenerator, RepresentationGenerator};
use crate::representation::{InitialValue, Representation, RepresentationFinalizer};
use crate::value::Value;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Which provider keys take part in a build.
pub enum KeyFilter {
    /// Accept every key
    All,
    /// Accept keys matching a pattern
    Pattern(Regex),
    /// Accept keys from a fixed set
    Keys(Vec<String>),
    /// Accept keys passing a predicate
    Predicate(Box<dyn Fn(&str) -> bool>),
}

impl KeyFilter {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyFilter::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        KeyFilter::Predicate(Box::new(predicate))
    }

    pub fn accepts(&self, key: &str) -> bool {
        match self {
            KeyFilter::All => true,
            KeyFilter::Pattern(pattern) => pattern.is_match(key),
            KeyFilter::Keys(keys) => keys.iter().any(|k| k == key),
            KeyFilter::Predicate(predicate) => predicate(key),
        }
    }
}

impl From<Regex> for KeyFilter {
    fn from(pattern: Regex) -> Self {
        KeyFilter::Pattern(pattern)
    }
}

impl From<Vec<String>> for KeyFilter {
    fn from(keys: Vec<String>) -> Self {
        KeyFilter::Keys(keys)
    }
}

/// Everything needed to build the form artifact for one key.
pub struct ResolvedValue {
    pub definition: ValueDefinition,
    pub value_type: Rc<dyn ValueType>,
    pub default_value: ValuePromise,
}

/// Output of one build: the ordered representations and, after a run, the
/// resulting form state.
pub struct BuildResult {
    representations: Vec<Box<dyn Representation>>,
    state: Option<FormState>,
}

impl BuildResult {
    pub fn representations(&self) -> &[Box<dyn Representation>] {
        &self.representations
    }

    pub fn state(&self) -> Option<&FormState> {
        self.state.as_ref()
    }
}

/// Builds data-driven forms over a value source.
///
/// Per-key definition lookups and the value-type registry are cached for
/// the builder's lifetime; replacing the definition provider clears the
/// definition cache. One builder serves one request at a time.
pub struct FormBuilder {
    source: ValueSource,
    definition_provider: Option<Rc<dyn ValueDefinitionProvider>>,
    generator: Rc<dyn RepresentationGenerator>,
    finalizer: Option<Rc<dyn RepresentationFinalizer>>,
    value_storage: Option<Rc<dyn ValueStorage>>,
    types: ValueTypeRegistry,
    definition_cache: RefCell<HashMap<String, Option<ValueDefinition>>>,
}

impl FormBuilder {
    pub fn new(source: ValueSource) -> Self {
        Self {
            source,
            definition_provider: None,
            generator: Rc::new(ControlRepresentationGenerator::with_defaults()),
            finalizer: None,
            value_storage: None,
            types: ValueTypeRegistry::new(),
            definition_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub fn definition_provider(&self) -> Option<&Rc<dyn ValueDefinitionProvider>> {
        self.definition_provider.as_ref()
    }

    /// Replace the standalone definition provider. Clears the definition
    /// cache: cached lookups belong to the provider that answered them.
    pub fn set_definition_provider(
        &mut self,
        provider: Option<Rc<dyn ValueDefinitionProvider>>,
    ) -> &mut Self {
        self.definition_provider = provider;
        self.definition_cache.borrow_mut().clear();
        self
    }

    pub fn set_representation_generator(
        &mut self,
        generator: Rc<dyn RepresentationGenerator>,
    ) -> &mut Self {
        self.generator = generator;
        self
    }

    pub fn set_representation_finalizer(
        &mut self,
        finalizer: Option<Rc<dyn RepresentationFinalizer>>,
    ) -> &mut Self {
        self.finalizer = finalizer;
        self
    }

    /// Install a storage sink distinct from the value source. A distinct
    /// sink receives every submitted key; the source's own storage only
    /// receives changed keys from its key set.
    pub fn set_value_storage(&mut self, storage: Option<Rc<dyn ValueStorage>>) -> &mut Self {
        self.value_storage = storage;
        self
    }

    pub fn add_value_type(&mut self, value_type: Rc<dyn ValueType>) -> &mut Self {
        self.types.add(value_type);
        self
    }

    pub fn add_value_type_factory<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&str) -> Option<Rc<dyn ValueType>> + 'static,
    {
        self.types.add_factory(name, factory);
        self
    }

    pub fn add_value_types(&mut self, factory: &dyn ValueTypeFactory) -> &mut Self {
        self.types.add_all(factory);
        self
    }

    pub fn remove_value_type(&mut self, name: &str) -> &mut Self {
        self.types.remove(name);
        self
    }

    pub fn value_type(&self, name: &str) -> Option<Rc<dyn ValueType>> {
        self.types.get(name)
    }

    /// Definition for a key, cached after the first lookup.
    ///
    /// The source's own definitions win over the standalone provider; a
    /// miss from both is cached too so neither is asked again.
    pub fn definition(&self, key: &str) -> anyhow::Result<Option<ValueDefinition>> {
        if let Some(cached) = self.definition_cache.borrow().get(key) {
            return Ok(cached.clone());
        }

        let mut definition = None;
        if let Some(definitions) = self.source.definitions() {
            definition = definitions.value_definition(key)?;
        }
        if definition.is_none() {
            if let Some(provider) = &self.definition_provider {
                definition = provider.value_definition(key)?;
            }
        }

        self.definition_cache
            .borrow_mut()
            .insert(key.to_string(), definition.clone());
        Ok(definition)
    }

    /// Raw provider value for a key, invoking a lazy getter when needed
    pub fn value(&self, key: &str) -> anyhow::Result<Option<Value>> {
        match self.source.provider().provided_value(key)? {
            Some(provided) => Ok(Some(provided.resolve(key)?)),
            None => Ok(None),
        }
    }

    /// Resolve everything needed to represent one key.
    ///
    /// A key without a definition is simply not handled. A definition whose
    /// value type is unregistered is a configuration gap: logged, and the
    /// key is skipped without failing the build.
    pub fn resolve_value(&self, key: &str) -> anyhow::Result<Option<ResolvedValue>> {
        let Some(definition) = self.definition(key)? else {
            return Ok(None);
        };

        let Some(value_type) = self.types.get(definition.value_type()) else {
            tracing::warn!(
                key,
                value_type = definition.value_type(),
                "no value type registered for definition, skipping key"
            );
            return Ok(None);
        };

        let provider = self.source.provider().clone();
        let promise_type = value_type.clone();
        let promise_key = key.to_string();
        let options = definition.options();
        let default_value = ValuePromise::new(move |access| {
            let raw = match provider.provided_value(&promise_key)? {
                Some(provided) => Some(provided.resolve(&promise_key)?),
                None => None,
            };
            Ok(match access {
                ValueAccess::Raw => raw,
                ValueAccess::Converted => {
                    raw.and_then(|value| promise_type.to_value(&value, options))
                }
            })
        });

        Ok(Some(ResolvedValue {
            definition,
            value_type,
            default_value,
        }))
    }

    /// Build the form for the provider's values and bind it to the element.
    pub fn build(
        &self,
        element: &mut FormElement,
        filter: &KeyFilter,
    ) -> anyhow::Result<BuildResult> {
        let mut representations: Vec<Box<dyn Representation>> = Vec::new();

        for key in self.source.provider().provided_value_keys() {
            if !filter.accepts(&key) {
                continue;
            }
            let Some(resolved) = self.resolve_value(&key)? else {
                continue;
            };
            let generated = self.generator.generate(
                &key,
                &resolved.definition,
                resolved.value_type.as_ref(),
                resolved.default_value,
            )?;
            representations.extend(generated);
        }

        if !representations.is_empty() {
            representations = match &self.finalizer {
                Some(finalizer) => finalizer.finalize(representations),
                None => self.generator.finalize(representations),
            };

            for representation in &representations {
                representation.attach(element);
            }
        }

        tracing::debug!(
            representations = representations.len(),
            "form build complete"
        );

        Ok(BuildResult {
            representations,
            state: None,
        })
    }

    /// Build, then run the form against a submission.
    ///
    /// A valid submission persists changed values; an untouched form is
    /// prefilled from the providers; anything else is left for the caller
    /// to inspect on the result.
    pub fn build_and_run(
        &self,
        element: &mut FormElement,
        request: &SubmittedData,
        action_name: &str,
        filter: &KeyFilter,
    ) -> anyhow::Result<BuildResult> {
        let mut result = self.build(element, filter)?;
        element.set_action_control(ButtonControl::new(action_name));

        let state = match element.prepare_with_request(request) {
            FormState::Valid => self.persist(element)?,
            FormState::Untouched => {
                self.prefill(element, &result)?;
                FormState::Untouched
            }
            other => other,
        };

        result.state = Some(state);
        Ok(result)
    }

    /// Convert the submitted values back to scalars and write the changes.
    ///
    /// Conversion failures become field errors and demote the state to
    /// invalid; nothing is persisted in that case.
    fn persist(&self, element: &FormElement) -> anyhow::Result<FormState> {
        let Some((storage, diff_against_source)) = self.storage_binding() else {
            return Ok(FormState::Valid);
        };

        let source_keys = if diff_against_source {
            Some(self.source.provider().provided_value_keys())
        } else {
            None
        };

        // Walk the element's controls so the write order follows bind order
        let data = element.data();
        let mut changed = Vec::new();
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();

        for handle in element.controls() {
            let key = handle.borrow().name().to_string();
            let Some(value) = data.get(&key) else {
                continue;
            };
            let Some(definition) = self.definition(&key)? else {
                tracing::warn!(key = %key, "submitted key has no definition, not persisting");
                continue;
            };
            let Some(value_type) = self.types.get(definition.value_type()) else {
                continue;
            };

            match value_type.to_scalar(value, definition.options()) {
                Ok(scalar) => {
                    if let Some(keys) = &source_keys {
                        if !keys.iter().any(|k| k == &key) {
                            continue;
                        }
                        // Skip unchanged values to avoid redundant writes
                        if self.value(&key)?.as_ref() == Some(&scalar) {
                            continue;
                        }
                    }
                    changed.push((key, scalar));
                }
                Err(error) => {
                    field_errors
                        .entry(key)
                        .or_default()
                        .push(error.message().to_string());
                }
            }
        }

        if !field_errors.is_empty() {
            return Ok(FormState::Invalid(field_errors));
        }

        tracing::debug!(changed = changed.len(), "persisting form values");
        storage.save_values(&changed)?;
        Ok(FormState::Valid)
    }

    /// Push every representation's initial value into the element as
    /// prefill data, flattening map-valued initials key-by-key
    fn prefill(&self, element: &mut FormElement, result: &BuildResult) -> anyhow::Result<()> {
        let mut contents = HashMap::new();
        for representation in &result.representations {
            let Some(name) = representation.name() else {
                continue;
            };
            match representation.initial_value()? {
                Some(InitialValue::Single(value)) => {
                    contents.insert(name, value);
                }
                Some(InitialValue::Map(pairs)) => {
                    contents.extend(pairs);
                }
                None => {
                    contents.insert(name, Value::Null);
                }
            }
        }
        element.set_data(contents);
        Ok(())
    }

    /// The storage to write to, and whether writes should be restricted to
    /// the source's keys and diff-checked against its current values
    fn storage_binding(&self) -> Option<(Rc<dyn ValueStorage>, bool)> {
        if let Some(sink) = &self.value_storage {
            return Some((sink.clone(), false));
        }
        self.source
            .storage()
            .map(|storage| (storage.clone(), true))
    }
}
