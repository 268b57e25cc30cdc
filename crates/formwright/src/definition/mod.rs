// File: src/definition/mod.rs
// Purpose: Per-key metadata describing how a value is typed and presented

use crate::validation::Validator;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

pub mod value_type;

/// Source of enumerable candidate values for selection controls.
///
/// Sequences are finite and restartable: every call to `entries` yields a
/// fresh copy of the full list.
pub trait ListProvider {
    fn entries(&self) -> Vec<(Value, String)>;
}

/// List provider zipping a value column and a label column.
///
/// Missing labels fall back to the value's display string.
pub struct PairListProvider {
    values: Vec<Value>,
    labels: Vec<String>,
}

impl PairListProvider {
    pub fn new(values: Vec<Value>, labels: Vec<String>) -> Self {
        Self { values, labels }
    }
}

impl ListProvider for PairListProvider {
    fn entries(&self) -> Vec<(Value, String)> {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let label = self
                    .labels
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| value.to_display_string());
                (value.clone(), label)
            })
            .collect()
    }
}

/// Candidate values attached to a definition or contributed by a value type.
#[derive(Clone)]
pub enum AvailableValues {
    Inline(Vec<(Value, String)>),
    Provider(Rc<dyn ListProvider>),
}

impl AvailableValues {
    pub fn entries(&self) -> Vec<(Value, String)> {
        match self {
            AvailableValues::Inline(entries) => entries.clone(),
            AvailableValues::Provider(provider) => provider.entries(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl fmt::Debug for AvailableValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailableValues::Inline(entries) => {
                f.debug_tuple("Inline").field(&entries.len()).finish()
            }
            AvailableValues::Provider(_) => f.debug_tuple("Provider").finish(),
        }
    }
}

impl From<Vec<(Value, String)>> for AvailableValues {
    fn from(entries: Vec<(Value, String)>) -> Self {
        AvailableValues::Inline(entries)
    }
}

/// Metadata for one form value: its type name, an options bitmask the type
/// interprets, and optional presentation extras.
///
/// Immutable after construction; built with the `with_*` methods.
#[derive(Clone)]
pub struct ValueDefinition {
    value_type: String,
    options: u32,
    label: Option<String>,
    description: Option<String>,
    placeholder: Option<String>,
    available_values: Option<AvailableValues>,
    validators: Vec<Rc<dyn Validator>>,
}

impl ValueDefinition {
    pub fn new(value_type: impl Into<String>, options: u32) -> Self {
        Self {
            value_type: value_type.into(),
            options,
            label: None,
            description: None,
            placeholder: None,
            available_values: None,
            validators: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_available_values(mut self, values: impl Into<AvailableValues>) -> Self {
        self.available_values = Some(values.into());
        self
    }

    pub fn with_validator(mut self, validator: Rc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn options(&self) -> u32 {
        self.options
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn available_values(&self) -> Option<&AvailableValues> {
        self.available_values.as_ref()
    }

    pub fn validators(&self) -> &[Rc<dyn Validator>] {
        &self.validators
    }
}

impl fmt::Debug for ValueDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueDefinition")
            .field("value_type", &self.value_type)
            .field("options", &self.options)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Resolves a key to its definition, if the source declares one.
pub trait ValueDefinitionProvider {
    fn value_definition(&self, key: &str) -> anyhow::Result<Option<ValueDefinition>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_definition() {
        let def = ValueDefinition::new("string", 89);
        assert_eq!(def.value_type(), "string");
        assert_eq!(def.options(), 89);
        assert!(def.label().is_none());
    }

    #[test]
    fn test_described_definition() {
        let def = ValueDefinition::new("number", 16)
            .with_label("Hello")
            .with_description("Here I am")
            .with_placeholder("Uhh");
        assert_eq!(def.value_type(), "number");
        assert_eq!(def.options(), 16);
        assert_eq!(def.label(), Some("Hello"));
        assert_eq!(def.description(), Some("Here I am"));
        assert_eq!(def.placeholder(), Some("Uhh"));
    }

    #[test]
    fn test_listing_definition() {
        let def = ValueDefinition::new("popup", 0).with_available_values(vec![
            (Value::Int(1), "one".to_string()),
            (Value::Int(2), "two".to_string()),
            (Value::Int(3), "three".to_string()),
        ]);
        let entries = def.available_values().unwrap().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (Value::Int(1), "one".to_string()));
    }

    #[test]
    fn test_pair_list_provider_label_fallback() {
        let provider = PairListProvider::new(
            vec![Value::Int(1), Value::Int(2)],
            vec!["one".to_string()],
        );
        let entries = provider.entries();
        assert_eq!(entries[0].1, "one");
        assert_eq!(entries[1].1, "2");
    }
}
