// File: src/definition/value_type.rs
// Purpose: Value type contract and the name-keyed registry

use crate::definition::AvailableValues;
use crate::error::ConversionError;
use crate::validation::Validator;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Stateless converter between a stored scalar and the value a form control
/// works with.
///
/// Both directions are partial. `to_value` fails silently: a scalar outside
/// the type's domain yields `None` and the control starts empty. `to_scalar`
/// must error instead of coercing when a submitted value can never be
/// stored; the message becomes a field-level error for the end user.
pub trait ValueType {
    /// Unique name used to register and look up the type
    fn name(&self) -> &str;

    /// Enumerable candidates for selection controls.
    ///
    /// Options-aware so the candidate list matches the rendering option in
    /// effect for the key.
    fn available_values(&self, options: u32) -> Option<AvailableValues> {
        let _ = options;
        None
    }

    /// Convert a stored scalar into the form-domain value
    fn to_value(&self, scalar: &Value, options: u32) -> Option<Value>;

    /// Convert a submitted form value back into a storable scalar
    fn to_scalar(&self, value: &Value, options: u32) -> Result<Value, ConversionError>;

    /// Validators this type contributes to every control built for it
    fn validators(&self) -> Vec<Rc<dyn Validator>> {
        Vec::new()
    }
}

/// Supplies a batch of value types for registration in one call.
pub trait ValueTypeFactory {
    fn value_types(&self) -> Vec<Rc<dyn ValueType>>;
}

enum RegisteredType {
    Instance(Rc<dyn ValueType>),
    Factory(Box<dyn Fn(&str) -> Option<Rc<dyn ValueType>>>),
}

/// Name-keyed lookup of value types.
///
/// Entries are either shared instances or factories invoked per lookup.
/// Factories always register under an explicit name, so the unnamed-factory
/// misuse the registry would otherwise have to police cannot be expressed.
#[derive(Default)]
pub struct ValueTypeRegistry {
    entries: HashMap<String, RegisteredType>,
}

impl ValueTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance under its own name
    pub fn add(&mut self, value_type: Rc<dyn ValueType>) -> &mut Self {
        let name = value_type.name().to_string();
        self.add_named(name, value_type)
    }

    /// Register an instance under an explicit name, shadowing any prior entry
    pub fn add_named(&mut self, name: impl Into<String>, value_type: Rc<dyn ValueType>) -> &mut Self {
        self.entries
            .insert(name.into(), RegisteredType::Instance(value_type));
        self
    }

    /// Register a factory resolved on every lookup
    pub fn add_factory<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&str) -> Option<Rc<dyn ValueType>> + 'static,
    {
        self.entries
            .insert(name.into(), RegisteredType::Factory(Box::new(factory)));
        self
    }

    /// Register every type a factory yields
    pub fn add_all(&mut self, factory: &dyn ValueTypeFactory) -> &mut Self {
        for value_type in factory.value_types() {
            self.add(value_type);
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.entries.remove(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn ValueType>> {
        match self.entries.get(name)? {
            RegisteredType::Instance(value_type) => Some(value_type.clone()),
            RegisteredType::Factory(factory) => factory(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoType(&'static str);

    impl ValueType for EchoType {
        fn name(&self) -> &str {
            self.0
        }

        fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
            Some(scalar.clone())
        }

        fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
            Ok(value.clone())
        }
    }

    #[test]
    fn test_instance_lookup() {
        let mut registry = ValueTypeRegistry::new();
        registry.add(Rc::new(EchoType("echo")));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("other").is_none());

        registry.remove("echo");
        assert!(registry.get("echo").is_none());
    }

    #[test]
    fn test_factory_resolved_per_lookup() {
        let mut registry = ValueTypeRegistry::new();
        registry.add_factory("lazy", |name| {
            assert_eq!(name, "lazy");
            Some(Rc::new(EchoType("lazy")) as Rc<dyn ValueType>)
        });
        assert_eq!(registry.get("lazy").unwrap().name(), "lazy");
        // Still resolvable on the next call
        assert!(registry.get("lazy").is_some());
    }

    #[test]
    fn test_explicit_name_shadows_type_name() {
        let mut registry = ValueTypeRegistry::new();
        registry.add_named("alias", Rc::new(EchoType("echo")));
        assert!(registry.get("alias").is_some());
        assert!(registry.get("echo").is_none());
    }
}
