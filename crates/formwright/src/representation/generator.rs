// File: src/representation/generator.rs
// Purpose: Turn (key, definition, type, default) into representations

use crate::definition::value_type::ValueType;
use crate::definition::ValueDefinition;
use crate::html::control::{
    Control, ControlHandle, PopUpControl, TextAreaControl, TextFieldControl, TextFieldKind,
};
use crate::promise::ValuePromise;
use crate::representation::{ControlRepresentation, Representation};
use std::cell::RefCell;
use std::rc::Rc;

/// Produces the representations for one accepted key.
///
/// An empty result means the generator does not handle the key. The
/// `finalize` hook lets a generator double as the build's finalizer when no
/// dedicated one is configured; the default is identity.
pub trait RepresentationGenerator {
    fn generate(
        &self,
        key: &str,
        definition: &ValueDefinition,
        value_type: &dyn ValueType,
        default_value: ValuePromise,
    ) -> anyhow::Result<Vec<Box<dyn Representation>>>;

    fn finalize(
        &self,
        representations: Vec<Box<dyn Representation>>,
    ) -> Vec<Box<dyn Representation>> {
        representations
    }
}

/// Tries sub-generators in registration order; the first non-empty result
/// wins and short-circuits the rest.
#[derive(Default)]
pub struct ChainRepresentationGenerator {
    generators: Vec<Rc<dyn RepresentationGenerator>>,
}

impl ChainRepresentationGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_generator(&mut self, generator: Rc<dyn RepresentationGenerator>) -> &mut Self {
        self.generators.push(generator);
        self
    }

    pub fn remove_generator(&mut self, generator: &Rc<dyn RepresentationGenerator>) -> bool {
        let before = self.generators.len();
        self.generators.retain(|g| !Rc::ptr_eq(g, generator));
        self.generators.len() != before
    }

    pub fn has_generator(&self, generator: &Rc<dyn RepresentationGenerator>) -> bool {
        self.generators.iter().any(|g| Rc::ptr_eq(g, generator))
    }
}

impl RepresentationGenerator for ChainRepresentationGenerator {
    fn generate(
        &self,
        key: &str,
        definition: &ValueDefinition,
        value_type: &dyn ValueType,
        default_value: ValuePromise,
    ) -> anyhow::Result<Vec<Box<dyn Representation>>> {
        for generator in &self.generators {
            let result =
                generator.generate(key, definition, value_type, default_value.clone())?;
            if !result.is_empty() {
                return Ok(result);
            }
        }
        Ok(Vec::new())
    }
}

/// How a mapping row decides whether it applies to a value type.
pub enum ControlMatch {
    /// Exact match on the type's registry name
    TypeName(String),
    /// Arbitrary predicate over the type
    Predicate(Box<dyn Fn(&dyn ValueType) -> bool>),
}

impl ControlMatch {
    pub fn name(name: impl Into<String>) -> Self {
        ControlMatch::TypeName(name.into())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&dyn ValueType) -> bool + 'static,
    {
        ControlMatch::Predicate(Box::new(predicate))
    }

    fn matches(&self, value_type: &dyn ValueType) -> bool {
        match self {
            ControlMatch::TypeName(name) => value_type.name() == name,
            ControlMatch::Predicate(predicate) => predicate(value_type),
        }
    }
}

type ControlConstructor = Box<dyn Fn(&str) -> ControlHandle>;

/// Builds one control per key from an ordered match table.
///
/// Rows are evaluated in order and the first match wins, which makes the
/// tie-break explicit and testable. The built control receives the
/// definition's presentation strings, the type's validators before the
/// definition's, and, for option controls, the definition's custom list
/// when present, else the type's own list.
pub struct ControlRepresentationGenerator {
    table: Vec<(ControlMatch, ControlConstructor)>,
}

impl ControlRepresentationGenerator {
    /// Start with an empty match table
    pub fn new() -> Self {
        Self { table: Vec::new() }
    }

    /// Match table covering the stock type names
    pub fn with_defaults() -> Self {
        let mut generator = Self::new();
        generator
            .add_rule(ControlMatch::name("boolean"), |key| {
                Rc::new(RefCell::new(PopUpControl::new(key)))
            })
            .add_rule(ControlMatch::name("month"), |key| {
                Rc::new(RefCell::new(PopUpControl::new(key)))
            })
            .add_rule(ControlMatch::name("integral_option"), |key| {
                Rc::new(RefCell::new(PopUpControl::new(key)))
            })
            .add_rule(ControlMatch::name("date"), |key| {
                Rc::new(RefCell::new(TextFieldControl::new(key, TextFieldKind::Date)))
            })
            .add_rule(ControlMatch::name("email"), |key| {
                Rc::new(RefCell::new(TextFieldControl::new(
                    key,
                    TextFieldKind::Email,
                )))
            })
            .add_rule(ControlMatch::name("password"), |key| {
                Rc::new(RefCell::new(TextFieldControl::new(
                    key,
                    TextFieldKind::Password,
                )))
            })
            .add_rule(ControlMatch::name("html"), |key| {
                Rc::new(RefCell::new(TextAreaControl::new(key, 10)))
            })
            .add_rule(ControlMatch::name("text"), |key| {
                Rc::new(RefCell::new(TextAreaControl::new(key, 3)))
            })
            .add_rule(ControlMatch::name("string"), |key| {
                Rc::new(RefCell::new(TextFieldControl::new(key, TextFieldKind::Text)))
            });
        generator
    }

    /// Append a rule to the end of the table
    pub fn add_rule<F>(&mut self, matcher: ControlMatch, constructor: F) -> &mut Self
    where
        F: Fn(&str) -> ControlHandle + 'static,
    {
        self.table.push((matcher, Box::new(constructor)));
        self
    }

    /// Insert a rule ahead of the existing table so it wins ties
    pub fn prepend_rule<F>(&mut self, matcher: ControlMatch, constructor: F) -> &mut Self
    where
        F: Fn(&str) -> ControlHandle + 'static,
    {
        self.table.insert(0, (matcher, Box::new(constructor)));
        self
    }

    fn make_control(&self, key: &str, value_type: &dyn ValueType) -> Option<ControlHandle> {
        self.table
            .iter()
            .find(|(matcher, _)| matcher.matches(value_type))
            .map(|(_, constructor)| constructor(key))
    }
}

impl Default for ControlRepresentationGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RepresentationGenerator for ControlRepresentationGenerator {
    fn generate(
        &self,
        key: &str,
        definition: &ValueDefinition,
        value_type: &dyn ValueType,
        default_value: ValuePromise,
    ) -> anyhow::Result<Vec<Box<dyn Representation>>> {
        let Some(handle) = self.make_control(key, value_type) else {
            return Ok(Vec::new());
        };

        {
            let mut control = handle.borrow_mut();
            control.set_label(definition.label().map(str::to_string));
            control.set_description(definition.description().map(str::to_string));
            control.set_placeholder(definition.placeholder().map(str::to_string));

            // Type validators first, definition validators after
            for validator in value_type.validators() {
                control.add_validator(validator);
            }
            for validator in definition.validators() {
                control.add_validator(validator.clone());
            }

            let entries = match definition.available_values() {
                Some(list) if !list.is_empty() => Some(list.entries()),
                _ => value_type
                    .available_values(definition.options())
                    .map(|list| list.entries()),
            };
            if let Some(entries) = entries {
                control.populate_options(entries);
            }
        }

        Ok(vec![Box::new(ControlRepresentation::new(
            handle,
            default_value,
        ))])
    }
}
