// File: src/representation/mod.rs
// Purpose: Renderable artifacts produced for each accepted key

use crate::html::control::ControlHandle;
use crate::html::form::FormElement;
use crate::promise::{ValueAccess, ValuePromise};
use crate::value::Value;

pub mod generator;

/// Initial value a representation exposes for the empty-state prefill.
///
/// A map variant lets one representation prefill several fields; its
/// entries are flattened key-by-key.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    Single(Value),
    Map(Vec<(String, Value)>),
}

/// The concrete form artifact for one key.
pub trait Representation {
    /// Field name the representation answers for, if any
    fn name(&self) -> Option<String>;

    /// Bind into the target form element
    fn attach(&self, element: &mut FormElement);

    /// Value to prefill when the form was not submitted
    fn initial_value(&self) -> anyhow::Result<Option<InitialValue>>;
}

/// Runs once per build over the full representation set; may reorder,
/// merge, or drop representations.
pub trait RepresentationFinalizer {
    fn finalize(&self, representations: Vec<Box<dyn Representation>>)
        -> Vec<Box<dyn Representation>>;
}

/// Representation wrapping a single control plus the key's deferred default.
pub struct ControlRepresentation {
    control: ControlHandle,
    default_value: ValuePromise,
}

impl ControlRepresentation {
    pub fn new(control: ControlHandle, default_value: ValuePromise) -> Self {
        Self {
            control,
            default_value,
        }
    }

    pub fn control(&self) -> &ControlHandle {
        &self.control
    }
}

impl Representation for ControlRepresentation {
    fn name(&self) -> Option<String> {
        Some(self.control.borrow().name().to_string())
    }

    fn attach(&self, element: &mut FormElement) {
        element.add_control(self.control.clone());
    }

    fn initial_value(&self) -> anyhow::Result<Option<InitialValue>> {
        Ok(self
            .default_value
            .resolve(ValueAccess::Converted)?
            .map(InitialValue::Single))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::control::{TextFieldControl, TextFieldKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_control_representation() {
        let control: ControlHandle = Rc::new(RefCell::new(TextFieldControl::new(
            "month",
            TextFieldKind::Text,
        )));
        let representation = ControlRepresentation::new(
            control,
            ValuePromise::resolved(Value::Int(3), Some(Value::Text("March".into()))),
        );

        assert_eq!(representation.name(), Some("month".to_string()));
        assert_eq!(
            representation.initial_value().unwrap(),
            Some(InitialValue::Single(Value::Text("March".into())))
        );

        let mut element = FormElement::new("/x");
        representation.attach(&mut element);
        assert_eq!(element.controls().len(), 1);
    }
}
