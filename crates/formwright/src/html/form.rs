// File: src/html/form.rs
// Purpose: Form element holding bound controls and driving submission state

use crate::html::control::{ButtonControl, ControlHandle};
use crate::html::submitted::SubmittedData;
use crate::value::Value;
use maud::{html, Markup};
use std::collections::HashMap;

/// Outcome of preparing a form element against a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// The form was not submitted; callers prefill instead
    Untouched,
    /// Every control parsed and validated; the element's data map holds the
    /// submitted form-domain values
    Valid,
    /// At least one field failed, with messages per field name
    Invalid(HashMap<String, Vec<String>>),
}

impl FormState {
    pub fn is_valid(&self) -> bool {
        matches!(self, FormState::Valid)
    }

    pub fn is_untouched(&self) -> bool {
        matches!(self, FormState::Untouched)
    }

    pub fn errors(&self) -> Option<&HashMap<String, Vec<String>>> {
        match self {
            FormState::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// The target a build binds representations into.
///
/// Collects controls in bind order, decides the submission state against a
/// request, and renders the whole form.
pub struct FormElement {
    action: String,
    method: String,
    controls: Vec<ControlHandle>,
    action_control: Option<ButtonControl>,
    data: HashMap<String, Value>,
}

impl FormElement {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "post".to_string(),
            controls: Vec::new(),
            action_control: None,
            data: HashMap::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn add_control(&mut self, control: ControlHandle) {
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[ControlHandle] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<ControlHandle> {
        self.controls
            .iter()
            .find(|c| c.borrow().name() == name)
            .cloned()
    }

    pub fn set_action_control(&mut self, button: ButtonControl) {
        self.action_control = Some(button);
    }

    /// Decide the submission state for a request.
    ///
    /// The form counts as submitted when the action control's name appears
    /// in the request (or, without an action control, when the request
    /// carries any data at all). Parsing and validation failures are
    /// collected per field.
    pub fn prepare_with_request(&mut self, request: &SubmittedData) -> FormState {
        let touched = match &self.action_control {
            Some(button) => request.contains(button.name()),
            None => !request.is_empty(),
        };
        if !touched {
            return FormState::Untouched;
        }

        let mut errors: HashMap<String, Vec<String>> = HashMap::new();
        let mut data = HashMap::new();

        for handle in &self.controls {
            let mut control = handle.borrow_mut();
            let name = control.name().to_string();
            let raw = request.get(&name).unwrap_or("");

            match control.parse_submitted(raw) {
                Some(value) => {
                    control.set_value(value.clone());
                    match control.validate() {
                        Ok(()) => {
                            data.insert(name, value);
                        }
                        Err(messages) => {
                            errors.entry(name).or_default().extend(messages);
                        }
                    }
                }
                None => {
                    errors
                        .entry(name)
                        .or_default()
                        .push("Not a valid choice".to_string());
                }
            }
        }

        if errors.is_empty() {
            self.data = data;
            FormState::Valid
        } else {
            FormState::Invalid(errors)
        }
    }

    pub fn data(&self) -> &HashMap<String, Value> {
        &self.data
    }

    /// Install prefill data, pushing each value into its matching control
    pub fn set_data(&mut self, data: HashMap<String, Value>) {
        for handle in &self.controls {
            let mut control = handle.borrow_mut();
            if let Some(value) = data.get(control.name()) {
                control.set_value(value.clone());
            }
        }
        self.data = data;
    }

    pub fn render(&self) -> Markup {
        html! {
            form action=(self.action) method=(self.method) {
                @for control in &self.controls {
                    (control.borrow().render())
                }
                @if let Some(button) = &self.action_control {
                    (button.render())
                }
            }
        }
    }
}
