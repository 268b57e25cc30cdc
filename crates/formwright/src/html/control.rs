// File: src/html/control.rs
// Purpose: Form controls a representation binds into the form element

use crate::validation::Validator;
use crate::value::Value;
use maud::{html, Markup};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a bound control; the form element and the
/// representation both hold one.
pub type ControlHandle = Rc<RefCell<dyn Control>>;

/// State every control carries: identity, presentation strings, the current
/// value, and the validators to run against a submission.
pub struct ControlBase {
    name: String,
    label: Option<String>,
    description: Option<String>,
    placeholder: Option<String>,
    value: Value,
    validators: Vec<Rc<dyn Validator>>,
}

impl ControlBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            placeholder: None,
            value: Value::Null,
            validators: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// One form control.
///
/// Concrete controls expose their common state through [`ControlBase`] and
/// add parsing plus rendering; everything else is provided.
pub trait Control {
    fn base(&self) -> &ControlBase;

    fn base_mut(&mut self) -> &mut ControlBase;

    /// Turn the submitted raw string into this control's value domain.
    /// `None` means the submission is not an acceptable input at all.
    fn parse_submitted(&self, raw: &str) -> Option<Value>;

    fn render(&self) -> Markup;

    /// Install selectable options; controls without an option list decline.
    fn populate_options(&mut self, entries: Vec<(Value, String)>) -> bool {
        let _ = entries;
        false
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    fn value(&self) -> Value {
        self.base().value().clone()
    }

    fn set_value(&mut self, value: Value) {
        self.base_mut().value = value;
    }

    fn set_label(&mut self, label: Option<String>) {
        self.base_mut().label = label;
    }

    fn set_description(&mut self, description: Option<String>) {
        self.base_mut().description = description;
    }

    fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.base_mut().placeholder = placeholder;
    }

    fn add_validator(&mut self, validator: Rc<dyn Validator>) {
        self.base_mut().validators.push(validator);
    }

    /// Run the validators in attach order against the current value,
    /// collecting every failure message
    fn validate(&self) -> Result<(), Vec<String>> {
        let base = self.base();
        let messages: Vec<String> = base
            .validators
            .iter()
            .filter_map(|v| v.validate(&base.value).err())
            .map(|e| e.message().to_string())
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(messages)
        }
    }
}

fn field_wrapper(base: &ControlBase, inner: Markup) -> Markup {
    html! {
        div.form-field {
            @if let Some(label) = base.label() {
                label for=(base.name()) { (label) }
            }
            (inner)
            @if let Some(description) = base.description() {
                p.form-description { (description) }
            }
        }
    }
}

/// Input rendering variants of a single-line text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldKind {
    Text,
    Date,
    Email,
    Password,
}

impl TextFieldKind {
    fn input_type(self) -> &'static str {
        match self {
            TextFieldKind::Text => "text",
            TextFieldKind::Date => "date",
            TextFieldKind::Email => "email",
            TextFieldKind::Password => "password",
        }
    }
}

/// Single-line `<input>` control.
pub struct TextFieldControl {
    base: ControlBase,
    kind: TextFieldKind,
}

impl TextFieldControl {
    pub fn new(name: impl Into<String>, kind: TextFieldKind) -> Self {
        Self {
            base: ControlBase::new(name),
            kind,
        }
    }

    pub fn kind(&self) -> TextFieldKind {
        self.kind
    }
}

impl Control for TextFieldControl {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn parse_submitted(&self, raw: &str) -> Option<Value> {
        Some(Value::Text(raw.to_string()))
    }

    fn render(&self) -> Markup {
        field_wrapper(
            &self.base,
            html! {
                input
                    type=(self.kind.input_type())
                    name=(self.base.name())
                    id=(self.base.name())
                    value=(self.base.value().to_display_string())
                    placeholder=[self.base.placeholder()];
            },
        )
    }
}

/// Multi-line `<textarea>` control.
pub struct TextAreaControl {
    base: ControlBase,
    rows: u32,
}

impl TextAreaControl {
    pub fn new(name: impl Into<String>, rows: u32) -> Self {
        Self {
            base: ControlBase::new(name),
            rows,
        }
    }
}

impl Control for TextAreaControl {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn parse_submitted(&self, raw: &str) -> Option<Value> {
        Some(Value::Text(raw.to_string()))
    }

    fn render(&self) -> Markup {
        field_wrapper(
            &self.base,
            html! {
                textarea
                    name=(self.base.name())
                    id=(self.base.name())
                    rows=(self.rows)
                    placeholder=[self.base.placeholder()] {
                    (self.base.value().to_display_string())
                }
            },
        )
    }
}

/// `<select>` control over a fixed option table.
///
/// Submissions are matched against the option values; anything outside the
/// table is rejected at parse time.
pub struct PopUpControl {
    base: ControlBase,
    options: Vec<(Value, String)>,
}

impl PopUpControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(name),
            options: Vec::new(),
        }
    }

    pub fn add_option(&mut self, value: Value, label: impl Into<String>) -> &mut Self {
        self.options.push((value, label.into()));
        self
    }

    pub fn options(&self) -> &[(Value, String)] {
        &self.options
    }
}

impl Control for PopUpControl {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn parse_submitted(&self, raw: &str) -> Option<Value> {
        if raw.is_empty() {
            return Some(Value::Null);
        }
        self.options
            .iter()
            .find(|(value, _)| value.to_display_string() == raw)
            .map(|(value, _)| value.clone())
    }

    fn populate_options(&mut self, entries: Vec<(Value, String)>) -> bool {
        self.options = entries;
        true
    }

    fn render(&self) -> Markup {
        field_wrapper(
            &self.base,
            html! {
                select name=(self.base.name()) id=(self.base.name()) {
                    @for (value, label) in &self.options {
                        @let submitted = value.to_display_string();
                        option
                            value=(submitted)
                            selected[*value == *self.base.value()] {
                            (label)
                        }
                    }
                }
            },
        )
    }
}

/// The form's action button; pressing it marks the form as submitted.
#[derive(Debug, Clone)]
pub struct ButtonControl {
    name: String,
    title: String,
}

impl ButtonControl {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let title = name.clone();
        Self { name, title }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> Markup {
        html! {
            button type="submit" name=(self.name) value="" { (self.title) }
        }
    }
}
