//! HTML form layer: controls, the form element, and submitted data.
//!
//! Realizes the collaborator contracts the builder binds against, rendered
//! with maud.

pub mod control;
pub mod form;
pub mod submitted;

pub use control::{
    ButtonControl, Control, ControlBase, ControlHandle, PopUpControl, TextAreaControl,
    TextFieldControl, TextFieldKind,
};
pub use form::{FormElement, FormState};
pub use submitted::SubmittedData;
