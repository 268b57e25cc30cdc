// Formwright - data-driven form construction
// Maps named, externally sourced values to HTML form controls, validates
// submissions, and writes changed values back to storage.

pub mod builder;
pub mod definition;
pub mod error;
pub mod html;
pub mod promise;
pub mod provider;
pub mod representation;
pub mod validation;
pub mod value;

// Re-export the working surface
pub use builder::{BuildResult, FormBuilder, KeyFilter, ResolvedValue};
pub use definition::value_type::{ValueType, ValueTypeFactory, ValueTypeRegistry};
pub use definition::{
    AvailableValues, ListProvider, PairListProvider, ValueDefinition, ValueDefinitionProvider,
};
pub use error::ConversionError;
pub use html::{
    ButtonControl, Control, ControlBase, ControlHandle, FormElement, FormState, PopUpControl,
    SubmittedData, TextAreaControl, TextFieldControl, TextFieldKind,
};
pub use promise::{ValueAccess, ValuePromise};
pub use validation::{
    EmailFormatValidator, MaxLengthValidator, MinLengthValidator, RequiredValidator, Validator,
};
pub use provider::chain::ChainValueProvider;
pub use provider::{MapValueProvider, ProvidedValue, ValueProvider, ValueSource, ValueStorage};
pub use representation::generator::{
    ChainRepresentationGenerator, ControlMatch, ControlRepresentationGenerator,
    RepresentationGenerator,
};
pub use representation::{
    ControlRepresentation, InitialValue, Representation, RepresentationFinalizer,
};
pub use value::Value;

// Re-export maud for hosts rendering the built form
pub use maud;
