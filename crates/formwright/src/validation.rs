// File: src/validation.rs
// Purpose: Validator contract and the stock validators the built-in types use

use crate::error::ConversionError;
use crate::value::Value;

/// Per-field validation check run by a control after parsing its submission.
///
/// Value types and definitions both contribute validators; type validators
/// run before definition validators.
pub trait Validator {
    fn validate(&self, value: &Value) -> Result<(), ConversionError>;
}

/// Rejects null and empty-text values.
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, value: &Value) -> Result<(), ConversionError> {
        let empty = match value {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            Err(ConversionError::new("This field is required"))
        } else {
            Ok(())
        }
    }
}

/// Minimum text length. Null and non-text values pass; pair with
/// [`RequiredValidator`] when emptiness matters.
pub struct MinLengthValidator {
    min: usize,
}

impl MinLengthValidator {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Text(s) if !s.is_empty() && s.len() < self.min => Err(ConversionError::new(
                format!("Must be at least {} characters", self.min),
            )),
            _ => Ok(()),
        }
    }
}

/// Maximum text length.
pub struct MaxLengthValidator {
    max: usize,
}

impl MaxLengthValidator {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Text(s) if s.len() > self.max => Err(ConversionError::new(format!(
                "Must be at most {} characters",
                self.max
            ))),
            _ => Ok(()),
        }
    }
}

/// Basic email shape check: one `@`, a dotted domain, no whitespace.
pub struct EmailFormatValidator;

impl EmailFormatValidator {
    fn is_valid(email: &str) -> bool {
        if email.contains(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        // Must have at least a domain with a dot, not at either edge
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    }
}

impl Validator for EmailFormatValidator {
    fn validate(&self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Text(s) if !s.is_empty() && !Self::is_valid(s) => {
                Err(ConversionError::new("Not a valid email address"))
            }
            _ => Ok(()),
        }
    }
}
