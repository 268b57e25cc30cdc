// File: src/month.rs
// Purpose: Calendar month numbers mapped to short or long names

use formwright::{AvailableValues, ConversionError, Value, ValueType};

const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month numbers 1..=12 rendered as names.
///
/// The options flag picks the name table; without a flag the scalar passes
/// through numerically. Reverse lookup probes the long-name table before
/// the short-name table, so on a genuine collision the long name wins.
pub struct MonthType {
    short_names: Vec<String>,
    long_names: Vec<String>,
}

impl MonthType {
    pub const SHORT_NAME_OPTION: u32 = 1;
    pub const LONG_NAME_OPTION: u32 = 2;

    pub fn new() -> Self {
        Self {
            short_names: SHORT_NAMES.iter().map(|s| s.to_string()).collect(),
            long_names: LONG_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override both name tables, e.g. for another locale. Each table must
    /// carry exactly twelve entries.
    pub fn with_names(short_names: Vec<String>, long_names: Vec<String>) -> Self {
        assert_eq!(short_names.len(), 12, "twelve short month names required");
        assert_eq!(long_names.len(), 12, "twelve long month names required");
        Self {
            short_names,
            long_names,
        }
    }

    fn table(&self, options: u32) -> Option<&[String]> {
        match options {
            Self::SHORT_NAME_OPTION => Some(&self.short_names),
            Self::LONG_NAME_OPTION => Some(&self.long_names),
            _ => None,
        }
    }

    fn month_number(scalar: &Value) -> Option<usize> {
        match scalar.as_int() {
            Some(n) if (1..=12).contains(&n) => Some(n as usize),
            _ => None,
        }
    }

    fn lookup_name(&self, name: &str) -> Option<i64> {
        // Long names first; the explicit tie rule for names present in both tables
        self.long_names
            .iter()
            .position(|n| n == name)
            .or_else(|| self.short_names.iter().position(|n| n == name))
            .map(|idx| idx as i64 + 1)
    }
}

impl Default for MonthType {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueType for MonthType {
    fn name(&self) -> &str {
        "month"
    }

    fn available_values(&self, options: u32) -> Option<AvailableValues> {
        let entries = match self.table(options) {
            Some(names) => names
                .iter()
                .map(|name| (Value::Text(name.clone()), name.clone()))
                .collect(),
            None => (1..=12)
                .map(|n| (Value::Int(n), n.to_string()))
                .collect(),
        };
        Some(AvailableValues::Inline(entries))
    }

    fn to_value(&self, scalar: &Value, options: u32) -> Option<Value> {
        let number = Self::month_number(scalar)?;
        Some(match self.table(options) {
            Some(names) => Value::Text(names[number - 1].clone()),
            None => Value::Int(number as i64),
        })
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        if let Value::Text(name) = value {
            if let Some(number) = self.lookup_name(name) {
                return Ok(Value::Int(number));
            }
        }
        Self::month_number(value)
            .map(|n| Value::Int(n as i64))
            .ok_or_else(|| ConversionError::new("Not a recognized month"))
    }
}
