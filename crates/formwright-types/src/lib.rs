// Formwright stock value types
// The converters a data-driven form usually needs, ready to register on a
// FormBuilder in one call.

use formwright::{ValueType, ValueTypeFactory};
use std::rc::Rc;

pub mod boolean;
pub mod date;
pub mod email;
pub mod integral;
pub mod month;
pub mod password;
pub mod text;

pub use boolean::BooleanType;
pub use date::DateType;
pub use email::EmailType;
pub use integral::IntegralOptionType;
pub use month::MonthType;
pub use password::PasswordType;
pub use text::{HtmlType, StringType, TextType};

/// Factory registering the whole stock set.
///
/// `IntegralOptionType` is not included: it only makes sense over a
/// caller-supplied option table.
pub struct StandardValueTypes;

impl ValueTypeFactory for StandardValueTypes {
    fn value_types(&self) -> Vec<Rc<dyn ValueType>> {
        vec![
            Rc::new(StringType),
            Rc::new(TextType),
            Rc::new(HtmlType),
            Rc::new(BooleanType::new()),
            Rc::new(MonthType::new()),
            Rc::new(DateType),
            Rc::new(EmailType),
            Rc::new(PasswordType::default()),
        ]
    }
}
