// File: src/promise.rs
// Purpose: Deferred per-key default value with an explicit access mode

use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Which reading of a deferred value the consumer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAccess {
    /// The provider's scalar as stored
    Raw,
    /// The scalar run through the key's value type
    Converted,
}

type Producer = dyn Fn(ValueAccess) -> anyhow::Result<Option<Value>>;

/// A lazily evaluated value.
///
/// The producer typically closes over a provider handle and a value type and
/// defers the provider round trip until a representation actually needs the
/// default. Consumers resolve it at most once per logical use; results are
/// not memoized.
#[derive(Clone)]
pub struct ValuePromise {
    producer: Rc<Producer>,
}

impl ValuePromise {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn(ValueAccess) -> anyhow::Result<Option<Value>> + 'static,
    {
        Self {
            producer: Rc::new(producer),
        }
    }

    /// A promise over an already known value, converted lazily on access.
    pub fn resolved(raw: Value, converted: Option<Value>) -> Self {
        Self::new(move |access| {
            Ok(match access {
                ValueAccess::Raw => Some(raw.clone()),
                ValueAccess::Converted => converted.clone(),
            })
        })
    }

    pub fn resolve(&self, access: ValueAccess) -> anyhow::Result<Option<Value>> {
        (self.producer)(access)
    }
}

impl fmt::Debug for ValuePromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuePromise").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolve_modes() {
        let promise = ValuePromise::resolved(Value::Int(3), Some(Value::Text("Mar".into())));
        assert_eq!(
            promise.resolve(ValueAccess::Raw).unwrap(),
            Some(Value::Int(3))
        );
        assert_eq!(
            promise.resolve(ValueAccess::Converted).unwrap(),
            Some(Value::Text("Mar".into()))
        );
    }

    #[test]
    fn test_producer_runs_per_resolve() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let promise = ValuePromise::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(Some(Value::Int(1)))
        });

        promise.resolve(ValueAccess::Raw).unwrap();
        assert_eq!(calls.get(), 1);
        promise.resolve(ValueAccess::Converted).unwrap();
        assert_eq!(calls.get(), 2);
    }
}
