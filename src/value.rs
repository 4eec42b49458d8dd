//! Erased values and the null sentinel.

use std::any::Any;

/// Type-erased value passed through the conversion registry.
pub type AnyValue = Box<dyn Any + Send>;

/// Box a concrete value as an [`AnyValue`].
pub fn any_value<T: Any + Send>(value: T) -> AnyValue {
    Box::new(value)
}

/// Typed marker for "no value".
///
/// Erased containers in the runtime cannot hold a native absence, so this
/// sentinel stands in for it. Converters that target a flow translate the
/// sentinel back into a literal absence; the sentinel itself is never
/// emitted to consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullValue;

impl NullValue {
    /// Create the sentinel.
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_value_round_trips_concrete_type() {
        let boxed = any_value(42u32);
        assert_eq!(*boxed.downcast::<u32>().expect("u32 payload"), 42);
    }

    #[test]
    fn null_value_is_a_distinct_type() {
        let boxed = any_value(NullValue::new());
        assert!(boxed.downcast_ref::<NullValue>().is_some());
    }
}
