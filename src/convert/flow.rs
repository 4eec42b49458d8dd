//! Flow converters.
//!
//! Coerce runtime values into a single-emission [`ValueFlow`] when a caller
//! declares a flow-shaped return type. Deferred values suspend the flow
//! until they resolve; plain values and the null sentinel complete on the
//! first poll. A flow fails only when the deferred value it wraps fails,
//! and with the same error.

use crate::deferred::{DeferredValue, EagerTask};
use crate::flow::{self, ValueFlow};
use crate::registry::{ConversionRegistry, ConverterRegistrar};
use crate::value::{AnyValue, NullValue};

/// Registrar for the flow-shaped conversions.
///
/// Stateless; construct a fresh instance per use.
#[derive(Debug, Default)]
pub struct FlowConverters;

impl FlowConverters {
    /// Create a registrar instance.
    pub fn new() -> Self {
        Self
    }
}

impl ConverterRegistrar for FlowConverters {
    fn register(&self, registry: &mut ConversionRegistry) {
        tracing::debug!("registering flow converters");

        // Already-running task: await it inside the flow, emit its value.
        registry.add_converter(|task: EagerTask| -> ValueFlow { flow::from_future(task.join()) });

        // Lazy completion stage: same contract, the stage starts when the
        // flow is first polled.
        registry.add_converter(|stage: DeferredValue| -> ValueFlow {
            flow::from_future(stage.resolve())
        });

        // Any other value is emitted as-is; no suspension occurs. The exact
        // entries above always win over this fallback.
        registry.add_fallback_converter(|value: AnyValue| -> ValueFlow { flow::once(value) });

        // The null sentinel becomes a literal absence, never the sentinel
        // object itself.
        registry.add_converter(|_: NullValue| -> ValueFlow { flow::absent() });
    }
}
