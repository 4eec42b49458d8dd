//! flowbridge
//!
//! A mutable type-conversion registry plus the adapters that coerce runtime
//! values into flow-shaped return types. A *flow* here is a cold,
//! single-emission stream: nothing runs until a consumer polls it, and once
//! polled it yields exactly one value (or the failure of the value it wraps)
//! and terminates.
//!
//! The registry maps `(source type, target type)` pairs to transform
//! functions over erased values. The bundled [`convert::flow::FlowConverters`]
//! registrar covers the flow-shaped targets: already-running tasks and lazy
//! completion stages suspend until their value resolves, plain values are
//! emitted as-is, and the [`value::NullValue`] sentinel is emitted as a
//! literal absence.
#![deny(unsafe_code)]

pub mod convert;
pub mod deferred;
pub mod error;
#[cfg(feature = "flow")]
pub mod flow;
pub mod registry;
pub mod value;

pub use error::{ConvertError, Result};
pub use registry::{ConversionRegistry, ConverterRegistrar};
