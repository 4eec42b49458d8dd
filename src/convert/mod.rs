//! Converter registrars.
//!
//! Each registrar contributes a family of conversions to a
//! [`crate::registry::ConversionRegistry`]. Registrars whose target
//! abstraction is optional live behind a cargo feature; with the feature
//! disabled the conversions are simply never registered.

#[cfg(feature = "flow")]
pub mod flow;
