//! Mutable type-conversion registry.
//!
//! Maps `(source type, target type)` pairs to transform functions over
//! erased values. A second, target-keyed lane holds *fallback* converters
//! that accept any source; an exact pair entry always wins over a fallback,
//! regardless of registration order.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::error::{ConvertError, Result};
use crate::value::AnyValue;

type BoxedTransform = Box<dyn Fn(AnyValue) -> Result<AnyValue> + Send + Sync>;

struct ConverterEntry {
    source_name: &'static str,
    target_name: &'static str,
    transform: BoxedTransform,
}

/// Registers converters into a [`ConversionRegistry`].
///
/// The single entrypoint a conversion-service setup phase calls once per
/// registrar instance. Registrars are stateless; construct a fresh one
/// wherever one is needed.
pub trait ConverterRegistrar {
    /// Add this registrar's converters to `registry`.
    fn register(&self, registry: &mut ConversionRegistry);
}

/// Mutable table of type converters.
#[derive(Default)]
pub struct ConversionRegistry {
    entries: HashMap<(TypeId, TypeId), ConverterEntry>,
    /// Fallback lane: target type -> converter accepting any source value.
    fallbacks: HashMap<TypeId, ConverterEntry>,
}

impl ConversionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the crate's built-in registrars applied.
    ///
    /// Registrars whose capability feature is disabled are skipped; the
    /// registry itself is unaffected.
    pub fn with_default_converters() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "flow")]
        crate::convert::flow::FlowConverters::new().register(&mut registry);
        registry
    }

    /// Register a converter from `S` to `T`.
    ///
    /// Re-registering the same pair replaces the previous entry.
    pub fn add_converter<S, T, F>(&mut self, convert: F)
    where
        S: Any + Send,
        T: Any + Send,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        let entry = ConverterEntry {
            source_name: type_name::<S>(),
            target_name: type_name::<T>(),
            transform: Box::new(move |value: AnyValue| {
                let value = value
                    .downcast::<S>()
                    .map_err(|_| ConvertError::TypeMismatch {
                        expected: type_name::<S>(),
                    })?;
                Ok(Box::new(convert(*value)) as AnyValue)
            }),
        };
        tracing::trace!(
            from = entry.source_name,
            to = entry.target_name,
            "registering converter"
        );
        self.entries
            .insert((TypeId::of::<S>(), TypeId::of::<T>()), entry);
    }

    /// Register a fallback converter to `T` that accepts any source value.
    ///
    /// Consulted only when no exact (source, target) entry matches.
    pub fn add_fallback_converter<T, F>(&mut self, convert: F)
    where
        T: Any + Send,
        F: Fn(AnyValue) -> T + Send + Sync + 'static,
    {
        let entry = ConverterEntry {
            source_name: "any",
            target_name: type_name::<T>(),
            transform: Box::new(move |value: AnyValue| Ok(Box::new(convert(value)) as AnyValue)),
        };
        tracing::trace!(to = entry.target_name, "registering fallback converter");
        self.fallbacks.insert(TypeId::of::<T>(), entry);
    }

    /// Convert a typed value to `T`.
    pub fn convert<S, T>(&self, value: S) -> Result<T>
    where
        S: Any + Send,
        T: Any,
    {
        self.convert_erased(Box::new(value), type_name::<S>())
    }

    /// Convert an erased value to `T`, dispatching on its concrete type.
    pub fn convert_any<T: Any>(&self, value: AnyValue) -> Result<T> {
        let source_id = value.as_ref().type_id();
        // Only the TypeId is known for an erased miss; the typed path gives
        // a readable name.
        let source_name = format!("{source_id:?}");
        self.convert_erased(value, &source_name)
    }

    /// Whether a conversion to `T` exists for the given source type.
    pub fn can_convert<S: Any, T: Any>(&self) -> bool {
        let key = (TypeId::of::<S>(), TypeId::of::<T>());
        self.entries.contains_key(&key) || self.fallbacks.contains_key(&TypeId::of::<T>())
    }

    fn convert_erased<T: Any>(&self, value: AnyValue, source_name: &str) -> Result<T> {
        let source_id = value.as_ref().type_id();
        let target_id = TypeId::of::<T>();
        let entry = self
            .entries
            .get(&(source_id, target_id))
            .or_else(|| self.fallbacks.get(&target_id))
            .ok_or_else(|| ConvertError::NoConverter {
                source: source_name.to_string(),
                target: type_name::<T>(),
            })?;
        tracing::trace!(
            from = entry.source_name,
            to = entry.target_name,
            "converting value"
        );
        let converted = (entry.transform)(value)?;
        converted
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ConvertError::TypeMismatch {
                expected: type_name::<T>(),
            })
    }
}
