// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Read-only models: value holders with a `get_object` operation.
//!
//! A model either owns its object ([`ValueModel`]), produces it on demand
//! ([`SupplierModel`], [`LoadableModel`]) or derives it from another model
//! through a named getter ([`LambdaModel`], [`MapModel`]).
//!
//! Getters and suppliers are plain function pointers paired with a
//! `'static` name. They serialize as that name, which keeps every model in
//! this module encodable for the size probe.

use std::fmt;
use std::sync::OnceLock;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A read-only value holder.
pub trait Model {
    /// Type of the object this model yields.
    type Object;

    /// Produce the model object. Called on every read.
    fn get_object(&self) -> Self::Object;

    /// Release any cached state. Most models hold none.
    fn detach(&mut self) {}

    /// Derive a model that applies `getter` to this model's object.
    fn map<U>(self, getter: Getter<Self::Object, U>) -> MapModel<Self, U>
    where
        Self: Sized,
    {
        MapModel {
            source: self,
            getter,
        }
    }
}

/// A named single-argument function reference.
pub struct Getter<S, T> {
    name: &'static str,
    get: fn(&S) -> T,
}

impl<S, T> Getter<S, T> {
    /// Pair `get` with the name it serializes as.
    pub fn new(name: &'static str, get: fn(&S) -> T) -> Self {
        Self { name, get }
    }

    /// The name this getter serializes as.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the getter.
    #[inline]
    pub fn apply(&self, source: &S) -> T {
        (self.get)(source)
    }
}

impl<S, T> Clone for Getter<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Getter<S, T> {}

impl<S, T> fmt::Debug for Getter<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({})", self.name)
    }
}

impl<S, T> Serialize for Getter<S, T> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A named zero-argument function reference.
pub struct Supplier<T> {
    name: &'static str,
    get: fn() -> T,
}

impl<T> Supplier<T> {
    /// Pair `get` with the name it serializes as.
    pub fn new(name: &'static str, get: fn() -> T) -> Self {
        Self { name, get }
    }

    /// The name this supplier serializes as.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call the supplier.
    #[inline]
    pub fn supply(&self) -> T {
        (self.get)()
    }
}

impl<T> Clone for Supplier<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Supplier<T> {}

impl<T> fmt::Debug for Supplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supplier({})", self.name)
    }
}

impl<T> Serialize for Supplier<T> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Model holding its object directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueModel<T> {
    object: T,
}

impl<T: Clone> ValueModel<T> {
    /// Wrap `object`.
    pub fn of(object: T) -> Self {
        Self { object }
    }
}

impl<T: Clone> Model for ValueModel<T> {
    type Object = T;

    #[inline]
    fn get_object(&self) -> T {
        self.object.clone()
    }
}

/// Model calling a supplier on every read.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupplierModel<T> {
    supplier: Supplier<T>,
}

impl<T> SupplierModel<T> {
    /// Model backed by `supplier`.
    pub fn of(supplier: Supplier<T>) -> Self {
        Self { supplier }
    }
}

impl<T> Model for SupplierModel<T> {
    type Object = T;

    fn get_object(&self) -> T {
        self.supplier.supply()
    }
}

/// Model that loads its object once and keeps it until detached.
///
/// The loaded object is transient: it is skipped when the model is
/// serialized.
#[derive(Debug, Clone)]
pub struct LoadableModel<T> {
    loader: Supplier<T>,
    loaded: OnceLock<T>,
}

impl<T> LoadableModel<T> {
    /// Model loading its object through `loader`.
    pub fn of(loader: Supplier<T>) -> Self {
        Self {
            loader,
            loaded: OnceLock::new(),
        }
    }

    /// Whether the object is currently loaded.
    pub fn is_attached(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub(crate) fn loaded(&self) -> Option<&T> {
        self.loaded.get()
    }
}

impl<T: Clone> Model for LoadableModel<T> {
    type Object = T;

    fn get_object(&self) -> T {
        self.loaded.get_or_init(|| self.loader.supply()).clone()
    }

    fn detach(&mut self) {
        if self.loaded.take().is_some() {
            tracing::trace!(loader = self.loader.name(), "Detached loadable model");
        }
    }
}

impl<T> Serialize for LoadableModel<T> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut state = serializer.serialize_struct("LoadableModel", 1)?;
        state.serialize_field("loader", &self.loader)?;
        state.end()
    }
}

/// Model applying one getter to the object of a target model.
pub struct LambdaModel<M: Model, T> {
    target: M,
    getter: Getter<M::Object, T>,
}

impl<M: Model, T> LambdaModel<M, T> {
    /// Model reading `getter` off `target`'s object.
    pub fn of(target: M, getter: Getter<M::Object, T>) -> Self {
        Self { target, getter }
    }
}

impl<M: Model, T> Model for LambdaModel<M, T> {
    type Object = T;

    #[inline]
    fn get_object(&self) -> T {
        self.getter.apply(&self.target.get_object())
    }

    fn detach(&mut self) {
        self.target.detach();
    }
}

impl<M: Model + Clone, T> Clone for LambdaModel<M, T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            getter: self.getter,
        }
    }
}

impl<M: Model + fmt::Debug, T> fmt::Debug for LambdaModel<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaModel")
            .field("target", &self.target)
            .field("getter", &self.getter)
            .finish()
    }
}

impl<M: Model + Serialize, T> Serialize for LambdaModel<M, T> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut state = serializer.serialize_struct("LambdaModel", 2)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("getter", &self.getter)?;
        state.end()
    }
}

/// Model produced by [`Model::map`].
pub struct MapModel<M: Model, U> {
    source: M,
    getter: Getter<M::Object, U>,
}

impl<M: Model, U> Model for MapModel<M, U> {
    type Object = U;

    #[inline]
    fn get_object(&self) -> U {
        self.getter.apply(&self.source.get_object())
    }

    fn detach(&mut self) {
        self.source.detach();
    }
}

impl<M: Model + Clone, U> Clone for MapModel<M, U> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            getter: self.getter,
        }
    }
}

impl<M: Model + fmt::Debug, U> fmt::Debug for MapModel<M, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapModel")
            .field("source", &self.source)
            .field("getter", &self.getter)
            .finish()
    }
}

impl<M: Model + Serialize, U> Serialize for MapModel<M, U> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut state = serializer.serialize_struct("MapModel", 2)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("getter", &self.getter)?;
        state.end()
    }
}

// Field access for the footprint walk.
impl<M: Model, T> LambdaModel<M, T> {
    pub(crate) fn target(&self) -> &M {
        &self.target
    }
}

impl<M: Model, U> MapModel<M, U> {
    pub(crate) fn source(&self) -> &M {
        &self.source
    }
}

impl<T> ValueModel<T> {
    pub(crate) fn object(&self) -> &T {
        &self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn double(value: &u32) -> u32 {
        value * 2
    }

    fn describe(value: &u32) -> String {
        format!("#{}", value)
    }

    #[test]
    fn test_value_model() {
        let model = ValueModel::of(21u32);
        assert_eq!(model.get_object(), 21);
        assert_eq!(model.get_object(), 21);
    }

    #[test]
    fn test_map_chain() {
        let model = ValueModel::of(21u32)
            .map(Getter::new("double", double))
            .map(Getter::new("describe", describe));
        assert_eq!(model.get_object(), "#42");
    }

    #[test]
    fn test_lambda_model() {
        let model = LambdaModel::of(ValueModel::of(5u32), Getter::new("double", double));
        assert_eq!(model.get_object(), 10);
    }

    static LOADS: AtomicUsize = AtomicUsize::new(0);

    fn load_counter() -> u32 {
        LOADS.fetch_add(1, Ordering::SeqCst) as u32 + 100
    }

    #[test]
    fn test_loadable_model_caches_until_detached() {
        let mut model = LoadableModel::of(Supplier::new("load_counter", load_counter));
        assert!(!model.is_attached());

        let first = model.get_object();
        assert_eq!(model.get_object(), first);
        assert!(model.is_attached());

        model.detach();
        assert!(!model.is_attached());
        let second = model.get_object();
        assert_eq!(second, first + 1);
    }

    fn load_constant() -> u32 {
        7
    }

    #[test]
    fn test_loadable_model_serialization_skips_cache() {
        let model = LoadableModel::of(Supplier::new("load_constant", load_constant));
        let detached = serde_json::to_string(&model).unwrap();
        assert_eq!(model.get_object(), 7);
        let attached = serde_json::to_string(&model).unwrap();
        assert_eq!(detached, attached);
        assert_eq!(attached, r#"{"loader":"load_constant"}"#);
    }

    #[test]
    fn test_getter_serializes_as_name() {
        let model = ValueModel::of(1u32).map(Getter::new("double", double));
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#"{"source":{"object":1},"getter":"double"}"#);
    }
}
