// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Dotted property expressions evaluated at runtime.
//!
//! A [`PropertyResolver`] is a registry of bean types and the properties they
//! expose. [`PropertyResolver::get_value`] tokenizes an expression such as
//! `"person.name"` and resolves every segment against the registry on each
//! call, so the cost of dynamic lookup is paid on every read.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::LookupError;
use crate::model::Model;

/// An object whose properties can be described to a [`PropertyResolver`].
pub trait Bean: Any + Send + Sync + fmt::Debug {
    /// Upcast for registry lookups.
    fn as_any(&self) -> &dyn Any;
}

/// A dynamically typed property value.
#[derive(Debug, Clone)]
pub enum Value {
    Text(Arc<str>),
    Bean(Arc<dyn Bean>),
}

impl Value {
    /// Wrap a bean.
    pub fn bean<T: Bean>(bean: Arc<T>) -> Self {
        Value::Bean(bean)
    }

    /// Wrap text.
    pub fn text(text: Arc<str>) -> Self {
        Value::Text(text)
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bean(_) => "bean",
        }
    }

    /// Unwrap a text value.
    pub fn into_text(self) -> Result<Arc<str>, LookupError> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(LookupError::TypeMismatch {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

/// Conversion of a model object into a resolvable [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl<T: Bean> IntoValue for Arc<T> {
    fn into_value(self) -> Value {
        Value::bean(self)
    }
}

/// A validated dotted property expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPath<'a> {
    expression: &'a str,
}

impl<'a> PropertyPath<'a> {
    /// Validate `expression`: one or more identifier segments joined by `.`.
    pub fn parse(expression: &'a str) -> Result<Self, LookupError> {
        if expression.is_empty() {
            return Err(LookupError::InvalidExpression {
                expression: String::new(),
                reason: "expression is empty".to_string(),
            });
        }

        for (position, segment) in expression.split('.').enumerate() {
            if segment.is_empty() {
                return Err(LookupError::InvalidExpression {
                    expression: expression.to_string(),
                    reason: format!("segment {} is empty", position),
                });
            }
            if !is_identifier(segment) {
                return Err(LookupError::InvalidExpression {
                    expression: expression.to_string(),
                    reason: format!("segment '{}' is not an identifier", segment),
                });
            }
        }

        Ok(Self { expression })
    }

    /// The property names, in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.expression.split('.')
    }

    /// The original expression.
    pub fn as_str(&self) -> &'a str {
        self.expression
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

type PropertyGetter = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Properties registered for one bean type.
struct TypeDescriptor {
    type_name: &'static str,
    properties: HashMap<&'static str, PropertyGetter>,
}

/// Thread-safe registry of bean types and their readable properties.
/// Uses DashMap for lock-free concurrent access.
#[derive(Default)]
pub struct PropertyResolver {
    types: DashMap<TypeId, TypeDescriptor>,
}

impl PropertyResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver wrapped in an Arc for sharing across models.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Describe property `name` of bean type `T`. Re-registering replaces the getter.
    pub fn register<T: Bean>(&self, name: &'static str, getter: fn(&T) -> Value) {
        let erased: PropertyGetter =
            Arc::new(move |object: &dyn Any| object.downcast_ref::<T>().map(getter));

        let mut descriptor = self
            .types
            .entry(TypeId::of::<T>())
            .or_insert_with(|| TypeDescriptor {
                type_name: short_type_name::<T>(),
                properties: HashMap::new(),
            });
        descriptor.properties.insert(name, erased);

        tracing::debug!(
            bean = descriptor.type_name,
            property = name,
            "Registered property"
        );
    }

    /// Number of registered bean types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Evaluate `expression` against `root`.
    pub fn get_value(&self, expression: &str, root: Value) -> Result<Value, LookupError> {
        let path = PropertyPath::parse(expression)?;
        path.segments()
            .try_fold(root, |current, property| self.get_property(&current, property))
    }

    /// Read one property off `object`.
    pub fn get_property(&self, object: &Value, property: &str) -> Result<Value, LookupError> {
        let bean = match object {
            Value::Bean(bean) => bean,
            Value::Text(_) => {
                return Err(LookupError::NotTraversable {
                    property: property.to_string(),
                })
            }
        };

        let any = bean.as_any();
        let descriptor =
            self.types
                .get(&any.type_id())
                .ok_or_else(|| LookupError::UnregisteredType {
                    property: property.to_string(),
                })?;

        let getter = descriptor.properties.get(property).ok_or_else(|| {
            LookupError::NoSuchProperty {
                type_name: descriptor.type_name,
                property: property.to_string(),
            }
        })?;

        (**getter)(any).ok_or_else(|| LookupError::UnregisteredType {
            property: property.to_string(),
        })
    }
}

impl fmt::Debug for PropertyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyResolver")
            .field("types", &self.types.len())
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Model evaluating a property expression against a target model's object.
///
/// The expression is re-interpreted on every read. The resolver is shared
/// state: it is neither serialized nor counted in the model's footprint.
pub struct PropertyModel<M> {
    target: M,
    expression: String,
    resolver: Arc<PropertyResolver>,
}

impl<M> PropertyModel<M>
where
    M: Model,
    M::Object: IntoValue,
{
    /// Model reading `expression` off `target`'s object.
    pub fn of(target: M, expression: impl Into<String>, resolver: Arc<PropertyResolver>) -> Self {
        Self {
            target,
            expression: expression.into(),
            resolver,
        }
    }

    /// The property expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl<M> Model for PropertyModel<M>
where
    M: Model,
    M::Object: IntoValue,
{
    type Object = Result<Value, LookupError>;

    fn get_object(&self) -> Self::Object {
        self.resolver
            .get_value(&self.expression, self.target.get_object().into_value())
    }

    fn detach(&mut self) {
        self.target.detach();
    }
}

impl<M: Clone> Clone for PropertyModel<M> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            expression: self.expression.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for PropertyModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyModel")
            .field("target", &self.target)
            .field("expression", &self.expression)
            .finish()
    }
}

impl<M: Serialize> Serialize for PropertyModel<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PropertyModel", 2)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("expression", &self.expression)?;
        state.end()
    }
}

impl<M> PropertyModel<M> {
    pub(crate) fn parts(&self) -> (&M, &String) {
        (&self.target, &self.expression)
    }
}
