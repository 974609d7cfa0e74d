// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Ordered component container and the child lookup strategies.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ContainerError;
use crate::types::ComponentId;

/// A leaf component, identified within its parent by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
}

impl Component {
    /// Create a component with `id`.
    pub fn new(id: ComponentId) -> Self {
        Self { id }
    }

    /// The component id.
    pub fn id(&self) -> &ComponentId {
        &self.id
    }
}

/// Container keeping children in insertion order plus an id index.
#[derive(Debug, Clone)]
pub struct Container {
    id: ComponentId,
    children: Vec<Component>,
    index: HashMap<ComponentId, usize>,
}

impl Container {
    /// Create an empty container.
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty container with room for `capacity` children.
    pub fn with_capacity(id: ComponentId, capacity: usize) -> Self {
        Self {
            id,
            children: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// The container id.
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Append `child`. Fails if a child with the same id is already present.
    pub fn add(&mut self, child: Component) -> Result<&mut Self, ContainerError> {
        if self.index.contains_key(child.id.as_str()) {
            return Err(ContainerError::DuplicateChild {
                container: self.id.to_string(),
                id: child.id.to_string(),
            });
        }
        self.push(child);
        Ok(self)
    }

    /// Append a child whose id is known to be unique.
    pub(crate) fn push_unique(&mut self, child: Component) {
        debug_assert!(!self.index.contains_key(child.id.as_str()));
        self.push(child);
    }

    fn push(&mut self, child: Component) {
        self.index.insert(child.id.clone(), self.children.len());
        self.children.push(child);
    }

    /// Indexed lookup by id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&position| &self.children[position])
    }

    /// Children in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.children.iter()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn parts(&self) -> (&Vec<Component>, &HashMap<ComponentId, usize>) {
        (&self.children, &self.index)
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Strategies for retrieving a child by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Hash lookup through the id index.
    Indexed,
    /// In-order scan, stopping at the first match.
    Iterator,
    /// Lazy filter over all children, first match or none.
    Stream,
}

impl LookupStrategy {
    /// All strategies, in report order.
    pub const ALL: [LookupStrategy; 3] = [
        LookupStrategy::Indexed,
        LookupStrategy::Iterator,
        LookupStrategy::Stream,
    ];

    /// Benchmark name of the strategy.
    pub fn benchmark_name(&self) -> &'static str {
        match self {
            LookupStrategy::Indexed => "retrieve_component_using_get",
            LookupStrategy::Iterator => "retrieve_component_using_iterator",
            LookupStrategy::Stream => "retrieve_component_using_stream",
        }
    }

    /// Strategy for a benchmark name.
    pub fn from_benchmark_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.benchmark_name() == name)
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.benchmark_name())
    }
}

/// Find the child with `id` using `strategy`.
#[inline]
pub fn find<'a>(
    container: &'a Container,
    id: &str,
    strategy: LookupStrategy,
) -> Option<&'a Component> {
    match strategy {
        LookupStrategy::Indexed => find_indexed(container, id),
        LookupStrategy::Iterator => find_iterating(container, id),
        LookupStrategy::Stream => find_streaming(container, id),
    }
}

#[inline]
pub fn find_indexed<'a>(container: &'a Container, id: &str) -> Option<&'a Component> {
    container.get(id)
}

#[inline]
#[allow(clippy::manual_find)]
pub fn find_iterating<'a>(container: &'a Container, id: &str) -> Option<&'a Component> {
    for component in container {
        if component.id.as_str() == id {
            return Some(component);
        }
    }
    None
}

#[inline]
#[allow(clippy::filter_next)]
pub fn find_streaming<'a>(container: &'a Container, id: &str) -> Option<&'a Component> {
    container
        .iter()
        .filter(|component| component.id.as_str() == id)
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_of(ids: &[&str]) -> Container {
        let mut container = Container::new(ComponentId::new("page").unwrap());
        for id in ids {
            container
                .add(Component::new(ComponentId::new(*id).unwrap()))
                .unwrap();
        }
        container
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut container = container_of(&["a", "b"]);
        let err = container
            .add(Component::new(ComponentId::new("a").unwrap()))
            .unwrap_err();
        assert_eq!(
            err,
            ContainerError::DuplicateChild {
                container: "page".to_string(),
                id: "a".to_string(),
            }
        );
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_strategies_agree() {
        let container = container_of(&["x", "y", "z"]);
        for strategy in LookupStrategy::ALL {
            let found = find(&container, "y", strategy).unwrap();
            assert!(std::ptr::eq(found, container.get("y").unwrap()));
            assert!(find(&container, "missing", strategy).is_none());
        }
    }

    #[test]
    fn test_insertion_order() {
        let container = container_of(&["3", "1", "2"]);
        let ids: Vec<&str> = container.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_benchmark_names() {
        for strategy in LookupStrategy::ALL {
            assert_eq!(
                LookupStrategy::from_benchmark_name(strategy.benchmark_name()),
                Some(strategy)
            );
        }
        assert_eq!(LookupStrategy::from_benchmark_name("nope"), None);
    }
}
