// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Footprint probe: serialized length and retained in-memory size.
//!
//! Retained size is the inline size of the value plus every heap allocation
//! reachable from it through [`RetainedSize`]. An `Arc` allocation reached
//! twice in one walk is counted once. Shared registries and `'static` data
//! (named function references, the property resolver) are not counted.

use std::collections::{HashMap, HashSet};
use std::mem::size_of;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::container::{Component, Container};
use crate::error::SerializationError;
use crate::fixture::{Account, Person, PersonNameModel};
use crate::model::{
    Getter, LambdaModel, LoadableModel, MapModel, Model, Supplier, SupplierModel, ValueModel,
};
use crate::property::PropertyModel;
use crate::types::ComponentId;

/// Strong and weak reference counts preceding the data in an `Arc` allocation.
const ARC_HEADER_BYTES: usize = 2 * size_of::<usize>();

/// Trailing control bytes a hash table allocates past its last bucket.
const HASH_GROUP_WIDTH: usize = 16;

/// Measured footprint of one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Length of the serde_json encoding.
    pub serialized_bytes: usize,
    /// Inline size plus reachable heap allocations.
    pub retained_bytes: usize,
}

/// Allocations already counted in the current walk.
#[derive(Debug, Default)]
pub struct Visited {
    allocations: HashSet<usize>,
}

impl Visited {
    /// Record the allocation at `address`. Returns false if already counted.
    pub fn first_visit<T: ?Sized>(&mut self, address: *const T) -> bool {
        self.allocations.insert(address as *const () as usize)
    }
}

/// Heap bytes owned by a value, excluding its inline size.
///
/// Growable buffers count their capacity, not their length. Hash tables are
/// sized from the bucket layout of the standard `HashMap`, which is an
/// estimate: allocator padding is not counted.
pub trait RetainedSize {
    fn heap_bytes(&self, visited: &mut Visited) -> usize;
}

/// Inline size plus reachable heap bytes of `value`.
pub fn retained_bytes<T: RetainedSize>(value: &T) -> usize {
    let mut visited = Visited::default();
    size_of::<T>() + value.heap_bytes(&mut visited)
}

/// Encode `value` with the probe's encoding.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(value).map_err(SerializationError::Encode)
}

/// Decode a value produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Decode)
}

/// Encode then decode `value`.
pub fn round_trip<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, SerializationError> {
    decode(&encode(value)?)
}

/// Measure serialized and retained size of `value`.
pub fn measure_footprint<T: Serialize + RetainedSize>(
    value: &T,
) -> Result<Footprint, SerializationError> {
    let serialized_bytes = encode(value)?.len();
    let retained_bytes = retained_bytes(value);
    tracing::debug!(serialized_bytes, retained_bytes, "Measured footprint");
    Ok(Footprint {
        serialized_bytes,
        retained_bytes,
    })
}

// =========================================================================
// Standard library types
// =========================================================================

impl RetainedSize for String {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        self.capacity()
    }
}

impl<T: RetainedSize> RetainedSize for Vec<T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.capacity() * size_of::<T>()
            + self
                .iter()
                .map(|item| item.heap_bytes(visited))
                .sum::<usize>()
    }
}

impl<T: RetainedSize> RetainedSize for Option<T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.as_ref().map_or(0, |value| value.heap_bytes(visited))
    }
}

impl<T: RetainedSize> RetainedSize for Arc<T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        if !visited.first_visit(Arc::as_ptr(self)) {
            return 0;
        }
        ARC_HEADER_BYTES + size_of::<T>() + (**self).heap_bytes(visited)
    }
}

impl RetainedSize for Arc<str> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        if !visited.first_visit(Arc::as_ptr(self)) {
            return 0;
        }
        ARC_HEADER_BYTES + self.len()
    }
}

impl RetainedSize for usize {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        0
    }
}

/// Buckets behind a table that reports `capacity` usable slots. Tables under
/// eight buckets keep one free; larger ones are filled to 7/8.
fn hash_buckets(capacity: usize) -> usize {
    match capacity {
        0 => 0,
        1..=7 => (capacity + 1).next_power_of_two(),
        _ => (capacity / 7 * 8).next_power_of_two(),
    }
}

/// One slot and one control byte per bucket, plus a trailing control group.
impl<K: RetainedSize, V: RetainedSize> RetainedSize for HashMap<K, V> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        let buckets = hash_buckets(self.capacity());
        let table = if buckets == 0 {
            0
        } else {
            buckets * (size_of::<(K, V)>() + 1) + HASH_GROUP_WIDTH
        };
        table
            + self
                .iter()
                .map(|(key, value)| key.heap_bytes(visited) + value.heap_bytes(visited))
                .sum::<usize>()
    }
}

// =========================================================================
// Fixtures
// =========================================================================

impl RetainedSize for Person {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.name_ref().heap_bytes(visited)
    }
}

impl RetainedSize for Account {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.person_ref().heap_bytes(visited)
    }
}

impl RetainedSize for ComponentId {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        self.capacity()
    }
}

impl RetainedSize for Component {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.id().heap_bytes(visited)
    }
}

impl RetainedSize for Container {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        let (children, index) = self.parts();
        self.id().heap_bytes(visited) + children.heap_bytes(visited) + index.heap_bytes(visited)
    }
}

// =========================================================================
// Models
// =========================================================================

impl<S, T> RetainedSize for Getter<S, T> {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        0
    }
}

impl<T> RetainedSize for Supplier<T> {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        0
    }
}

impl<T: RetainedSize> RetainedSize for ValueModel<T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.object().heap_bytes(visited)
    }
}

impl<T> RetainedSize for SupplierModel<T> {
    fn heap_bytes(&self, _visited: &mut Visited) -> usize {
        0
    }
}

impl<T: RetainedSize> RetainedSize for LoadableModel<T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.loaded().map_or(0, |object| object.heap_bytes(visited))
    }
}

impl<M: Model + RetainedSize, T> RetainedSize for LambdaModel<M, T> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.target().heap_bytes(visited)
    }
}

impl<M: Model + RetainedSize, U> RetainedSize for MapModel<M, U> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.source().heap_bytes(visited)
    }
}

impl<M: RetainedSize> RetainedSize for PersonNameModel<M> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        self.account().heap_bytes(visited)
    }
}

impl<M: RetainedSize> RetainedSize for PropertyModel<M> {
    fn heap_bytes(&self, visited: &mut Visited) -> usize {
        let (target, expression) = self.parts();
        target.heap_bytes(visited) + expression.heap_bytes(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{
        account_person_getter, account_supplier, build_container_fixture, build_property_fixture,
        fixture_resolver, person_name_getter,
    };

    #[test]
    fn test_account_round_trip() {
        let account = build_property_fixture();
        let copy = round_trip(&account).unwrap();
        assert_eq!(copy, account);
        assert_eq!(&*copy.person().name(), "John Snow");
    }

    #[test]
    fn test_value_model_round_trip() {
        let model = ValueModel::of(Arc::new(build_property_fixture()));
        let copy: ValueModel<Arc<Account>> = round_trip(&model).unwrap();
        assert_eq!(copy.get_object().person().name(), model.get_object().person().name());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<Account, _> = decode(b"not json");
        assert!(matches!(result, Err(SerializationError::Decode(_))));
    }

    #[test]
    fn test_account_retained_bytes() {
        let account = build_property_fixture();
        let expected = size_of::<Account>()
            + (ARC_HEADER_BYTES + size_of::<Person>())
            + (ARC_HEADER_BYTES + "John Snow".len());
        assert_eq!(retained_bytes(&account), expected);
    }

    #[test]
    fn test_shared_arc_counted_once() {
        let shared = Arc::new(build_property_fixture());
        let pair = vec![ValueModel::of(shared.clone()), ValueModel::of(shared)];
        let single = retained_bytes(&ValueModel::of(Arc::new(build_property_fixture())));
        let both = retained_bytes(&pair);
        // Two inline models, one account allocation.
        assert_eq!(
            both,
            size_of::<Vec<ValueModel<Arc<Account>>>>()
                + pair.capacity() * size_of::<ValueModel<Arc<Account>>>()
                + (single - size_of::<ValueModel<Arc<Account>>>())
        );
    }

    #[test]
    fn test_loadable_model_footprint_grows_when_attached() {
        let model = LoadableModel::of(account_supplier());
        let detached = measure_footprint(&model).unwrap();
        model.get_object();
        let attached = measure_footprint(&model).unwrap();
        assert_eq!(detached.serialized_bytes, attached.serialized_bytes);
        assert!(attached.retained_bytes > detached.retained_bytes);
    }

    #[test]
    fn test_chained_model_footprint() {
        let root = ValueModel::of(Arc::new(build_property_fixture()));
        let chained = root
            .clone()
            .map(account_person_getter())
            .map(person_name_getter());
        let root_footprint = measure_footprint(&root).unwrap();
        let chained_footprint = measure_footprint(&chained).unwrap();
        assert!(chained_footprint.serialized_bytes > root_footprint.serialized_bytes);
        assert!(chained_footprint.retained_bytes >= root_footprint.retained_bytes);
    }

    #[test]
    fn test_property_model_excludes_resolver() {
        let root = ValueModel::of(Arc::new(build_property_fixture()));
        let model = PropertyModel::of(root.clone(), "person.name", fixture_resolver());
        let expected = size_of::<PropertyModel<ValueModel<Arc<Account>>>>()
            + (retained_bytes(&root) - size_of::<ValueModel<Arc<Account>>>())
            + "person.name".len();
        assert_eq!(retained_bytes(&model), expected);
    }

    #[test]
    fn test_hash_buckets() {
        assert_eq!(hash_buckets(0), 0);
        assert_eq!(hash_buckets(3), 4);
        assert_eq!(hash_buckets(7), 8);
        assert_eq!(hash_buckets(14), 16);
        assert_eq!(hash_buckets(114_688), 131_072);
    }

    #[test]
    fn test_hash_map_counts_buckets() {
        let empty: HashMap<usize, usize> = HashMap::new();
        assert_eq!(retained_bytes(&empty), size_of::<HashMap<usize, usize>>());

        let map: HashMap<usize, usize> = (0..10).map(|i| (i, i)).collect();
        let buckets = hash_buckets(map.capacity());
        assert!(buckets > map.capacity());
        assert_eq!(
            retained_bytes(&map),
            size_of::<HashMap<usize, usize>>()
                + buckets * (size_of::<(usize, usize)>() + 1)
                + HASH_GROUP_WIDTH
        );
    }

    #[test]
    fn test_component_id_counts_capacity() {
        let mut text = String::with_capacity(32);
        text.push_str("child");
        let capacity = text.capacity();
        let id = ComponentId::new(text).unwrap();
        assert_eq!(retained_bytes(&id), size_of::<ComponentId>() + capacity);
    }

    #[test]
    fn test_container_footprint() {
        let fixture = build_container_fixture(100);
        let children: Vec<Component> = fixture.container.iter().cloned().collect();
        let footprint = measure_footprint(&children).unwrap();
        assert!(footprint.serialized_bytes > 100);
        assert!(retained_bytes(&fixture.container) > 100 * size_of::<Component>());
    }
}
