// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fixtures shared by every strategy in a run.
//!
//! Fixture construction is deterministic and happens once per setup phase,
//! never inside a timed region.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::container::{Component, Container};
use crate::model::{Getter, Model, Supplier};
use crate::property::{Bean, PropertyResolver, Value};
use crate::types::ComponentId;

/// Name every default fixture carries.
pub const DEFAULT_NAME: &str = "John Snow";

/// Id of the root container in the lookup fixture.
pub const CONTAINER_ID: &str = "page";

/// Root of the property fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    person: Arc<Person>,
}

impl Account {
    /// Account owning `person`.
    pub fn new(person: Person) -> Self {
        Self {
            person: Arc::new(person),
        }
    }

    #[inline]
    pub fn person(&self) -> Arc<Person> {
        Arc::clone(&self.person)
    }

    pub(crate) fn person_ref(&self) -> &Arc<Person> {
        &self.person
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(Person::default())
    }
}

impl Bean for Account {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The nested record holding the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: Arc<str>,
}

impl Person {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    pub(crate) fn name_ref(&self) -> &Arc<str> {
        &self.name
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Bean for Person {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Build the default property fixture.
pub fn build_property_fixture() -> Account {
    Account::default()
}

/// Build a property fixture whose person carries `name`.
pub fn build_property_fixture_named(name: &str) -> Account {
    Account::new(Person::new(name))
}

fn new_account() -> Arc<Account> {
    Arc::new(build_property_fixture())
}

fn account_person(account: &Arc<Account>) -> Arc<Person> {
    account.person()
}

fn person_name(person: &Arc<Person>) -> Arc<str> {
    person.name()
}

fn account_person_name(account: &Arc<Account>) -> Arc<str> {
    account.person().name()
}

/// Supplier creating a fresh default account.
pub fn account_supplier() -> Supplier<Arc<Account>> {
    Supplier::new("Account::new", new_account)
}

/// Getter for `Account::person`.
pub fn account_person_getter() -> Getter<Arc<Account>, Arc<Person>> {
    Getter::new("Account::person", account_person)
}

/// Getter for `Person::name`.
pub fn person_name_getter() -> Getter<Arc<Person>, Arc<str>> {
    Getter::new("Person::name", person_name)
}

/// Getter for the combined `account.person().name()` expression.
pub fn account_person_name_getter() -> Getter<Arc<Account>, Arc<str>> {
    Getter::new("Account::person::name", account_person_name)
}

/// Describe the fixture types to `resolver`.
pub fn register_fixture_types(resolver: &PropertyResolver) {
    resolver.register::<Account>("person", |account| Value::bean(account.person()));
    resolver.register::<Person>("name", |person| Value::text(person.name()));
}

/// Resolver describing the fixture types.
pub fn fixture_resolver() -> Arc<PropertyResolver> {
    let resolver = PropertyResolver::new_shared();
    register_fixture_types(&resolver);
    resolver
}

/// Hand-written read-only model evaluating `account.person().name()`.
#[derive(Debug, Clone, Serialize)]
pub struct PersonNameModel<M> {
    account: M,
}

impl<M: Model<Object = Arc<Account>>> PersonNameModel<M> {
    pub fn new(account: M) -> Self {
        Self { account }
    }
}

impl<M: Model<Object = Arc<Account>>> Model for PersonNameModel<M> {
    type Object = Arc<str>;

    #[inline]
    fn get_object(&self) -> Arc<str> {
        self.account.get_object().person().name()
    }

    fn detach(&mut self) {
        self.account.detach();
    }
}

impl<M> PersonNameModel<M> {
    pub(crate) fn account(&self) -> &M {
        &self.account
    }
}

/// Container fixture plus the id every lookup strategy searches for.
#[derive(Debug, Clone)]
pub struct ContainerFixture {
    pub container: Container,
    pub target: ComponentId,
}

/// Build a container of `children` components with ids `"0".."children-1"`.
/// The target is the middle id, `children / 2`.
pub fn build_container_fixture(children: usize) -> ContainerFixture {
    let mut container =
        Container::with_capacity(ComponentId::new_unchecked(CONTAINER_ID), children);
    for index in 0..children {
        container.push_unique(Component::new(ComponentId::from_index(index)));
    }

    tracing::debug!(children, "Built container fixture");

    ContainerFixture {
        container,
        target: ComponentId::from_index(children / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{find, LookupStrategy};
    use crate::model::ValueModel;

    #[test]
    fn test_default_fixture() {
        let account = build_property_fixture();
        assert_eq!(&*account.person().name(), DEFAULT_NAME);
        assert_eq!(build_property_fixture(), account);
    }

    #[test]
    fn test_person_name_model() {
        let model = PersonNameModel::new(ValueModel::of(Arc::new(build_property_fixture())));
        assert_eq!(&*model.get_object(), "John Snow");
    }

    #[test]
    fn test_fixture_resolver() {
        let resolver = fixture_resolver();
        assert_eq!(resolver.type_count(), 2);
        let root = Value::bean(Arc::new(build_property_fixture_named("Arya Stark")));
        let name = resolver
            .get_value("person.name", root)
            .unwrap()
            .into_text()
            .unwrap();
        assert_eq!(&*name, "Arya Stark");
    }

    #[test]
    fn test_container_fixture() {
        let fixture = build_container_fixture(10);
        assert_eq!(fixture.container.len(), 10);
        assert_eq!(fixture.target.as_str(), "5");
        let found = find(&fixture.container, fixture.target.as_str(), LookupStrategy::Iterator)
            .unwrap();
        assert_eq!(found.id().as_str(), "5");
    }

    #[test]
    fn test_empty_container_fixture() {
        let fixture = build_container_fixture(0);
        assert!(fixture.container.is_empty());
        assert_eq!(fixture.target.as_str(), "0");
        for strategy in LookupStrategy::ALL {
            assert!(find(&fixture.container, "0", strategy).is_none());
        }
    }
}
