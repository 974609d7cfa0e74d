//! Modelbench Core Library
//!
//! Fixtures, models and accessor strategies measured by the modelbench
//! harness. Provides the model abstraction, the dynamic property resolver,
//! the component container with its lookup strategies, run configuration
//! and the footprint probe.

pub mod accessor;
pub mod config;
pub mod container;
pub mod error;
pub mod fixture;
pub mod footprint;
pub mod model;
pub mod property;
pub mod types;

// Re-export commonly used types
pub use accessor::{PropertyAccessors, PropertyStrategy, PERSON_NAME_EXPRESSION};
pub use config::{BenchConfig, ConfigLoader, FixtureConfig, Isolation, Mode, RunOptions};
pub use container::{find, Component, Container, LookupStrategy};
pub use error::{
    BenchError, BenchResult, ConfigurationError, ContainerError, LookupError, SerializationError,
};
pub use fixture::{
    build_container_fixture, build_property_fixture, build_property_fixture_named,
    fixture_resolver, Account, ContainerFixture, Person,
};
pub use footprint::{measure_footprint, retained_bytes, round_trip, Footprint, RetainedSize};
pub use model::{
    Getter, LambdaModel, LoadableModel, MapModel, Model, Supplier, SupplierModel, ValueModel,
};
pub use property::{PropertyModel, PropertyPath, PropertyResolver, Value};
pub use types::{ComponentId, Count, TimeWindow};
