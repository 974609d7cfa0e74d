// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Property access strategies over the account fixture.
//!
//! [`PropertyAccessors`] builds one model per [`PropertyStrategy`] at setup
//! time. Every strategy must yield the same name for the same fixture; that
//! is checked by [`PropertyAccessors::verify`] before anything is timed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, LookupError};
use crate::fixture::{
    account_person_getter, account_person_name_getter, person_name_getter, Account, Person,
    PersonNameModel,
};
use crate::model::{LambdaModel, MapModel, Model};
use crate::property::{PropertyModel, PropertyResolver};

/// Expression the property strategy evaluates.
pub const PERSON_NAME_EXPRESSION: &str = "person.name";

/// Strategies for reading `account.person.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStrategy {
    /// Inline dereference of the root model object.
    Native,
    /// Hand-written read-only model.
    ReadOnly,
    /// One getter for the whole expression.
    DirectLambda,
    /// `root.map(person).map(name)`.
    Chained,
    /// `LambdaModel::of(root, person).map(name)`.
    LambdaChained,
    /// Dotted expression interpreted on every read.
    Property,
}

impl PropertyStrategy {
    /// All strategies, in report order.
    pub const ALL: [PropertyStrategy; 6] = [
        PropertyStrategy::Native,
        PropertyStrategy::ReadOnly,
        PropertyStrategy::DirectLambda,
        PropertyStrategy::Chained,
        PropertyStrategy::LambdaChained,
        PropertyStrategy::Property,
    ];

    /// Benchmark name of the strategy.
    pub fn benchmark_name(&self) -> &'static str {
        match self {
            PropertyStrategy::Native => "native_evaluation",
            PropertyStrategy::ReadOnly => "read_only_model",
            PropertyStrategy::DirectLambda => "direct_lambda_model",
            PropertyStrategy::Chained => "chained_model",
            PropertyStrategy::LambdaChained => "chained_lambda_model",
            PropertyStrategy::Property => "property_model",
        }
    }

    /// Strategy for a benchmark name.
    pub fn from_benchmark_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.benchmark_name() == name)
    }
}

impl fmt::Display for PropertyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.benchmark_name())
    }
}

/// One model per strategy, all reading from the same root model.
#[derive(Debug, Clone)]
pub struct PropertyAccessors<M: Model<Object = Arc<Account>>> {
    pub root: M,
    pub read_only: PersonNameModel<M>,
    pub direct_lambda: LambdaModel<M, Arc<str>>,
    pub chained: MapModel<MapModel<M, Arc<Person>>, Arc<str>>,
    pub lambda_chained: MapModel<LambdaModel<M, Arc<Person>>, Arc<str>>,
    pub property: PropertyModel<M>,
}

impl<M> PropertyAccessors<M>
where
    M: Model<Object = Arc<Account>> + Clone,
{
    /// Build every strategy over `root`.
    pub fn new(root: M, resolver: Arc<PropertyResolver>) -> Self {
        Self {
            read_only: PersonNameModel::new(root.clone()),
            direct_lambda: LambdaModel::of(root.clone(), account_person_name_getter()),
            chained: root
                .clone()
                .map(account_person_getter())
                .map(person_name_getter()),
            lambda_chained: LambdaModel::of(root.clone(), account_person_getter())
                .map(person_name_getter()),
            property: PropertyModel::of(root.clone(), PERSON_NAME_EXPRESSION, resolver),
            root,
        }
    }

    /// Inline evaluation against the root model.
    #[inline]
    pub fn native(&self) -> Arc<str> {
        self.root.get_object().person().name()
    }

    /// Evaluate `strategy` once.
    pub fn evaluate(&self, strategy: PropertyStrategy) -> Result<Arc<str>, LookupError> {
        match strategy {
            PropertyStrategy::Native => Ok(self.native()),
            PropertyStrategy::ReadOnly => Ok(self.read_only.get_object()),
            PropertyStrategy::DirectLambda => Ok(self.direct_lambda.get_object()),
            PropertyStrategy::Chained => Ok(self.chained.get_object()),
            PropertyStrategy::LambdaChained => Ok(self.lambda_chained.get_object()),
            PropertyStrategy::Property => self.property.get_object()?.into_text(),
        }
    }

    /// Check that every strategy yields the same value. Returns that value.
    pub fn verify(&self) -> Result<Arc<str>, BenchError> {
        let expected = self.native();
        for strategy in PropertyStrategy::ALL {
            let actual = self.evaluate(strategy)?;
            if actual != expected {
                return Err(BenchError::Verification {
                    suite: "property_access",
                    message: format!(
                        "{} returned '{}', native evaluation returned '{}'",
                        strategy, actual, expected
                    ),
                });
            }
        }
        Ok(expected)
    }

    /// Release cached state in every model.
    pub fn detach(&mut self) {
        self.root.detach();
        self.read_only.detach();
        self.direct_lambda.detach();
        self.chained.detach();
        self.lambda_chained.detach();
        self.property.detach();
    }
}
