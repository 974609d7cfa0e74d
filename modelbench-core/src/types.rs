// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::borrow::Borrow;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ContainerError};

/// Separator between component ids in a component path.
pub const PATH_SEPARATOR: char = ':';

/// A strictly positive count (iterations, forks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Count(u32);

impl Count {
    /// Create a new Count, rejecting zero.
    pub fn new(field: &'static str, value: u32) -> Result<Self, ConfigurationError> {
        if value == 0 {
            return Err(ConfigurationError::NonPositive {
                field,
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Create without validation (for trusted non-zero literals).
    pub(crate) const fn new_unchecked(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Count {
    type Error = ConfigurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new("count", value)
    }
}

impl From<Count> for u32 {
    fn from(count: Count) -> Self {
        count.0
    }
}

/// A strictly positive time window, stored with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TimeWindow(u64);

impl TimeWindow {
    /// Create a window from milliseconds, rejecting zero.
    pub fn from_millis(field: &'static str, millis: u64) -> Result<Self, ConfigurationError> {
        if millis == 0 {
            return Err(ConfigurationError::NonPositive {
                field,
                value: format!("{}ms", millis),
            });
        }
        Ok(Self(millis))
    }

    pub(crate) const fn from_millis_unchecked(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a window from whole seconds, rejecting zero.
    pub fn from_secs(field: &'static str, secs: u64) -> Result<Self, ConfigurationError> {
        Self::from_millis(field, secs.saturating_mul(1000))
    }

    /// Window length in milliseconds.
    pub fn millis(&self) -> u64 {
        self.0
    }

    /// Window length as a Duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}s", self.0 / 1000)
        } else {
            write!(f, "{}ms", self.0)
        }
    }
}

impl TryFrom<u64> for TimeWindow {
    type Error = ConfigurationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_millis("time_window_ms", value)
    }
}

impl From<TimeWindow> for u64 {
    fn from(window: TimeWindow) -> Self {
        window.0
    }
}

/// Validated component identifier.
/// Must be non-empty and must not contain the path separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new ComponentId with validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ContainerError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ContainerError::InvalidComponentId {
                id,
                reason: "component id cannot be empty",
            });
        }

        if id.contains(PATH_SEPARATOR) {
            return Err(ContainerError::InvalidComponentId {
                id,
                reason: "component id cannot contain the path separator ':'",
            });
        }

        Ok(Self(id))
    }

    /// Create without validation (for trusted literals).
    pub(crate) fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the child at `index`: its decimal representation.
    pub fn from_index(index: usize) -> Self {
        Self(index.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes allocated for the id text.
    pub(crate) fn capacity(&self) -> usize {
        self.0.capacity()
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ComponentId {
    type Error = ContainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComponentId> for String {
    fn from(id: ComponentId) -> Self {
        id.0
    }
}
