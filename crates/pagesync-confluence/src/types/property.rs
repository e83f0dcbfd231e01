//! Confluence content property types.

use serde::{Deserialize, Serialize};

/// Page-scoped versioned key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageProperty {
    /// Property ID.
    #[serde(default)]
    pub id: String,
    /// Property key.
    #[serde(default)]
    pub key: String,
    /// Property value (any JSON; pagesync writes strings).
    #[serde(default)]
    pub value: serde_json::Value,
    /// Property version.
    #[serde(default)]
    pub version: PropertyVersion,
}

impl PageProperty {
    /// Property value if it is a string.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Property version number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyVersion {
    /// Version number.
    pub number: u32,
}

impl PropertyVersion {
    /// The version a write following this one must carry.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            number: self.number + 1,
        }
    }
}

/// Property write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePropertyInput {
    /// New value.
    pub value: String,
    /// Version of this write.
    pub version: PropertyVersion,
}

impl PagePropertyInput {
    /// Write to an existing property at the given version.
    pub fn new(value: impl Into<String>, version: PropertyVersion) -> Self {
        Self {
            value: value.into(),
            version,
        }
    }

    /// First write of a property that does not exist yet.
    pub fn new_property(value: impl Into<String>) -> Self {
        Self::new(value, PropertyVersion { number: 1 })
    }
}
