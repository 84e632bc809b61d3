//! Product record, identifier and request payload.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::registry::error::RegistryError;

/// Registry-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(pub i64);

impl FromStr for ProductId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(ProductId)
            .map_err(|_| RegistryError::MalformedId(s.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored product.
///
/// Serializes as a single-key object mapping the string-encoded id to the
/// name, e.g. `{"1":"Laptop"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
        }
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id.to_string(), &self.name)?;
        map.end()
    }
}

/// Body accepted by Create and Update.
///
/// An empty `name` is stored as `None`, so it fails `required` rather than
/// `length`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "empty_as_missing")]
    #[validate(
        required(message = "name is required"),
        length(min = 4, message = "name must be at least 4 characters")
    )]
    name: Option<String>,
}

impl ProductPayload {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()).filter(|name| !name.is_empty()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn empty_as_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.filter(|name| !name.is_empty()))
}
