//! Tri-state plan values.
//!
//! A configured attribute is either absent (`Null`), not yet resolved at plan
//! time (`Unknown`), or concretely known. Validators and normalizers only act
//! on `Known` values; the other two states pass through untouched.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON marker key used to encode an unknown value in snapshots.
pub const UNKNOWN_MARKER: &str = "$unknown";

/// An attribute value with explicit absent/pending/known states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanValue<T> {
    /// No value configured.
    Null,
    /// Value will only be known after apply.
    Unknown,
    /// Concrete value.
    Known(T),
}

impl<T> Default for PlanValue<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> PlanValue<T> {
    /// Returns true when no value is configured.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true when the value is not yet resolved.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true when the value is concretely known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Borrow the known value, if any.
    #[must_use]
    pub const fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Consume and return the known value, if any.
    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Borrow the inner value while keeping the state.
    pub const fn as_ref(&self) -> PlanValue<&T> {
        match self {
            Self::Null => PlanValue::Null,
            Self::Unknown => PlanValue::Unknown,
            Self::Known(value) => PlanValue::Known(value),
        }
    }

    /// Map the known value while keeping the state.
    pub fn map<U, F>(self, op: F) -> PlanValue<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Null => PlanValue::Null,
            Self::Unknown => PlanValue::Unknown,
            Self::Known(value) => PlanValue::Known(op(value)),
        }
    }
}

impl<T: AsRef<str>> PlanValue<T> {
    /// Borrow a known string-like value as `&str`.
    #[must_use]
    pub fn as_known_str(&self) -> Option<&str> {
        self.as_known().map(AsRef::as_ref)
    }
}

impl<T> From<T> for PlanValue<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: Serialize> Serialize for PlanValue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Unknown => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNKNOWN_MARKER, &true)?;
                map.end()
            },
            Self::Known(value) => value.serialize(serializer),
        }
    }
}

/// Snapshot values are read through `serde_json::Value` so the unknown
/// marker is recognised only as a single-entry object, and number literals
/// keep their exact text on the way into `T`.
impl<'de, T: DeserializeOwned> Deserialize<'de> for PlanValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::Null),
            Value::Object(entries) if entries.len() == 1 && entries.contains_key(UNKNOWN_MARKER) => {
                match entries.get(UNKNOWN_MARKER) {
                    Some(Value::Bool(true)) => Ok(Self::Unknown),
                    _ => Err(de::Error::custom("the $unknown marker must be set to true")),
                }
            },
            value => T::deserialize(value).map(Self::Known).map_err(de::Error::custom),
        }
    }
}
