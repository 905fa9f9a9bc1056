//! Serde adapter writing snowflake ids as JSON strings.
//!
//! 64-bit ids overflow JavaScript numbers, so they travel as strings.
//! Deserialization accepts either form.

use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<i64, E> {
        match self {
            RawId::Number(n) => Ok(n),
            RawId::Text(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    RawId::deserialize(deserializer)?.into_id()
}

/// Same adapter for optional ids.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Option::<RawId>::deserialize(deserializer)?
            .map(RawId::into_id)
            .transpose()
    }
}
