//! Canonical identifier shared by events, categories and users.
//!
//! Backends hand out ids as JSON numbers or JSON strings (and sometimes both
//! for the same record). Both are normalized to decimal text at
//! deserialization, so `1` and `"1"` compare equal everywhere else.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Id(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value when the id is a canonical integer (no sign, no
    /// leading zeros).
    fn as_number(&self) -> Option<u64> {
        let n = self.0.parse::<u64>().ok()?;
        (n.to_string() == self.0).then_some(n)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Id::new(s);
        if id.0.is_empty() {
            return Err("Id must not be empty".to_string());
        }
        Ok(id)
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id(n.to_string())
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::new(s)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) => ser.serialize_u64(n),
            None => ser.serialize_str(&self.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        match RawId::deserialize(de)? {
            RawId::Unsigned(n) => Ok(Id(n.to_string())),
            RawId::Signed(n) => Ok(Id(n.to_string())),
            RawId::Text(s) => Id::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}
