use crate::config::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Long-read sequencing technology of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    HiFi,
    Ont,
}

impl Technology {
    pub fn name(&self) -> &'static str {
        match self {
            Technology::HiFi => "HiFi",
            Technology::Ont => "ONT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HiFi" | "hifi" | "HIFI" => Some(Technology::HiFi),
            "ONT" | "ont" => Some(Technology::Ont),
            _ => None,
        }
    }
}

impl FromStr for Technology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::InvalidTechnology(s.to_string()))
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Technology {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Technology {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
