//! Location - table / takeaway parcel identity
//!
//! A location keys one independently open cart. Tables and parcels are
//! a tagged value type rather than free-text labels, so the rest of the
//! system never has to sniff string prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location kind, recorded on finalized orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Table,
    Parcel,
}

/// A dine-in table or a takeaway parcel slot
///
/// Serialized as the display label ("Table 3", "Parcel 2") so the wire
/// format matches what receipts and order rows store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    Table(u8),
    Parcel(u8),
}

impl Location {
    pub fn location_type(&self) -> LocationType {
        match self {
            Location::Table(_) => LocationType::Table,
            Location::Parcel(_) => LocationType::Parcel,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Location::Table(n) | Location::Parcel(n) => *n,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Table(n) => write!(f, "Table {}", n),
            Location::Parcel(n) => write!(f, "Parcel {}", n),
        }
    }
}

/// Error parsing a location label
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Invalid location label: {0}")]
pub struct ParseLocationError(pub String);

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, num) = s
            .rsplit_once(' ')
            .ok_or_else(|| ParseLocationError(s.to_string()))?;
        let n: u8 = num.parse().map_err(|_| ParseLocationError(s.to_string()))?;
        if n == 0 {
            return Err(ParseLocationError(s.to_string()));
        }
        match kind {
            "Table" => Ok(Location::Table(n)),
            "Parcel" => Ok(Location::Parcel(n)),
            _ => Err(ParseLocationError(s.to_string())),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for loc in [Location::Table(3), Location::Parcel(10)] {
            let label = loc.to_string();
            assert_eq!(label.parse::<Location>().unwrap(), loc);
        }
    }

    #[test]
    fn test_rejects_garbage_labels() {
        assert!("Table".parse::<Location>().is_err());
        assert!("Table zero".parse::<Location>().is_err());
        assert!("Table 0".parse::<Location>().is_err());
        assert!("Booth 4".parse::<Location>().is_err());
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&Location::Parcel(2)).unwrap();
        assert_eq!(json, "\"Parcel 2\"");
        let loc: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, Location::Parcel(2));
    }

    #[test]
    fn test_location_type() {
        assert_eq!(Location::Table(1).location_type(), LocationType::Table);
        assert_eq!(Location::Parcel(1).location_type(), LocationType::Parcel);
    }
}
