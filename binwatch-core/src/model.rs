//! Domain data structures for alerts, bins, and demo cities.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category given to alerts reported without one.
pub const DEFAULT_ALERT_CATEGORY: &str = "waste";

/// Cities that ship with a demo dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoCity {
    /// Delhi, India. Also the fallback for unknown keys.
    Delhi,
    /// Mumbai, India.
    Mumbai,
    /// Bangalore, India.
    Bangalore,
    /// Chennai, India.
    Chennai,
    /// Kolkata, India.
    Kolkata,
}

impl DemoCity {
    /// Every demo city, in catalog order.
    pub const ALL: [DemoCity; 5] = [
        DemoCity::Delhi,
        DemoCity::Mumbai,
        DemoCity::Bangalore,
        DemoCity::Chennai,
        DemoCity::Kolkata,
    ];

    /// Lower-case key used on the wire.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DemoCity::Delhi => "delhi",
            DemoCity::Mumbai => "mumbai",
            DemoCity::Bangalore => "bangalore",
            DemoCity::Chennai => "chennai",
            DemoCity::Kolkata => "kolkata",
        }
    }

    /// Match a wire key exactly (after trimming). Returns `None` for unknown keys.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|city| city.key() == key)
    }
}

impl fmt::Display for DemoCity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.key())
    }
}

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                raw.trim().parse().map($name)
            }
        }
    };
}

numeric_id!(
    /// Identifier of an alert.
    AlertId
);
numeric_id!(
    /// Identifier of a bin.
    BinId
);

/// Lifecycle state of an alert. Alerts are only ever created active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Reported and not yet handled.
    Active,
}

/// A reported waste or pollution incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique identifier.
    pub id: AlertId,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Free-form category tag such as `waste`.
    #[serde(rename = "type")]
    pub category: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Current status.
    pub status: AlertStatus,
}

impl Alert {
    /// Location of the alert.
    #[must_use]
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Operational status of a bin.
///
/// Only `active` and `maintenance` have names; any other string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinStatus {
    /// In service.
    Active,
    /// Temporarily out of service.
    Maintenance,
    /// Caller-supplied status without a dedicated variant.
    Other(String),
}

impl BinStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            BinStatus::Active => "active",
            BinStatus::Maintenance => "maintenance",
            BinStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for BinStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => BinStatus::Active,
            "maintenance" => BinStatus::Maintenance,
            _ => BinStatus::Other(raw),
        }
    }
}

impl From<&str> for BinStatus {
    fn from(raw: &str) -> Self {
        BinStatus::from(raw.to_owned())
    }
}

impl From<BinStatus> for String {
    fn from(status: BinStatus) -> Self {
        match status {
            BinStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A physical waste-collection container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Unique identifier.
    pub id: BinId,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Operational status.
    pub status: BinStatus,
}

impl Bin {
    /// Location of the bin.
    #[must_use]
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bin_status_round_trips_verbatim() {
        let bin = Bin {
            id: BinId(7),
            lat: 1.0,
            lng: 2.0,
            status: BinStatus::from("Needs Emptying"),
        };

        let json = serde_json::to_value(&bin).expect("serialize bin");
        assert_eq!(json["status"], "Needs Emptying");
        assert_eq!(json["id"], 7);

        let back: Bin = serde_json::from_value(json).expect("deserialize bin");
        assert_eq!(back.status, BinStatus::Other("Needs Emptying".to_owned()));
    }

    #[test]
    fn known_statuses_map_to_variants() {
        assert_eq!(BinStatus::from("active"), BinStatus::Active);
        assert_eq!(BinStatus::from("maintenance"), BinStatus::Maintenance);
        assert_eq!(String::from(BinStatus::Maintenance), "maintenance");
    }

    #[test]
    fn alert_category_is_sent_as_type() {
        let alert = Alert {
            id: AlertId(1),
            lat: 0.0,
            lng: 0.0,
            category: "smoke".to_owned(),
            timestamp: Utc::now(),
            status: AlertStatus::Active,
        };

        let json = serde_json::to_value(&alert).expect("serialize alert");
        assert_eq!(json["type"], "smoke");
        assert_eq!(json["status"], "active");
        assert!(json.get("category").is_none(), "category must not leak");
    }

    #[test]
    fn city_keys_are_exact() {
        assert_eq!(DemoCity::from_key("mumbai"), Some(DemoCity::Mumbai));
        assert_eq!(DemoCity::from_key(" kolkata "), Some(DemoCity::Kolkata));
        assert_eq!(DemoCity::from_key("atlantis"), None);
        assert_eq!(DemoCity::Chennai.to_string(), "chennai");
    }

    #[test]
    fn ids_parse_from_path_segments() {
        assert_eq!("42".parse::<BinId>(), Ok(BinId(42)));
        assert!("abc".parse::<AlertId>().is_err());
    }
}
