//! Catalog entity and request payloads exchanged with the rental service.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// A rentable vehicle record.  Owned by the service; the client only ever
/// holds it inside an immutable [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub car_id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "number_or_text")]
    pub price_per_day: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default, deserialize_with = "null_as_none")]
    pub rented_by: Option<String>,
}

impl Car {
    /// `brand model`, the text both the search filter and card titles use.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Renter name for the badge, falling back to `"User"` when the service
    /// left it blank.
    pub fn renter(&self) -> &str {
        match self.rented_by.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "User",
        }
    }
}

fn number_or_text<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(de)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn null_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.filter(|s| !s.is_empty()))
}

// ───────────────────────────────────────── snapshot ──────────

/// The collection as fetched by one refresh cycle.  Cheap to clone, never
/// mutated; a newer fetch replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(Arc<[Car]>);

impl Snapshot {
    pub fn new(cars: Vec<Car>) -> Self {
        Self(cars.into())
    }
}

impl Deref for Snapshot {
    type Target = [Car];

    fn deref(&self) -> &[Car] {
        &self.0
    }
}

// ───────────────────────────────────────── payloads ──────────

/// Body of `POST /api/cars`.  The price travels as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub price_per_day: String,
    pub image_url: String,
}

/// Body of `POST /api/rent`.  Days travel as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRequest {
    pub customer: String,
    pub car_id: String,
    pub days: String,
}

/// The only fields the client reads from a mutation reply.  Anything that
/// fails to parse becomes the empty reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
}

impl Reply {
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Non-blank server message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

/// Formats a price the way the service's numbers read: no trailing `.0`
/// for whole amounts.
pub struct Amount(pub f64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
