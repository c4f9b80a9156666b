//! Business search result types and pure sorting.
//!
//! `BusinessRecord` is supplied by the place-search collaborator and treated
//! as opaque read-only input: the core only uses it for prompt grounding and
//! for relative comparisons ("closest", "best rated").

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single business returned by the place-search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Stable identifier assigned by the search provider.
    pub place_id: String,
    /// Display name of the business.
    pub name: String,
    /// Formatted street address.
    pub address: String,
    /// Average user rating, when the provider has one.
    #[serde(default)]
    pub rating: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the user in meters, when known.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Keys the caller (or the model) may sort existing results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Distance,
    Rating,
    Name,
}

impl SortKey {
    /// Parses a wire-format sort key. Unknown strings yield `None`, which
    /// callers treat as a no-op sort request.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "distance" => Some(Self::Distance),
            "rating" => Some(Self::Rating),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Reorders businesses by the given key. Pure and total: missing ratings or
/// distances sort last, ties keep their original relative order.
pub fn sort_businesses(mut businesses: Vec<BusinessRecord>, key: SortKey) -> Vec<BusinessRecord> {
    match key {
        SortKey::Distance => {
            businesses.sort_by(|a, b| compare_option_f64(a.distance, b.distance));
        }
        SortKey::Rating => {
            // Higher rating first, but unrated entries still sort last.
            businesses.sort_by(|a, b| match (a.rating, b.rating) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        SortKey::Name => {
            businesses.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }
    businesses
}

/// Compares two optional floats ascending, ordering `None` after any present
/// value. NaN ties as equal so the comparator stays total.
fn compare_option_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
