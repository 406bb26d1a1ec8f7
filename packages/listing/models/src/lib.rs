#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Apartment listing types.
//!
//! A [`Listing`] is created once when the catalog loads and is never
//! mutated afterwards. Everything downstream (the heatmap pipeline, the
//! comparison filter, the trends summary) borrows listings read-only.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Approximate USD to KRW exchange rate used for display.
pub const USD_TO_KRW: f64 = 1300.0;

/// Unique listing identifier.
pub type ListingId = u32;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// An apartment listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing ID.
    pub id: ListingId,
    /// Street address / unit label.
    pub name: String,
    /// Monthly rent in USD.
    pub rent: f64,
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Location of the building.
    pub coordinates: Coordinates,
}

/// Display currency for rents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    /// US dollars (the unit rents are stored in).
    #[default]
    Usd,
    /// Korean won, converted with [`USD_TO_KRW`].
    Krw,
}

impl Currency {
    /// Converts a USD amount into this currency.
    #[must_use]
    pub fn convert(self, usd: f64) -> f64 {
        match self {
            Self::Usd => usd,
            Self::Krw => usd * USD_TO_KRW,
        }
    }

    /// Symbol prefixed to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Krw => "₩",
        }
    }
}

/// Filter criteria for the listing comparison grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingFilter {
    /// Inclusive lower rent bound (USD).
    pub rent_min: f64,
    /// Inclusive upper rent bound (USD).
    pub rent_max: f64,
    /// Exact bedroom count (`None` = any).
    pub bedrooms: Option<u8>,
    /// Exact bathroom count (`None` = any).
    pub bathrooms: Option<u8>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            rent_min: 0.0,
            rent_max: 3000.0,
            bedrooms: None,
            bathrooms: None,
        }
    }
}

impl ListingFilter {
    /// Whether `listing` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.rent >= self.rent_min
            && listing.rent <= self.rent_max
            && self.bedrooms.is_none_or(|b| listing.bedrooms == b)
            && self.bathrooms.is_none_or(|b| listing.bathrooms == b)
    }
}

/// Aggregate rent statistics across a set of listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsSummary {
    /// Number of listings summarized.
    pub total: usize,
    /// Mean rent (0 when empty).
    pub average_rent: f64,
    /// Lowest rent (0 when empty).
    pub min_rent: f64,
    /// Highest rent (0 when empty).
    pub max_rent: f64,
    /// Per-bedroom-count breakdown, ascending by bedrooms.
    pub by_bedrooms: Vec<BedroomGroup>,
}

/// Rent statistics for listings sharing a bedroom count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedroomGroup {
    /// Bedroom count.
    pub bedrooms: u8,
    /// Listings in the group.
    pub count: usize,
    /// Mean rent of the group.
    pub average_rent: f64,
    /// Share of all summarized listings, in percent.
    pub percentage: f64,
}
