#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only apartment listing catalog.
//!
//! The default catalog is baked into the binary from `data/hanover.toml`
//! via [`include_str!`]. Alternative catalogs can be parsed from any TOML
//! string with the same `[[listing]]` layout. Once loaded, a catalog is
//! never mutated and is shared behind an `Arc`.

pub mod catalog;
pub mod currency;
pub mod trends;

pub use catalog::ListingCatalog;
pub use rent_map_listing_models as models;

use rent_map_listing_models::ListingId;

/// Errors that can occur while loading a listing catalog.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two listings share an ID.
    #[error("Duplicate listing id {id}")]
    DuplicateId {
        /// The repeated ID.
        id: ListingId,
    },

    /// Rent is zero, negative, or not a number.
    #[error("Listing {id} has invalid rent {rent}")]
    InvalidRent {
        /// Offending listing.
        id: ListingId,
        /// The rejected value.
        rent: f64,
    },

    /// Coordinates are outside WGS84 ranges.
    #[error("Listing {id} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        /// Offending listing.
        id: ListingId,
        /// Latitude as given.
        lat: f64,
        /// Longitude as given.
        lng: f64,
    },
}
