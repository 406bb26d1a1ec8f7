//! Listing catalog loaded from embedded or user-supplied TOML.

use std::collections::BTreeSet;

use rent_map_listing_models::{Listing, ListingFilter, ListingId};
use serde::Deserialize;

use crate::ListingError;

/// Sample listings embedded at compile time.
const HANOVER_TOML: &str = include_str!("../data/hanover.toml");

/// Number of embedded sample listings. Enforced by a test.
#[cfg(test)]
const EXPECTED_LISTING_COUNT: usize = 30;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    listing: Vec<Listing>,
}

/// An ordered, immutable collection of listings with unique IDs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
}

impl ListingCatalog {
    /// Returns the embedded Hanover sample catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. Since the file is a
    /// compile-time constant, a failure here is a development error and is
    /// caught by the tests below.
    #[must_use]
    pub fn hanover() -> Self {
        Self::from_toml(HANOVER_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded hanover.toml: {e}"))
    }

    /// Parses a catalog from TOML containing `[[listing]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`] if the TOML is malformed, an ID repeats, a
    /// rent is not a positive finite number, or coordinates are invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ListingError> {
        let file: CatalogFile = toml::de::from_str(toml_str)?;
        Self::new(file.listing)
    }

    /// Validates and wraps a list of listings, preserving their order.
    ///
    /// # Errors
    ///
    /// See [`Self::from_toml`].
    pub fn new(listings: Vec<Listing>) -> Result<Self, ListingError> {
        let mut seen = BTreeSet::new();

        for listing in &listings {
            if !seen.insert(listing.id) {
                return Err(ListingError::DuplicateId { id: listing.id });
            }
            if !(listing.rent.is_finite() && listing.rent > 0.0) {
                return Err(ListingError::InvalidRent {
                    id: listing.id,
                    rent: listing.rent,
                });
            }
            if !listing.coordinates.is_valid() {
                return Err(ListingError::InvalidCoordinates {
                    id: listing.id,
                    lat: listing.coordinates.lat,
                    lng: listing.coordinates.lng,
                });
            }
        }

        log::debug!("Loaded listing catalog with {} listings", listings.len());

        Ok(Self { listings })
    }

    /// Looks up a listing by ID.
    #[must_use]
    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// All listings in declaration order.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Iterates listings in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the catalog has no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings matching `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &ListingFilter) -> Vec<&Listing> {
        self.listings.iter().filter(|l| filter.matches(l)).collect()
    }
}

impl<'a> IntoIterator for &'a ListingCatalog {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_listings() {
        assert_eq!(ListingCatalog::hanover().len(), EXPECTED_LISTING_COUNT);
    }

    #[test]
    fn listing_ids_are_unique() {
        let catalog = ListingCatalog::hanover();
        let ids: BTreeSet<ListingId> = catalog.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), EXPECTED_LISTING_COUNT);
    }

    #[test]
    fn all_listings_have_required_fields() {
        for listing in &ListingCatalog::hanover() {
            assert!(!listing.name.is_empty(), "{}: name is empty", listing.id);
            assert!(listing.rent > 0.0, "{}: rent not positive", listing.id);
            assert!(listing.bedrooms > 0, "{}: no bedrooms", listing.id);
            assert!(listing.coordinates.is_valid(), "{}: bad coords", listing.id);
        }
    }

    #[test]
    fn preserves_declaration_order() {
        let catalog = ListingCatalog::hanover();
        let first: Vec<ListingId> = catalog.iter().take(3).map(|l| l.id).collect();
        assert_eq!(first, vec![5, 12, 33]);
        assert_eq!(catalog.listings().last().map(|l| l.id), Some(60));
    }

    #[test]
    fn rents_are_rounded_dollars() {
        let catalog = ListingCatalog::hanover();
        assert!((catalog.get(38).unwrap().rent - 2187.0).abs() < f64::EPSILON);
        assert!((catalog.get(5).unwrap().rent - 1871.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let toml = r#"
            [[listing]]
            id = 1
            name = "A"
            rent = 1000.0
            bedrooms = 1
            bathrooms = 1
            coordinates = { lat = 43.7, lng = -72.3 }

            [[listing]]
            id = 1
            name = "B"
            rent = 1100.0
            bedrooms = 1
            bathrooms = 1
            coordinates = { lat = 43.7, lng = -72.3 }
        "#;
        assert!(matches!(
            ListingCatalog::from_toml(toml),
            Err(ListingError::DuplicateId { id: 1 })
        ));
    }

    #[test]
    fn rejects_non_positive_rent() {
        let toml = r#"
            [[listing]]
            id = 7
            name = "Free"
            rent = 0.0
            bedrooms = 1
            bathrooms = 1
            coordinates = { lat = 43.7, lng = -72.3 }
        "#;
        assert!(matches!(
            ListingCatalog::from_toml(toml),
            Err(ListingError::InvalidRent { id: 7, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let toml = r#"
            [[listing]]
            id = 8
            name = "Nowhere"
            rent = 900.0
            bedrooms = 1
            bathrooms = 1
            coordinates = { lat = 143.7, lng = -72.3 }
        "#;
        assert!(matches!(
            ListingCatalog::from_toml(toml),
            Err(ListingError::InvalidCoordinates { id: 8, .. })
        ));
    }

    #[test]
    fn empty_file_is_empty_catalog() {
        let catalog = ListingCatalog::from_toml("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn filter_by_bedrooms() {
        let catalog = ListingCatalog::hanover();
        let two_bed = catalog.filter(&ListingFilter {
            bedrooms: Some(2),
            ..ListingFilter::default()
        });
        assert_eq!(two_bed.len(), 12);
        assert!(two_bed.iter().all(|l| l.bedrooms == 2));

        let cheap = catalog.filter(&ListingFilter {
            rent_max: 1800.0,
            ..ListingFilter::default()
        });
        assert_eq!(cheap.len(), 18);
    }
}
