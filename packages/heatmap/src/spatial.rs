//! In-memory spatial index over listing coordinates.
//!
//! Built once from the catalog and queried on every bounds change to
//! answer "which listings are inside the viewport".

use rent_map_heatmap_models::ViewportBounds;
use rent_map_listing_models::{Listing, ListingId};
use rstar::{AABB, RTree, RTreeObject};

/// A listing position stored in the R-tree with its catalog position.
struct ListingEntry {
    /// Index into the catalog, used to restore catalog order.
    position: usize,
    id: ListingId,
    point: [f64; 2],
}

impl RTreeObject for ListingEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// R-tree of listing points keyed by `[lng, lat]`.
pub struct ListingIndex {
    tree: RTree<ListingEntry>,
}

impl ListingIndex {
    /// Indexes every listing in `listings`.
    #[must_use]
    pub fn build(listings: &[Listing]) -> Self {
        let entries = listings
            .iter()
            .enumerate()
            .map(|(position, listing)| ListingEntry {
                position,
                id: listing.id,
                point: [listing.coordinates.lng, listing.coordinates.lat],
            })
            .collect();

        let tree = RTree::bulk_load(entries);
        log::debug!("Indexed {} listings", tree.size());

        Self { tree }
    }

    /// IDs of listings inside `bounds` (edges inclusive), in catalog order.
    #[must_use]
    pub fn within(&self, bounds: &ViewportBounds) -> Vec<ListingId> {
        if bounds.west > bounds.east || bounds.south > bounds.north {
            return Vec::new();
        }

        let query_env =
            AABB::from_corners([bounds.west, bounds.south], [bounds.east, bounds.north]);

        let mut hits: Vec<&ListingEntry> = self
            .tree
            .locate_in_envelope_intersecting(&query_env)
            .collect();
        hits.sort_unstable_by_key(|entry| entry.position);

        hits.into_iter().map(|entry| entry.id).collect()
    }

    /// Number of indexed listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
