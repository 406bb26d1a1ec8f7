//! Selection and visible-set reducer.
//!
//! All map interaction reduces to three messages: a listing was clicked,
//! the viewport changed, or the user cleared the selection. The reducer
//! keeps the visible set consistent with the selection:
//!
//! | Message                     | Selection    | Result                                |
//! |-----------------------------|--------------|---------------------------------------|
//! | `ListingClicked(id)`        | any          | `Selected(id)`, visible = `{id}`      |
//! | `BoundsChanged`, user       | `Selected`   | `None`, visible from new bounds       |
//! | `BoundsChanged`, programmatic | `Selected` | unchanged                             |
//! | `BoundsChanged`             | `None`       | visible from new bounds               |
//! | `Deselect`                  | any          | `None`, visible from last known bounds |

use std::sync::Arc;

use rent_map_heatmap_models::{BoundsChange, SelectionState, ViewportBounds};
use rent_map_listing::ListingCatalog;
use rent_map_listing_models::{Listing, ListingId};

use crate::spatial::ListingIndex;

/// Input to [`SelectionCoordinator::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapMessage {
    /// A map pin or listing card was clicked.
    ListingClicked(ListingId),
    /// The bounds tracker emitted.
    BoundsChanged(BoundsChange),
    /// The user cleared the selection.
    Deselect,
}

/// Owns the selection state and the visible set derived from it.
pub struct SelectionCoordinator {
    catalog: Arc<ListingCatalog>,
    index: ListingIndex,
    selection: SelectionState,
    last_bounds: Option<ViewportBounds>,
    visible: Vec<ListingId>,
}

impl SelectionCoordinator {
    /// Starts with no selection and every listing visible, since no bounds
    /// have been reported yet.
    #[must_use]
    pub fn new(catalog: Arc<ListingCatalog>) -> Self {
        let index = ListingIndex::build(catalog.listings());
        let visible = catalog.iter().map(|l| l.id).collect();

        Self {
            catalog,
            index,
            selection: SelectionState::None,
            last_bounds: None,
            visible,
        }
    }

    /// Applies one message.
    pub fn dispatch(&mut self, message: MapMessage) {
        match message {
            MapMessage::ListingClicked(id) => {
                if self.catalog.get(id).is_none() {
                    log::warn!("Ignoring click on unknown listing {id}");
                    return;
                }
                log::info!("Selected listing {id}");
                self.selection = SelectionState::Selected(id);
                self.visible = vec![id];
            }
            MapMessage::BoundsChanged(change) => {
                self.last_bounds = Some(change.bounds);

                match self.selection {
                    SelectionState::Selected(id) if change.user_initiated => {
                        log::info!("User moved the map; clearing selection of listing {id}");
                        self.selection = SelectionState::None;
                        self.refresh_visible();
                    }
                    SelectionState::Selected(id) => {
                        log::debug!("Programmatic bounds change; keeping listing {id} selected");
                    }
                    SelectionState::None => self.refresh_visible(),
                }
            }
            MapMessage::Deselect => {
                if let SelectionState::Selected(id) = self.selection {
                    log::info!("Deselected listing {id}");
                }
                self.selection = SelectionState::None;
                self.refresh_visible();
            }
        }
    }

    /// Recomputes the viewport-derived visible set. With no bounds known
    /// yet, every listing is visible.
    fn refresh_visible(&mut self) {
        self.visible = match &self.last_bounds {
            Some(bounds) => self.index.within(bounds),
            None => self.catalog.iter().map(|l| l.id).collect(),
        };
        log::debug!("{} listings visible", self.visible.len());
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Visible listing IDs in catalog order.
    #[must_use]
    pub fn visible_ids(&self) -> &[ListingId] {
        &self.visible
    }

    /// Visible listings in catalog order.
    #[must_use]
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.visible
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Most recent bounds reported, if any.
    #[must_use]
    pub const fn last_bounds(&self) -> Option<ViewportBounds> {
        self.last_bounds
    }

    /// The catalog the coordinator reads from.
    #[must_use]
    pub fn catalog(&self) -> &ListingCatalog {
        &self.catalog
    }
}
