//! Viewport bounds tracker.
//!
//! Turns the surface's settle events into [`BoundsChange`] emissions and
//! decides whether each one was caused by the user. A change counts as
//! user-initiated when raw input (pointer, touch, wheel, key) arrived since
//! the previous emission, except that the first emission after mount is
//! always programmatic: it is the initial framing of the map.

use rent_map_heatmap_models::{BoundsChange, SurfaceEvent, ViewportBounds};

use crate::surface::MapSurface;

/// Classifies viewport changes as user-initiated or programmatic.
#[derive(Debug, Clone, Default)]
pub struct BoundsTracker {
    subscribed: bool,
    input_observed: bool,
    has_emitted: bool,
}

impl BoundsTracker {
    /// Subscribes to `surface` and performs the initial emission if the
    /// surface already has a viewport.
    ///
    /// An uninitialized surface yields an unsubscribed tracker that never
    /// emits.
    #[must_use]
    pub fn mount<S: MapSurface + ?Sized>(surface: &S) -> (Self, Option<BoundsChange>) {
        if !surface.is_initialized() {
            log::debug!("Map surface not initialized; bounds tracker not subscribed");
            return (Self::default(), None);
        }

        let mut tracker = Self {
            subscribed: true,
            ..Self::default()
        };
        let initial = surface.viewport().map(|bounds| tracker.emit(bounds));

        (tracker, initial)
    }

    /// Whether the tracker is listening to a surface.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Feeds one surface event. `viewport` is the surface's rectangle at
    /// delivery time.
    ///
    /// Settle events with no viewport available are dropped and leave the
    /// input flag untouched.
    pub fn handle(
        &mut self,
        event: SurfaceEvent,
        viewport: Option<ViewportBounds>,
    ) -> Option<BoundsChange> {
        if !self.subscribed {
            return None;
        }

        match event {
            SurfaceEvent::Input(kind) => {
                log::trace!("Observed {kind} input");
                self.input_observed = true;
                None
            }
            SurfaceEvent::MoveEnd | SurfaceEvent::ZoomEnd => viewport.map(|b| self.emit(b)),
        }
    }

    fn emit(&mut self, bounds: ViewportBounds) -> BoundsChange {
        let user_initiated = self.has_emitted && self.input_observed;

        self.input_observed = false;
        self.has_emitted = true;

        log::debug!(
            "Bounds changed to w={:.5} s={:.5} e={:.5} n={:.5} (user_initiated={user_initiated})",
            bounds.west,
            bounds.south,
            bounds.east,
            bounds.north,
        );

        BoundsChange {
            bounds,
            user_initiated,
        }
    }
}
