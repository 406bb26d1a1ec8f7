//! A mounted heatmap map: surface, bounds tracker, and selection state wired
//! together.

use std::sync::Arc;

use rent_map_heatmap_models::{
    BoundsChange, HeatmapFrame, MapConfig, Marker, SelectionState, SurfaceEvent,
};
use rent_map_listing::ListingCatalog;
use rent_map_listing_models::ListingId;

use crate::{
    overlay::build_overlays,
    price::price_range,
    selection::{MapMessage, SelectionCoordinator},
    style::resolve,
    surface::MapSurface,
    tracker::BoundsTracker,
};

/// Drives one map surface through the heatmap pipeline.
pub struct MapSession<S: MapSurface> {
    surface: S,
    config: MapConfig,
    tracker: BoundsTracker,
    coordinator: SelectionCoordinator,
    zoom: f64,
}

impl<S: MapSurface> MapSession<S> {
    /// Mounts on `surface`. If the surface is already laid out, its current
    /// viewport is dispatched as the initial (programmatic) bounds change.
    #[must_use]
    pub fn mount(surface: S, catalog: Arc<ListingCatalog>, config: MapConfig) -> Self {
        let zoom = surface.zoom();
        let (tracker, initial) = BoundsTracker::mount(&surface);
        let mut coordinator = SelectionCoordinator::new(catalog);

        if let Some(change) = initial {
            coordinator.dispatch(MapMessage::BoundsChanged(change));
        }

        log::debug!(
            "Mounted map session at zoom {zoom} (tracking={})",
            tracker.is_subscribed()
        );

        Self {
            surface,
            config,
            tracker,
            coordinator,
            zoom,
        }
    }

    /// Processes every pending surface event in delivery order and returns
    /// the bounds changes that were emitted. Each change carries the view
    /// its own settle event fired on.
    pub fn pump(&mut self) -> Vec<BoundsChange> {
        let mut changes = Vec::new();

        for update in self.surface.poll_events() {
            if update.event == SurfaceEvent::ZoomEnd {
                self.zoom = update.zoom;
            }
            if let Some(change) = self.tracker.handle(update.event, update.viewport) {
                self.coordinator.dispatch(MapMessage::BoundsChanged(change));
                changes.push(change);
            }
        }

        changes
    }

    /// Selects `id` as if its pin was clicked, then re-centers on it when
    /// configured to.
    pub fn select(&mut self, id: ListingId) {
        self.pump();
        self.coordinator.dispatch(MapMessage::ListingClicked(id));

        if !self.config.recenter_on_select
            || self.coordinator.selection() != SelectionState::Selected(id)
        {
            return;
        }

        if let Some(listing) = self.coordinator.catalog().get(id) {
            self.surface.set_view(listing.coordinates, self.config.selected_zoom);
            self.pump();
        }
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.pump();
        self.coordinator.dispatch(MapMessage::Deselect);
    }

    /// Renders the current state.
    #[must_use]
    pub fn frame(&self) -> HeatmapFrame {
        let visible = self.coordinator.visible_listings();
        let range = price_range(visible.iter().copied());
        let style = resolve(self.zoom);
        let overlays = build_overlays(visible.iter().copied(), &range, &style);

        let selection = self.coordinator.selection();
        let markers = self
            .coordinator
            .catalog()
            .iter()
            .map(|listing| Marker {
                listing_id: listing.id,
                position: listing.coordinates,
                selected: selection.selected() == Some(listing.id),
            })
            .collect();

        HeatmapFrame {
            zoom: self.zoom,
            style,
            price_range: range,
            selection,
            visible: self.coordinator.visible_ids().to_vec(),
            overlays,
            markers,
            campus: self.config.campus,
        }
    }

    #[must_use]
    pub const fn selection(&self) -> SelectionState {
        self.coordinator.selection()
    }

    #[must_use]
    pub fn visible_ids(&self) -> &[ListingId] {
        self.coordinator.visible_ids()
    }

    /// Zoom as of the last processed zoom event.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Whether the bounds tracker subscribed at mount.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracker.is_subscribed()
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for driving gestures. Call [`Self::pump`] afterwards.
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::VirtualMap;

    fn catalog() -> Arc<ListingCatalog> {
        Arc::new(ListingCatalog::hanover())
    }

    fn campus_session() -> MapSession<VirtualMap> {
        let config = MapConfig::default();
        let map = VirtualMap::new(
            config.campus,
            config.initial_zoom,
            config.width,
            config.height,
        );
        MapSession::mount(map, catalog(), config)
    }

    #[test]
    fn initial_frame_at_campus() {
        let session = campus_session();
        assert!(session.is_tracking());

        let frame = session.frame();
        assert!((frame.style.radius - 500.0).abs() < f64::EPSILON);
        assert!((frame.style.max_intensity - 0.5).abs() < f64::EPSILON);
        assert!((frame.style.blur - 35.0).abs() < f64::EPSILON);
        assert_eq!(frame.style.circle_count, 15);

        assert_eq!(frame.visible.len(), 29);
        assert!(!frame.visible.contains(&12));

        assert!((frame.price_range.min_price - 1665.0).abs() < 1e-9);
        assert!((frame.price_range.max_price - 2237.0).abs() < 1e-9);

        assert_eq!(frame.overlays.len(), 29 * 15);
        assert_eq!(frame.markers.len(), 30);
        assert!(frame.markers.iter().all(|m| !m.selected));
        assert_eq!(frame.selection, SelectionState::None);
    }

    #[test]
    fn select_recenters_and_keeps_selection() {
        let mut session = campus_session();
        session.select(38);

        assert_eq!(session.selection(), SelectionState::Selected(38));
        assert_eq!(session.visible_ids(), &[38]);
        assert!((session.zoom() - 16.0).abs() < f64::EPSILON);

        let frame = session.frame();
        assert_eq!(frame.overlays.len(), 15);
        assert_eq!(frame.markers.iter().filter(|m| m.selected).count(), 1);
        assert!((frame.price_range.min_price - 2137.0).abs() < 1e-9);
        assert!((frame.price_range.max_price - 2237.0).abs() < 1e-9);
    }

    #[test]
    fn drag_after_select_clears_selection() {
        let mut session = campus_session();
        session.select(38);

        session.surface_mut().drag(50.0, 0.0);
        let changes = session.pump();

        assert_eq!(changes.len(), 1);
        assert!(changes[0].user_initiated);
        assert_eq!(session.selection(), SelectionState::None);
        assert!(session.visible_ids().contains(&38));
        assert!(session.visible_ids().contains(&56));
        assert!(!session.visible_ids().contains(&12));
    }

    #[test]
    fn queued_drags_each_report_their_own_bounds() {
        let mut session = campus_session();

        let mut expected = session.surface().clone();
        expected.drag(300.0, 0.0);
        let after_first = expected.viewport().unwrap();
        expected.drag(300.0, 0.0);
        let after_second = expected.viewport().unwrap();

        session.surface_mut().drag(300.0, 0.0);
        session.surface_mut().drag(300.0, 0.0);
        let changes = session.pump();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].bounds, after_first);
        assert_eq!(changes[1].bounds, after_second);
        assert!(changes[0].bounds.west > changes[1].bounds.west);
        assert_eq!(session.coordinator.last_bounds(), Some(after_second));
    }

    #[test]
    fn wheel_zoom_after_select_clears_selection() {
        let mut session = campus_session();
        session.select(5);

        session.surface_mut().wheel_zoom(-1.0);
        let changes = session.pump();

        assert_eq!(changes.len(), 2);
        assert!(changes[0].user_initiated);
        assert!(!changes[1].user_initiated);
        assert_eq!(session.selection(), SelectionState::None);
        assert!((session.zoom() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn without_recentering_the_view_stays_put() {
        let config = MapConfig {
            recenter_on_select: false,
            ..MapConfig::default()
        };
        let map = VirtualMap::new(config.campus, 13.0, config.width, config.height);
        let mut session = MapSession::mount(map, catalog(), config);

        session.select(12);
        assert!(session.surface_mut().poll_events().is_empty());
        assert_eq!(session.visible_ids(), &[12]);
        assert!((session.zoom() - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deselect_returns_to_viewport() {
        let mut session = campus_session();
        session.select(12);
        session.deselect();

        assert_eq!(session.selection(), SelectionState::None);
        let visible = session.visible_ids();
        assert!(visible.contains(&12));
        assert!(visible.len() < 30);
    }

    #[test]
    fn input_before_layout_does_not_clear_selection() {
        let config = MapConfig::default();
        let map = VirtualMap::unframed(config.campus, 13.0, config.width, config.height);
        let mut session = MapSession::mount(map, catalog(), config);
        assert!(session.is_tracking());
        assert_eq!(session.visible_ids().len(), 30);

        session.select(38);
        session.surface_mut().key_pan(40.0, 0.0);
        session.surface_mut().lay_out();
        let changes = session.pump();

        assert_eq!(changes.len(), 1);
        assert!(!changes[0].user_initiated);
        assert_eq!(session.selection(), SelectionState::Selected(38));
        assert_eq!(session.visible_ids(), &[38]);

        session.deselect();
        assert_eq!(session.visible_ids().len(), 29);
    }

    #[test]
    fn detached_surface_still_supports_selection() {
        let mut session =
            MapSession::mount(VirtualMap::detached(), catalog(), MapConfig::default());
        assert!(!session.is_tracking());
        assert_eq!(session.visible_ids().len(), 30);

        session.surface_mut().drag(100.0, 100.0);
        assert!(session.pump().is_empty());

        session.select(5);
        assert_eq!(session.visible_ids(), &[5]);
        session.deselect();
        assert_eq!(session.frame().visible.len(), 30);
    }
}
