//! Map rendering surface abstraction and an in-memory implementation.
//!
//! [`MapSurface`] is the seam between the heatmap pipeline and whatever
//! actually draws the map. The pipeline only needs the current viewport and
//! zoom, a way to re-center programmatically, and the stream of settle and
//! raw input events in delivery order.
//!
//! [`VirtualMap`] implements the trait without a display. It keeps a
//! center, zoom, and pixel size, projects them with spherical Web Mercator
//! (256 px tiles) to get geographic bounds, and queues the events a
//! slippy map would fire for each gesture along with the view each one
//! fired on.

use std::f64::consts::PI;

use rent_map_heatmap_models::{InputKind, SurfaceEvent, ViewportBounds};
use rent_map_listing_models::Coordinates;

/// Tile edge length in pixels at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator square.
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Lowest zoom the virtual map allows.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom the virtual map allows.
pub const MAX_ZOOM: f64 = 18.0;

/// An event as delivered by a surface, with the view it fired on.
///
/// Several gestures can queue between two polls, so each settle event
/// carries its own rectangle and zoom rather than the surface's latest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceUpdate {
    pub event: SurfaceEvent,
    /// Visible rectangle when the event fired (`None` before layout).
    pub viewport: Option<ViewportBounds>,
    /// Zoom when the event fired.
    pub zoom: f64,
}

/// A geospatial view the heatmap pipeline can observe and steer.
pub trait MapSurface {
    /// Whether the surface finished initializing. An uninitialized surface
    /// accepts no subscriptions.
    fn is_initialized(&self) -> bool;

    /// The visible rectangle, or `None` before the surface has been laid out.
    fn viewport(&self) -> Option<ViewportBounds>;

    /// The current zoom level.
    fn zoom(&self) -> f64;

    /// Programmatically re-centers and zooms the view.
    fn set_view(&mut self, center: Coordinates, zoom: f64);

    /// Drains events fired since the last call, in delivery order.
    fn poll_events(&mut self) -> Vec<SurfaceUpdate>;
}

/// Projects a coordinate to global pixel space at `zoom`.
#[must_use]
pub fn project(point: &Coordinates, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * zoom.exp2();
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (0.5 - ((1.0 + lat.sin()) / (1.0 - lat.sin())).ln() / (4.0 * PI)) * scale;

    (x, y)
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(x: f64, y: f64, zoom: f64) -> Coordinates {
    let scale = TILE_SIZE * zoom.exp2();

    let lng = x / scale * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / scale;
    let lat = n.sinh().atan().to_degrees();

    Coordinates::new(lat, lng)
}

/// Geographic bounds of a `width` x `height` pixel view centered on
/// `center` at `zoom`.
#[must_use]
pub fn bounds_for(center: &Coordinates, zoom: f64, width: f64, height: f64) -> ViewportBounds {
    let (cx, cy) = project(center, zoom);
    let north_west = unproject(cx - width / 2.0, cy - height / 2.0, zoom);
    let south_east = unproject(cx + width / 2.0, cy + height / 2.0, zoom);

    ViewportBounds::new(north_west.lng, south_east.lat, south_east.lng, north_west.lat)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Container missing; nothing can subscribe.
    Detached,
    /// Initialized, but no layout pass has produced a viewport yet.
    Unframed,
    /// Laid out and reporting bounds.
    Framed,
}

/// A headless slippy map.
#[derive(Debug, Clone)]
pub struct VirtualMap {
    center: Coordinates,
    zoom: f64,
    width: f64,
    height: f64,
    lifecycle: Lifecycle,
    pending: Vec<SurfaceUpdate>,
}

impl VirtualMap {
    /// A laid-out map showing `center` at `zoom` in a `width` x `height`
    /// pixel container.
    #[must_use]
    pub fn new(center: Coordinates, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
            lifecycle: Lifecycle::Framed,
            pending: Vec::new(),
        }
    }

    /// An initialized map that has not been laid out yet; call
    /// [`Self::lay_out`] to make it report bounds.
    #[must_use]
    pub fn unframed(center: Coordinates, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            lifecycle: Lifecycle::Unframed,
            ..Self::new(center, zoom, width, height)
        }
    }

    /// A map whose container never initialized.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            lifecycle: Lifecycle::Detached,
            ..Self::new(Coordinates::new(0.0, 0.0), MIN_ZOOM, 0.0, 0.0)
        }
    }

    /// Current center.
    #[must_use]
    pub const fn center(&self) -> Coordinates {
        self.center
    }

    /// Completes the first layout pass, which settles like a move.
    pub fn lay_out(&mut self) {
        if self.lifecycle == Lifecycle::Unframed {
            self.lifecycle = Lifecycle::Framed;
            self.fire(SurfaceEvent::MoveEnd);
        }
    }

    /// Mouse drag: content follows the pointer by `dx`, `dy` pixels.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.gesture(InputKind::PointerDown, |map| map.pan_by(-dx, -dy));
    }

    /// Touch drag: same as [`Self::drag`] but from a touch.
    pub fn touch_pan(&mut self, dx: f64, dy: f64) {
        self.gesture(InputKind::TouchStart, |map| map.pan_by(-dx, -dy));
    }

    /// Arrow-key pan: the view moves `dx`, `dy` pixels (east/south positive).
    pub fn key_pan(&mut self, dx: f64, dy: f64) {
        self.gesture(InputKind::KeyDown, |map| map.pan_by(dx, dy));
    }

    /// Scroll-wheel zoom by `delta` levels around the current center.
    pub fn wheel_zoom(&mut self, delta: f64) {
        let target = self.zoom + delta;
        self.gesture(InputKind::Wheel, |map| map.zoom_to(target));
    }

    /// Input reaches any initialized surface; only a laid-out one moves.
    fn gesture(&mut self, input: InputKind, apply: impl FnOnce(&mut Self)) {
        if self.lifecycle == Lifecycle::Detached {
            return;
        }
        self.fire(SurfaceEvent::Input(input));
        if self.lifecycle == Lifecycle::Framed {
            apply(self);
        }
    }

    fn pan_by(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = project(&self.center, self.zoom);
        self.center = unproject(cx + dx, cy + dy, self.zoom);
        self.fire(SurfaceEvent::MoveEnd);
    }

    #[allow(clippy::float_cmp)]
    fn zoom_to(&mut self, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom != self.zoom {
            self.zoom = zoom;
            self.fire(SurfaceEvent::ZoomEnd);
        }
        self.fire(SurfaceEvent::MoveEnd);
    }

    fn fire(&mut self, event: SurfaceEvent) {
        let update = SurfaceUpdate {
            event,
            viewport: self.viewport(),
            zoom: self.zoom,
        };
        self.pending.push(update);
    }
}

impl MapSurface for VirtualMap {
    fn is_initialized(&self) -> bool {
        self.lifecycle != Lifecycle::Detached
    }

    fn viewport(&self) -> Option<ViewportBounds> {
        (self.lifecycle == Lifecycle::Framed)
            .then(|| bounds_for(&self.center, self.zoom, self.width, self.height))
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_view(&mut self, center: Coordinates, zoom: f64) {
        if self.lifecycle != Lifecycle::Framed {
            return;
        }
        self.center = center;
        self.zoom_to(zoom);
    }

    fn poll_events(&mut self) -> Vec<SurfaceUpdate> {
        std::mem::take(&mut self.pending)
    }
}
