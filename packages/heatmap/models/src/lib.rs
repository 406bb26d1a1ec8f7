#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Viewport, heatmap style, and overlay primitive types.
//!
//! These are the values that flow through the heatmap pipeline: the
//! visible map rectangle, the zoom-derived rendering style, the dynamic
//! price range, and the circle/marker primitives handed to the rendering
//! surface. All of them are plain data and are recomputed rather than
//! mutated.

use std::str::FromStr;

use rent_map_listing_models::{Coordinates, ListingId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The geographic rectangle currently visible on the map (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl ViewportBounds {
    /// Creates a new viewport rectangle from the given edges.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether `point` lies inside the rectangle. All four edges are
    /// inclusive.
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

/// Error returned when a `west,south,east,north` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoundsError {
    /// The input that failed to parse.
    pub input: String,
}

impl std::fmt::Display for ParseBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid bounds {:?}: expected four numbers as west,south,east,north",
            self.input
        )
    }
}

impl std::error::Error for ParseBoundsError {}

impl FromStr for ViewportBounds {
    type Err = ParseBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseBoundsError {
            input: s.to_string(),
        };

        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts[..] {
            [west, south, east, north] => Ok(Self::new(west, south, east, north)),
            _ => Err(invalid()),
        }
    }
}

/// Heatmap rendering configuration for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapStyle {
    /// Outermost circle radius in meters.
    pub radius: f64,
    /// Peak intensity scale in `[0, 1]`.
    pub max_intensity: f64,
    /// Blur hint for the renderer.
    pub blur: f64,
    /// Number of concentric circles per listing (at least 1).
    pub circle_count: u32,
}

/// Min/max rent used to normalize listing prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Lower bound, never negative.
    pub min_price: f64,
    /// Upper bound.
    pub max_price: f64,
}

impl PriceRange {
    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(min_price: f64, max_price: f64) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// Width of the range.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.max_price - self.min_price
    }
}

/// An sRGB color with a fractional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A filled, unstroked circle drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleOverlay {
    /// Listing this circle belongs to.
    pub listing_id: ListingId,
    /// Ring index, from `circle_count` (outermost) down to 1.
    pub ring: u32,
    /// Circle center.
    pub center: Coordinates,
    /// Radius in meters.
    pub radius: f64,
    /// Fill color; its alpha encodes the listing's relative price.
    pub fill_color: Rgba,
    /// Fill opacity; encodes distance from the listing.
    pub fill_opacity: f64,
    /// Whether the outline is drawn. Always `false` for heatmap rings.
    pub stroke: bool,
}

/// A clickable listing pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Listing the pin opens.
    pub listing_id: ListingId,
    /// Pin position.
    pub position: Coordinates,
    /// Whether this is the selected listing (drawn larger and red).
    pub selected: bool,
}

/// Which listing, if any, the user has focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "listingId", rename_all = "camelCase")]
pub enum SelectionState {
    /// No selection; the visible set follows the viewport.
    #[default]
    None,
    /// A single listing is focused and is the whole visible set.
    Selected(ListingId),
}

impl SelectionState {
    /// The selected listing, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<ListingId> {
        match self {
            Self::None => None,
            Self::Selected(id) => Some(*id),
        }
    }
}

/// Raw user input observed on the map surface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    /// Mouse/pointer button pressed.
    PointerDown,
    /// Touch began.
    TouchStart,
    /// Scroll wheel.
    Wheel,
    /// Keyboard key pressed while the map had focus.
    KeyDown,
}

/// An event delivered by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// A pan finished settling.
    MoveEnd,
    /// A zoom finished settling.
    ZoomEnd,
    /// Raw user input.
    Input(InputKind),
}

impl SurfaceEvent {
    /// Whether this is a move/zoom-completed event.
    #[must_use]
    pub const fn is_settle(&self) -> bool {
        matches!(self, Self::MoveEnd | Self::ZoomEnd)
    }
}

/// A bounds emission from the viewport tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsChange {
    /// The new viewport.
    pub bounds: ViewportBounds,
    /// Whether direct user input caused this change.
    pub user_initiated: bool,
}

/// Map presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Campus landmark; also the initial map center.
    pub campus: Coordinates,
    /// Zoom level at mount.
    pub initial_zoom: f64,
    /// Zoom level used when re-centering on a selected listing.
    pub selected_zoom: f64,
    /// Map width in pixels.
    pub width: f64,
    /// Map height in pixels.
    pub height: f64,
    /// Whether selecting a listing programmatically re-centers the map.
    pub recenter_on_select: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            campus: Coordinates::new(43.7044, -72.2887),
            initial_zoom: 13.0,
            selected_zoom: 16.0,
            width: 1232.0,
            height: 500.0,
            recenter_on_select: true,
        }
    }
}

/// Everything the surface needs to draw one heatmap frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapFrame {
    /// Zoom level the style was resolved from.
    pub zoom: f64,
    /// Resolved heatmap style.
    pub style: HeatmapStyle,
    /// Price range over the visible set.
    pub price_range: PriceRange,
    /// Current selection.
    pub selection: SelectionState,
    /// Visible listing IDs, in catalog order.
    pub visible: Vec<ListingId>,
    /// Heatmap circles in paint order.
    pub overlays: Vec<CircleOverlay>,
    /// One pin per catalog listing.
    pub markers: Vec<Marker>,
    /// Campus landmark position.
    pub campus: Coordinates,
}
