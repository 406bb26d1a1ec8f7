//! Scripted map sessions.
//!
//! A script is a TOML file of `[[step]]` tables replayed against a
//! [`VirtualMap`]. Each gesture step is pumped through the session before
//! the next one runs; `frame` steps capture the rendered state.
//!
//! ```toml
//! [[step]]
//! action = "click"
//! id = 38
//!
//! [[step]]
//! action = "drag"
//! dx = 120.0
//! dy = 0.0
//!
//! [[step]]
//! action = "frame"
//! ```

use std::{path::Path, sync::Arc};

use rent_map_heatmap::{MapSession, MapSurface as _, VirtualMap};
use rent_map_heatmap_models::{HeatmapFrame, MapConfig};
use rent_map_listing::ListingCatalog;
use rent_map_listing_models::{Coordinates, ListingId};
use serde::Deserialize;

use crate::config::{ConfigError, read_file};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click a listing pin.
    Click { id: ListingId },
    /// Clear the selection.
    Deselect,
    /// Mouse drag by a pixel offset.
    Drag { dx: f64, dy: f64 },
    /// Touch drag by a pixel offset.
    TouchPan { dx: f64, dy: f64 },
    /// Arrow-key pan by a pixel offset.
    KeyPan { dx: f64, dy: f64 },
    /// Scroll-wheel zoom by whole or fractional levels.
    WheelZoom { delta: f64 },
    /// Programmatic re-center.
    SetView { lat: f64, lng: f64, zoom: f64 },
    /// First layout pass of an unframed map.
    LayOut,
    /// Capture the current frame.
    Frame,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    /// Start with a map that has not been laid out yet.
    #[serde(default)]
    pub unframed: bool,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script document.
    ///
    /// # Errors
    ///
    /// * If the document is not valid TOML or contains an unknown action
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&read_file(path)?)
    }
}

/// Replays `script` on a fresh virtual map centered on the campus and
/// returns the captured frames in order.
#[must_use]
pub fn run(
    script: &Script,
    catalog: Arc<ListingCatalog>,
    config: MapConfig,
) -> Vec<HeatmapFrame> {
    let map = if script.unframed {
        VirtualMap::unframed(config.campus, config.initial_zoom, config.width, config.height)
    } else {
        VirtualMap::new(config.campus, config.initial_zoom, config.width, config.height)
    };

    let mut session = MapSession::mount(map, catalog, config);
    let mut frames = Vec::new();

    for (i, step) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {step:?}", i + 1);

        match *step {
            Step::Click { id } => session.select(id),
            Step::Deselect => session.deselect(),
            Step::Drag { dx, dy } => session.surface_mut().drag(dx, dy),
            Step::TouchPan { dx, dy } => session.surface_mut().touch_pan(dx, dy),
            Step::KeyPan { dx, dy } => session.surface_mut().key_pan(dx, dy),
            Step::WheelZoom { delta } => session.surface_mut().wheel_zoom(delta),
            Step::SetView { lat, lng, zoom } => {
                session.surface_mut().set_view(Coordinates::new(lat, lng), zoom);
            }
            Step::LayOut => session.surface_mut().lay_out(),
            Step::Frame => frames.push(session.frame()),
        }

        for change in session.pump() {
            let origin = if change.user_initiated { "user" } else { "programmatic" };
            log::info!("Bounds changed by {origin} after step {}", i + 1);
        }
    }

    frames
}
