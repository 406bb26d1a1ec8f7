#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rent heatmap pipeline.
//!
//! Surface events flow through the [`tracker::BoundsTracker`], which tags
//! each viewport change as user-initiated or programmatic, into the
//! [`selection::SelectionCoordinator`], which owns the visible listing set.
//! Rendering a frame computes the [`price::price_range`] over that set,
//! resolves the zoom [`style`], and builds the Gaussian [`overlay`] rings.
//! [`session::MapSession`] wires the pieces to a [`surface::MapSurface`].

pub mod overlay;
pub mod price;
pub mod selection;
pub mod session;
pub mod spatial;
pub mod style;
pub mod surface;
pub mod tracker;

pub use rent_map_heatmap_models as models;
pub use session::MapSession;
pub use surface::{MapSurface, SurfaceUpdate, VirtualMap};
