//! Zoom level to heatmap style lookup.

use rent_map_heatmap_models::HeatmapStyle;

const fn style(radius: f64, blur: f64) -> HeatmapStyle {
    HeatmapStyle {
        radius,
        max_intensity: 0.5,
        blur,
        circle_count: 15,
    }
}

/// `(max zoom, style)` rows in ascending zoom order. First match wins.
const ZOOM_STYLES: &[(f64, HeatmapStyle)] = &[
    (12.0, style(700.0, 40.0)),
    (13.0, style(500.0, 35.0)),
    (14.0, style(350.0, 30.0)),
    (15.0, style(250.0, 25.0)),
    (16.0, style(160.0, 20.0)),
];

/// Style for zoom levels past the last row.
const DEFAULT_STYLE: HeatmapStyle = style(110.0, 15.0);

/// Resolves the heatmap style for a zoom level.
///
/// Fractional zoom is floored to its discrete level first, so every zoom in
/// `[12, 13)` resolves like `12`.
#[must_use]
pub fn resolve(zoom: f64) -> HeatmapStyle {
    let level = zoom.floor();

    ZOOM_STYLES
        .iter()
        .find(|(max_zoom, _)| level <= *max_zoom)
        .map_or(DEFAULT_STYLE, |(_, style)| *style)
}
