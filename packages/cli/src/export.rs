//! `GeoJSON` rendering of a heatmap frame.
//!
//! Circles have no `GeoJSON` geometry, so each overlay ring becomes a point
//! carrying its radius (meters) and paint properties. Markers and the
//! campus landmark are emitted after the rings.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use rent_map_heatmap_models::HeatmapFrame;
use rent_map_listing_models::Coordinates;
use serde_json::json;

fn point_feature(position: Coordinates, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![position.lng, position.lat]))),
        id: None,
        properties: match properties {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        },
        foreign_members: None,
    }
}

/// Converts `frame` into a feature collection.
#[must_use]
pub fn frame_to_geojson(frame: &HeatmapFrame) -> FeatureCollection {
    let rings = frame.overlays.iter().map(|overlay| {
        point_feature(
            overlay.center,
            json!({
                "kind": "ring",
                "listingId": overlay.listing_id,
                "ring": overlay.ring,
                "radius": overlay.radius,
                "fillColor": overlay.fill_color.to_string(),
                "fillOpacity": overlay.fill_opacity,
                "stroke": overlay.stroke,
            }),
        )
    });

    let markers = frame.markers.iter().map(|marker| {
        point_feature(
            marker.position,
            json!({
                "kind": "marker",
                "listingId": marker.listing_id,
                "selected": marker.selected,
            }),
        )
    });

    let campus = point_feature(frame.campus, json!({ "kind": "campus" }));

    FeatureCollection {
        bbox: None,
        features: rings.chain(markers).chain(std::iter::once(campus)).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rent_map_heatmap::{MapSession, VirtualMap};
    use rent_map_heatmap_models::MapConfig;
    use rent_map_listing::ListingCatalog;

    fn frame() -> HeatmapFrame {
        let config = MapConfig::default();
        let map = VirtualMap::new(config.campus, 13.0, config.width, config.height);
        let mut session = MapSession::mount(map, Arc::new(ListingCatalog::hanover()), config);
        session.select(38);
        session.frame()
    }

    fn kind(feature: &Feature) -> Option<&str> {
        feature.properties.as_ref()?.get("kind")?.as_str()
    }

    #[test]
    fn rings_then_markers_then_campus() {
        let frame = frame();
        let collection = frame_to_geojson(&frame);

        assert_eq!(collection.features.len(), frame.overlays.len() + 30 + 1);
        assert_eq!(kind(&collection.features[0]), Some("ring"));
        assert_eq!(kind(&collection.features[frame.overlays.len()]), Some("marker"));
        assert_eq!(kind(collection.features.last().unwrap()), Some("campus"));
    }

    #[test]
    fn points_are_lng_lat() {
        let collection = frame_to_geojson(&frame());
        let campus = collection.features.last().unwrap();
        let geometry = campus.geometry.as_ref().unwrap();

        let Value::Point(position) = &geometry.value else {
            panic!("campus is not a point");
        };
        assert!((position[0] - -72.2887).abs() < 1e-12);
        assert!((position[1] - 43.7044).abs() < 1e-12);
    }

    #[test]
    fn selected_marker_is_flagged() {
        let collection = frame_to_geojson(&frame());
        let selected: Vec<_> = collection
            .features
            .iter()
            .filter(|f| kind(f) == Some("marker"))
            .filter(|f| {
                f.properties
                    .as_ref()
                    .and_then(|p| p.get("selected"))
                    .and_then(serde_json::Value::as_bool)
                    == Some(true)
            })
            .collect();

        assert_eq!(selected.len(), 1);
        let id = selected[0].properties.as_ref().unwrap().get("listingId");
        assert_eq!(id, Some(&json!(38)));
    }

    #[test]
    fn ring_paint_properties() {
        let collection = frame_to_geojson(&frame());
        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties.get("fillColor"), Some(&json!("rgba(255, 0, 0, 0.5)")));
        assert_eq!(properties.get("stroke"), Some(&json!(false)));
    }
}
