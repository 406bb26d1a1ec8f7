//! Gaussian heatmap overlay construction.
//!
//! Each listing becomes a stack of concentric circles whose fill opacity
//! falls off as `exp(-3 d²)` with normalized distance `d` from the center.
//! Rings are emitted outermost first so inner rings paint on top.

use rent_map_heatmap_models::{CircleOverlay, HeatmapStyle, PriceRange};
use rent_map_listing_models::Listing;

use crate::price::{normalize, price_color};

/// Falloff steepness of the Gaussian approximation.
const FALLOFF: f64 = 3.0;

/// Opacity of the outermost ring at full intensity.
const BASE_OPACITY: f64 = 0.2;

/// Builds the overlay circles for `listings`, listing by listing, each
/// listing's rings ordered from `circle_count` down to `1`.
#[must_use]
pub fn build_overlays<'a>(
    listings: impl IntoIterator<Item = &'a Listing>,
    range: &PriceRange,
    style: &HeatmapStyle,
) -> Vec<CircleOverlay> {
    listings
        .into_iter()
        .flat_map(|listing| gaussian_rings(listing, range, style))
        .collect()
}

/// Rings for a single listing.
#[must_use]
pub fn gaussian_rings(
    listing: &Listing,
    range: &PriceRange,
    style: &HeatmapStyle,
) -> Vec<CircleOverlay> {
    let count = style.circle_count.max(1);
    let fill_color = price_color(normalize(listing.rent, range));

    (1..=count)
        .rev()
        .map(|i| {
            let radius_factor = f64::from(i) / f64::from(count);
            let distance = 1.0 - radius_factor;
            let gaussian = (-FALLOFF * distance.powi(2)).exp();

            CircleOverlay {
                listing_id: listing.id,
                ring: i,
                center: listing.coordinates,
                radius: style.radius * radius_factor,
                fill_color,
                fill_opacity: gaussian * BASE_OPACITY * style.max_intensity,
                stroke: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::resolve;
    use rent_map_listing_models::Coordinates;

    fn listing(id: u32, rent: f64) -> Listing {
        Listing {
            id,
            name: format!("Listing {id}"),
            rent,
            bedrooms: 2,
            bathrooms: 1,
            coordinates: Coordinates::new(43.7036466, -72.28191863),
        }
    }

    #[test]
    fn one_ring_per_circle_count() {
        let style = resolve(13.0);
        let range = PriceRange::new(1665.0, 2237.0);
        let rings = gaussian_rings(&listing(34, 1871.0), &range, &style);
        assert_eq!(rings.len(), 15);
        assert_eq!(rings.first().map(|r| r.ring), Some(15));
        assert_eq!(rings.last().map(|r| r.ring), Some(1));
    }

    #[test]
    fn radii_strictly_decrease() {
        let style = resolve(15.0);
        let range = PriceRange::new(1665.0, 2237.0);
        let rings = gaussian_rings(&listing(34, 1871.0), &range, &style);
        assert!((rings[0].radius - 250.0).abs() < 1e-9);
        for pair in rings.windows(2) {
            assert!(pair[0].radius > pair[1].radius);
        }
    }

    #[test]
    fn opacity_follows_gaussian() {
        let style = resolve(13.0);
        let range = PriceRange::new(1665.0, 2237.0);
        let rings = gaussian_rings(&listing(34, 1871.0), &range, &style);

        assert!((rings[0].fill_opacity - 0.1).abs() < 1e-12);
        let innermost = (-3.0_f64 * (14.0_f64 / 15.0).powi(2)).exp() * 0.1;
        assert!((rings[14].fill_opacity - innermost).abs() < 1e-12);
        for pair in rings.windows(2) {
            assert!(pair[0].fill_opacity > pair[1].fill_opacity);
        }
        assert!(rings.iter().all(|r| !r.stroke));
    }

    #[test]
    fn color_alpha_tracks_price_not_distance() {
        let style = resolve(13.0);
        let range = PriceRange::new(1665.0, 2237.0);

        let cheap = gaussian_rings(&listing(33, 1715.0), &range, &style);
        let pricey = gaussian_rings(&listing(38, 2187.0), &range, &style);

        assert!(cheap.iter().all(|r| (r.fill_color.a - 0.3).abs() < 1e-12));
        let expected = (2187.0 - 1665.0) / 572.0;
        assert!(pricey.iter().all(|r| (r.fill_color.a - expected).abs() < 1e-12));
    }

    #[test]
    fn overlays_keep_listing_order() {
        let style = resolve(14.0);
        let range = PriceRange::new(1665.0, 2237.0);
        let listings = [listing(5, 1871.0), listing(12, 1715.0)];
        let overlays = build_overlays(&listings, &range, &style);

        assert_eq!(overlays.len(), 30);
        assert!(overlays[..15].iter().all(|o| o.listing_id == 5));
        assert!(overlays[15..].iter().all(|o| o.listing_id == 12));
    }

    #[test]
    fn nothing_visible_means_no_overlays() {
        let overlays = build_overlays(
            &Vec::<Listing>::new(),
            &PriceRange::new(1000.0, 2000.0),
            &resolve(13.0),
        );
        assert!(overlays.is_empty());
    }
}
