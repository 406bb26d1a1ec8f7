//! Dynamic price range and price-to-intensity normalization.

use rent_map_heatmap_models::{PriceRange, Rgba};
use rent_map_listing_models::Listing;

/// Range used when nothing is visible.
pub const FALLBACK_PRICE_RANGE: PriceRange = PriceRange::new(1000.0, 2000.0);

/// Minimum padding applied on each side of the observed rents.
pub const MIN_PADDING: f64 = 50.0;

/// Fraction of the observed spread used as padding when it exceeds
/// [`MIN_PADDING`].
const PADDING_FRACTION: f64 = 0.1;

/// Lower bound of the price color's alpha channel.
const MIN_COLOR_ALPHA: f64 = 0.3;

/// Computes the padded price range over `listings`.
///
/// Padding is `max(50, spread * 0.1)` on both sides, and the lower bound is
/// floored at zero. The floor on the padding means equal rents still give a
/// non-empty range, so [`normalize`] never divides by zero on this output.
#[must_use]
pub fn price_range<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> PriceRange {
    let mut rents: Vec<f64> = listings.into_iter().map(|l| l.rent).collect();

    if rents.is_empty() {
        return FALLBACK_PRICE_RANGE;
    }

    rents.sort_by(f64::total_cmp);
    let min = rents[0];
    let max = rents[rents.len() - 1];

    let padding = MIN_PADDING.max((max - min) * PADDING_FRACTION);

    PriceRange::new((min - padding).max(0.0), max + padding)
}

/// Maps `rent` into the range as a fraction of its width.
///
/// Returns exactly `0.5` for a degenerate range. The result is not clamped.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize(rent: f64, range: &PriceRange) -> f64 {
    if range.max_price == range.min_price {
        return 0.5;
    }
    (rent - range.min_price) / range.spread()
}

/// Red with alpha `clamp(intensity, 0.3, 1.0)`.
#[must_use]
pub fn price_color(intensity: f64) -> Rgba {
    Rgba {
        r: 255,
        g: 0,
        b: 0,
        a: intensity.clamp(MIN_COLOR_ALPHA, 1.0),
    }
}
