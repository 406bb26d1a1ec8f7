//! Rent statistics for the trends dashboard.

use std::collections::BTreeMap;

use rent_map_listing_models::{BedroomGroup, Listing, TrendsSummary};

/// Summarizes rents across `listings`.
///
/// An empty input yields zeroed statistics and no bedroom groups.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> TrendsSummary {
    let mut total = 0_usize;
    let mut sum = 0.0;
    let mut min_rent = f64::INFINITY;
    let mut max_rent = f64::NEG_INFINITY;
    let mut groups: BTreeMap<u8, (usize, f64)> = BTreeMap::new();

    for listing in listings {
        total += 1;
        sum += listing.rent;
        min_rent = min_rent.min(listing.rent);
        max_rent = max_rent.max(listing.rent);

        let entry = groups.entry(listing.bedrooms).or_default();
        entry.0 += 1;
        entry.1 += listing.rent;
    }

    if total == 0 {
        return TrendsSummary {
            total: 0,
            average_rent: 0.0,
            min_rent: 0.0,
            max_rent: 0.0,
            by_bedrooms: Vec::new(),
        };
    }

    let by_bedrooms = groups
        .into_iter()
        .map(|(bedrooms, (count, group_sum))| BedroomGroup {
            bedrooms,
            count,
            average_rent: group_sum / count as f64,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    TrendsSummary {
        total,
        average_rent: sum / total as f64,
        min_rent,
        max_rent,
        by_bedrooms,
    }
}
