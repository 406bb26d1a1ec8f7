//! Plain-text listing tables and trend summaries.

use rent_map_listing::currency::format_rent;
use rent_map_listing_models::{Currency, Listing, TrendsSummary};

/// Renders `listings` as an aligned table.
#[must_use]
pub fn listing_table<'a>(
    listings: impl IntoIterator<Item = &'a Listing>,
    currency: Currency,
) -> String {
    let header = format!(
        "{:>4}  {:<28}  {:>12}  {:>4}  {:>5}",
        "ID", "Address", "Rent", "Beds", "Baths"
    );

    let rows = listings.into_iter().map(|listing| {
        format!(
            "{:>4}  {:<28}  {:>12}  {:>4}  {:>5}",
            listing.id,
            listing.name,
            format_rent(listing.rent, currency),
            listing.bedrooms,
            listing.bathrooms,
        )
    });

    join_lines(std::iter::once(header).chain(rows))
}

/// Renders a trends summary.
#[must_use]
pub fn trends_report(summary: &TrendsSummary, currency: Currency) -> String {
    let totals = [
        format!("Listings: {}", summary.total),
        format!("Average rent: {}", format_rent(summary.average_rent, currency)),
        format!(
            "Rent range: {} - {}",
            format_rent(summary.min_rent, currency),
            format_rent(summary.max_rent, currency),
        ),
    ];

    let groups = summary.by_bedrooms.iter().map(|group| {
        let plural = if group.bedrooms == 1 { "" } else { "s" };
        format!(
            "  {} bedroom{plural}: {} listings ({:.0}%), average {}",
            group.bedrooms,
            group.count,
            group.percentage,
            format_rent(group.average_rent, currency),
        )
    });

    join_lines(totals.into_iter().chain(groups))
}

fn join_lines(rows: impl Iterator<Item = String>) -> String {
    rows.map(|row| row + "\n").collect()
}
