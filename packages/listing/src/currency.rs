//! Rent display formatting.

use rent_map_listing_models::Currency;

/// Formats a USD amount in `currency`, rounded to whole units with
/// thousands separators (e.g. `$1,715`, `₩2,229,500`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_rent(usd: f64, currency: Currency) -> String {
    let amount = currency.convert(usd).round() as i64;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{}{grouped}", currency.symbol())
}
