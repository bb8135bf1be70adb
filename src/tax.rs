// src/tax.rs

/// Share of a sale left after the marketplace tax.
pub const AFTER_TAX_RATE: f64 = 0.72;

/// Lenient numeric input: anything unparsable counts as zero, and so does
/// anything too large to divide by the tax rate without overflowing.
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (v / AFTER_TAX_RATE).is_finite())
        .unwrap_or(0.0)
}

/// Amount to list so that `value` remains after tax. Halves round up.
pub fn withdrawal(value: f64) -> f64 {
    (value / AFTER_TAX_RATE + 0.5).floor()
}

/// Whole-number display; `Display` for `f64` never switches to exponent form.
pub fn withdrawal_text(input: &str) -> String {
    format!("{}", withdrawal(parse_amount(input)))
}

pub fn total_with_tax(price: f64, tax_percent: f64) -> f64 {
    price + price * tax_percent / 100.0
}

pub fn total_text(price: &str, tax_percent: &str) -> String {
    format!(
        "Total: {:.2}",
        total_with_tax(parse_amount(price), parse_amount(tax_percent))
    )
}
