use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::{LineField, LineItem};

/// Parse a user-entered number, ignoring `$` symbols and `,` separators.
///
/// Accepts plain (`"1,250.50"`) and scientific (`"1.5e2"`) notation.
/// Empty remainders, negative values and anything else unparseable are
/// reported as [`InvoiceError::InvalidNumericInput`] for `field`.
pub fn parse_amount(field: LineField, raw: &str) -> Result<Decimal, InvoiceError> {
    let invalid = || InvoiceError::InvalidNumericInput {
        field,
        value: raw.to_string(),
    };

    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(invalid());
    }

    let value = Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| invalid())?;

    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(invalid());
    }
    Ok(value)
}

/// Line amount: `rate * quantity + quantity * (cgst_rate + sgst_rate)`,
/// rounded to two decimal places.
///
/// The CGST and SGST rates are flat amounts per unit of quantity, not
/// percentages of the rate.
///
/// # Panics
///
/// Like `Decimal`'s operators, panics if the amount does not fit in a
/// `Decimal`. Use [`checked_amount`] for unvalidated input.
pub fn compute_amount(
    rate: Decimal,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    quantity: Decimal,
) -> Decimal {
    round_half_up(rate * quantity + quantity * (cgst_rate + sgst_rate), 2)
}

/// [`compute_amount`], or `None` if the amount does not fit in a `Decimal`.
pub fn checked_amount(
    rate: Decimal,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    quantity: Decimal,
) -> Option<Decimal> {
    try_amount(rate, cgst_rate, sgst_rate, quantity).ok()
}

/// Exact line amount, or the field blamed when it overflows: SGST when the
/// two rates alone do not fit, otherwise quantity.
pub(crate) fn try_amount(
    rate: Decimal,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    quantity: Decimal,
) -> Result<Decimal, LineField> {
    let tax_rate = cgst_rate
        .checked_add(sgst_rate)
        .ok_or(LineField::SgstRate)?;
    rate.checked_mul(quantity)
        .zip(quantity.checked_mul(tax_rate))
        .and_then(|(base, tax)| base.checked_add(tax))
        .map(|amount| round_half_up(amount, 2))
        .ok_or(LineField::Quantity)
}

/// Sum of the recomputed amounts of `items`.
///
/// # Panics
///
/// If the sum does not fit in a `Decimal`. An [`Invoice`](super::Invoice)
/// never holds such items; see [`checked_grand_total`] for arbitrary slices.
pub fn compute_grand_total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::recomputed_amount).sum()
}

/// [`compute_grand_total`], or `None` on overflow.
pub fn checked_grand_total(items: &[LineItem]) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        checked_amount(item.rate(), item.cgst_rate(), item.sgst_rate(), item.quantity())
            .and_then(|amount| total.checked_add(amount))
    })
}

/// Format as currency with exactly two decimals, e.g. `$60.00`.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_half_up(amount, 2);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded.abs())
    }
}

/// Format a rate or quantity without trailing zeros, e.g. `5` or `1.5`.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
