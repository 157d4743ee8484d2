use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{CENTS_PER_DOLLAR, DISPLAY_DECIMAL_PRECISION, MAX_GIFT_PRICE_CENTS};
use crate::errors::{Result, ValidationError};

/// Converts an amount in minor units (cents) into a decimal dollar amount.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, DISPLAY_DECIMAL_PRECISION)
}

/// Rounds to display precision, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Renders a dollar amount as `$X.YY`.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", round_money(amount))
}

/// Renders an amount in cents as `$X.YY`.
pub fn format_cents(cents: i64) -> String {
    format_money(cents_to_decimal(cents))
}

/// Sums prices given in cents into a dollar amount.
///
/// The sum is taken in `Decimal`, so it cannot overflow for any realistic
/// number of gifts.
pub fn sum_cents<I>(prices: I) -> Decimal
where
    I: IntoIterator<Item = i64>,
{
    prices.into_iter().map(cents_to_decimal).sum()
}

/// Applies `tax_rate` to a pre-tax dollar subtotal and rounds to two places.
///
/// Tax is only ever applied to an aggregate; individual gift prices are
/// always displayed pre-tax.
pub fn total_with_tax(subtotal: Decimal, tax_rate: Decimal) -> Decimal {
    round_money(subtotal * (Decimal::ONE + tax_rate))
}

/// Checks that a price in cents is within `0..=MAX_GIFT_PRICE_CENTS`.
pub fn validate_price_cents(cents: i64) -> Result<i64> {
    if (0..=MAX_GIFT_PRICE_CENTS).contains(&cents) {
        Ok(cents)
    } else {
        Err(ValidationError::InvalidPrice(format_cents(cents)).into())
    }
}

/// Parses a dollar amount typed into a form (`"12.5"`, `"$3"`) into cents.
///
/// A blank input is zero, which is what the add-gift form sends when only a
/// recipient is being created.
pub fn parse_price_cents(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let invalid = || ValidationError::InvalidPrice(input.to_string());

    let dollars = Decimal::from_str(digits).map_err(|_| invalid())?;
    if dollars.is_sign_negative() {
        return Err(invalid().into());
    }

    let cents = dollars
        .checked_mul(Decimal::from(CENTS_PER_DOLLAR))
        .ok_or_else(invalid)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match cents.to_i64() {
        Some(cents) if cents <= MAX_GIFT_PRICE_CENTS => Ok(cents),
        _ => Err(invalid().into()),
    }
}
