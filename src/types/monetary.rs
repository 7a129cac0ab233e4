use crate::types::errors::MonetaryError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Number of decimal places kept when a currency amount is stored as an integer.
pub const MINOR_UNIT_SCALE: u32 = 2;

const MINOR_UNITS_PER_MAJOR: i64 = 10i64.pow(MINOR_UNIT_SCALE);

/// Converts a currency amount into integer minor units (cents).
///
/// Relational storage keeps amounts as integers so that `SUM` stays exact and
/// agrees with the in-memory `Decimal` accumulation to the last cent.
pub fn to_minor_units(amount: Decimal) -> Result<i64, MonetaryError> {
    let normalized = amount.normalize();

    if normalized.scale() > MINOR_UNIT_SCALE {
        return Err(MonetaryError::PrecisionLoss(amount.to_string(), MINOR_UNIT_SCALE));
    }

    normalized.checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .and_then(|scaled| scaled.to_i64())
        .ok_or(MonetaryError::Overflow)
}

/// Converts integer minor units back into a currency amount.
pub fn from_minor_units(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, MINOR_UNIT_SCALE)
}
