use super::{from_minor_units, to_minor_units, MonetaryError};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_minor_units_successfully_converts_valid_amounts() -> Result<()> {
    let test_cases = vec![
        ("1.0", 100),
        ("1.23", 123),
        ("0.01", 1),
        ("-1.5", -150),
        ("100", 10_000),
        ("2499.990", 249_999),
    ];

    for (input, expected) in test_cases {
        assert_eq!(to_minor_units(Decimal::from_str(input)?)?, expected);
    }

    Ok(())
}

#[test]
fn test_minor_units_rejects_amounts_with_sub_cent_precision() -> Result<()> {
    let result = to_minor_units(Decimal::from_str("1.001")?);

    assert!(matches!(result, Err(MonetaryError::PrecisionLoss(..))));

    Ok(())
}

#[test]
fn test_minor_units_reports_overflow_for_huge_values() {
    assert!(matches!(to_minor_units(Decimal::MAX), Err(MonetaryError::Overflow)));
}

#[test]
fn test_minor_units_restore_original_amount() -> Result<()> {
    let amount = Decimal::from_str("1234.56")?;

    assert_eq!(from_minor_units(to_minor_units(amount)?), amount);
    assert_eq!(from_minor_units(5).to_string(), "0.05");

    Ok(())
}
