//! Coercion of raw form input into the numeric values a draft stores.
//!
//! Form fields deliver either text or JSON numbers. Empty or unparsable
//! input coerces to zero instead of failing; negative or oversized values
//! are rejected.

use std::borrow::Cow;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// A raw value typed into a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(serde_json::Number),
    Text(String),
}

impl InputValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            InputValue::Number(n) => Cow::Owned(n.to_string()),
            InputValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<i64> for InputValue {
    fn from(n: i64) -> Self {
        InputValue::Number(n.into())
    }
}

impl From<u32> for InputValue {
    fn from(n: u32) -> Self {
        InputValue::Number(n.into())
    }
}

/// Longest numeric input accepted, in characters.
pub const MAX_INPUT_LEN: usize = 40;

/// Decimal places kept on amounts; finer input is rounded.
pub const MAX_SCALE: i64 = 6;

/// Largest amount accepted: 10^12.
pub const MAX_INTEGER_DIGITS: i64 = 12;

fn out_of_range(what: &str, text: &str) -> DomainError {
    DomainError::InvalidInput(format!("{} '{}' is out of range", what, text))
}

/// Coerce `value` to a non-negative decimal. Malformed input yields zero.
///
/// The result has at most [`MAX_SCALE`] decimal places and is below
/// 10^[`MAX_INTEGER_DIGITS`]. The exponent is checked before any rescaling.
pub fn coerce_amount(value: &InputValue, what: &str) -> Result<BigDecimal, DomainError> {
    let text = value.as_text();
    let trimmed = text.trim();

    if trimmed.len() > MAX_INPUT_LEN {
        return Err(DomainError::InvalidInput(format!(
            "{} input is too long ({} characters)",
            what,
            trimmed.len()
        )));
    }

    let amount = match BigDecimal::from_str(trimmed) {
        Ok(amount) => amount,
        Err(_) => {
            log::warn!("{} '{}' is not a number, using 0", what, trimmed);
            return Ok(BigDecimal::zero());
        }
    };

    if amount.is_negative() {
        return Err(DomainError::InvalidInput(format!(
            "{} must not be negative, got '{}'",
            what, trimmed
        )));
    }
    if amount.is_zero() {
        return Ok(BigDecimal::zero());
    }

    // value = digits * 10^-scale, with at most MAX_INPUT_LEN digits
    let (_, scale) = amount.as_bigint_and_exponent();
    if scale < -MAX_INTEGER_DIGITS {
        return Err(out_of_range(what, trimmed));
    }
    if scale > MAX_SCALE + MAX_INPUT_LEN as i64 {
        log::warn!("{} '{}' rounds to 0", what, trimmed);
        return Ok(BigDecimal::zero());
    }

    let amount = if scale > MAX_SCALE {
        amount.with_scale_round(MAX_SCALE, RoundingMode::HalfEven)
    } else {
        amount
    };
    if amount >= BigDecimal::new(1.into(), -MAX_INTEGER_DIGITS) {
        return Err(out_of_range(what, trimmed));
    }
    Ok(amount)
}

/// Coerce `value` to a non-negative whole number. Fractions are truncated.
pub fn coerce_count(value: &InputValue, what: &str) -> Result<u32, DomainError> {
    let amount = coerce_amount(value, what)?;
    if amount > BigDecimal::from(u32::MAX) {
        return Err(out_of_range(what, value.as_text().trim()));
    }
    let whole = amount.with_scale(0);
    if whole != amount {
        log::warn!("{} {} is not a whole number, truncating to {}", what, amount, whole);
    }
    whole
        .to_u32()
        .ok_or_else(|| out_of_range(what, value.as_text().trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_is_parsed() {
        let v = coerce_amount(&"199.90".into(), "unit price").expect("valid amount");
        assert_eq!(v, BigDecimal::from_str("199.9").unwrap());
    }

    #[test]
    fn json_number_is_parsed() {
        let v = coerce_count(&InputValue::from(7u32), "quantity").expect("valid count");
        assert_eq!(v, 7);
    }

    #[test]
    fn empty_text_coerces_to_zero() {
        assert_eq!(coerce_count(&"".into(), "quantity").unwrap(), 0);
        assert!(coerce_amount(&"   ".into(), "unit price").unwrap().is_zero());
    }

    #[test]
    fn garbage_coerces_to_zero() {
        assert!(coerce_amount(&"abc".into(), "unit price").unwrap().is_zero());
        assert_eq!(coerce_count(&"NaN".into(), "hours").unwrap(), 0);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = coerce_count(&InputValue::from(-3i64), "days").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = coerce_amount(&"-0.01".into(), "unit price").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn fractional_count_is_truncated() {
        assert_eq!(coerce_count(&"2.7".into(), "quantity").unwrap(), 2);
    }

    #[test]
    fn oversized_count_is_rejected() {
        let err = coerce_count(&"99999999999".into(), "quantity").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn huge_exponent_count_is_rejected_with_short_message() {
        let err = coerce_count(&"1e1000000".into(), "quantity").unwrap_err();
        match err {
            DomainError::InvalidInput(msg) => {
                assert!(msg.contains("'1e1000000'"));
                assert!(msg.len() < 100);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn huge_exponent_amount_is_rejected() {
        let err = coerce_amount(&"1e10000000".into(), "unit price").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(matches!(
            coerce_amount(&"1e12".into(), "unit price"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_with_huge_exponent_is_zero() {
        assert!(coerce_amount(&"0e1000000".into(), "unit price").unwrap().is_zero());
    }

    #[test]
    fn tiny_exponent_amount_rounds_to_zero() {
        let v = coerce_amount(&"1e-100000000".into(), "unit price").expect("accepted");
        assert!(v.is_zero());
    }

    #[test]
    fn excess_decimal_places_are_rounded() {
        let v = coerce_amount(&"12.34567891".into(), "unit price").expect("accepted");
        assert_eq!(v, BigDecimal::from_str("12.345679").unwrap());
        assert_eq!(v.as_bigint_and_exponent().1, MAX_SCALE);
    }

    #[test]
    fn overlong_input_is_rejected() {
        let long = "1".repeat(MAX_INPUT_LEN + 1);
        let err = coerce_amount(&long.as_str().into(), "unit price").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
