//! Lenient parsing and formatting of monetary amounts.
//!
//! Amounts typed into the form or received from the webhook are read with the "leading
//! number" rule: whitespace is trimmed, the longest decimal literal at the start of the
//! text is taken, and anything that has no such prefix counts as zero. Coercing real text
//! to zero is logged because it silently replaces what the user typed.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::{Number, Value};
use tracing::warn;

/// Reads an amount from free text, falling back to zero.
pub fn coerce_amount(input: &str) -> Decimal {
    match leading_number(input) {
        Some(amount) => amount,
        None => {
            if !input.trim().is_empty() {
                warn!("Treating non-numeric amount {input:?} as zero");
            }
            Decimal::ZERO
        }
    }
}

/// Reads an amount from a JSON value. Numbers are taken as they are, strings go through
/// [`coerce_amount`], everything else is zero.
pub fn coerce_json(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => leading_number(&n.to_string()).unwrap_or_else(|| {
            warn!("Amount {n} does not fit a decimal, treating it as zero");
            Decimal::ZERO
        }),
        Value::String(s) => coerce_amount(s),
        Value::Null => Decimal::ZERO,
        other => {
            warn!("Treating non-numeric amount {other} as zero");
            Decimal::ZERO
        }
    }
}

/// Encodes an amount as a JSON number.
pub fn to_json(amount: Decimal) -> Value {
    amount
        .normalize()
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Renders an amount the way it is shown to users, e.g. `R$ 1028.80`.
pub fn format_brl(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("R$ {rounded}")
}

/// Parses the longest decimal literal at the start of `input`.
///
/// Accepts an optional sign, digits with an optional fractional part and an optional
/// exponent. Returns `None` when no digit is found before the first other character.
pub fn leading_number(input: &str) -> Option<Decimal> {
    let text = input.trim();
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_part = digits_at(text, pos);
    pos += int_part.len();

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        frac_part = digits_at(text, pos + 1);
        pos += 1 + frac_part.len();
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::new();
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_sign = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                "-"
            }
            Some(b'+') => {
                exp_pos += 1;
                ""
            }
            _ => "",
        };
        let exp_part = digits_at(text, exp_pos);
        if !exp_part.is_empty() {
            literal.push('e');
            literal.push_str(exp_sign);
            literal.push_str(exp_part);
            return Decimal::from_scientific(&literal).ok();
        }
    }

    Decimal::from_str(&literal).ok()
}

fn digits_at(text: &str, from: usize) -> &str {
    let rest = text.get(from..).unwrap_or("");
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest.get(..len).unwrap_or("")
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_coerce_plain_numbers() {
        assert_eq!(coerce_amount("91.2"), dec!(91.2));
        assert_eq!(coerce_amount("  1650 "), dec!(1650));
        assert_eq!(coerce_amount("-45"), dec!(-45));
        assert_eq!(coerce_amount(".5"), dec!(0.5));
        assert_eq!(coerce_amount("12."), dec!(12));
    }

    #[test]
    fn test_coerce_takes_leading_number() {
        assert_eq!(coerce_amount("350abc"), dec!(350));
        assert_eq!(coerce_amount("91,2"), dec!(91));
        assert_eq!(coerce_amount("1e3"), dec!(1000));
        assert_eq!(coerce_amount("2e"), dec!(2));
    }

    #[test]
    fn test_coerce_non_numeric_is_zero() {
        assert_eq!(coerce_amount(""), Decimal::ZERO);
        assert_eq!(coerce_amount("abc"), Decimal::ZERO);
        assert_eq!(coerce_amount("-"), Decimal::ZERO);
        assert_eq!(coerce_amount("."), Decimal::ZERO);
        assert_eq!(coerce_amount("R$ 10"), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_json() {
        assert_eq!(coerce_json(&json!(91.2)), dec!(91.2));
        assert_eq!(coerce_json(&json!(1650)), dec!(1650));
        assert_eq!(coerce_json(&json!("135")), dec!(135));
        assert_eq!(coerce_json(&json!(null)), Decimal::ZERO);
        assert_eq!(coerce_json(&json!(true)), Decimal::ZERO);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec!(1028.8)), "R$ 1028.80");
        assert_eq!(format_brl(dec!(-12.345)), "R$ -12.34");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0.00");
    }

    #[test]
    fn test_to_json() {
        assert_eq!(to_json(dec!(1028.80)), json!(1028.8));
        assert_eq!(to_json(dec!(450)), json!(450.0));
    }
}
