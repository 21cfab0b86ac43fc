use serde::{Deserialize, Serialize};

use crate::{ExperianError, ExperianResult};

/// The one summary attribute that keeps its raw text despite not being a flag.
const OLDEST_TRADE_DATE: &str = "oldestTradeDate";

/// How numeric-looking attribute values and scores become integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerCoercion {
    /// The whole trimmed value must be an optionally signed run of digits.
    #[default]
    Strict,
    /// Leading whitespace and sign, then the longest digit prefix; the rest is
    /// ignored. A value without any leading digit is still rejected.
    LeadingDigits,
}

/// A typed profile-summary attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Text(String),
    Integer(i64),
}

impl SummaryValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SummaryValue::Integer(n) => Some(*n),
            SummaryValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SummaryValue::Text(s) => Some(s),
            SummaryValue::Integer(_) => None,
        }
    }
}

/// Attributes that stay as text: dates in Experian's own format and Y/N flags.
pub fn is_text_attribute(id: &str) -> bool {
    id == OLDEST_TRADE_DATE || id.contains("Flag")
}

/// Parse a base-10 integer, naming `field` in the error.
pub fn coerce_integer(field: &str, raw: &str, mode: IntegerCoercion) -> ExperianResult<i64> {
    let candidate = match mode {
        IntegerCoercion::Strict => raw.trim(),
        IntegerCoercion::LeadingDigits => leading_integer(raw),
    };

    if candidate.is_empty() {
        return Err(ExperianError::malformed(field, raw, "no digits to parse as an integer"));
    }

    candidate.parse::<i64>().map_err(|e| {
        ExperianError::malformed(field, raw, format!("not a base-10 integer: {e}"))
    })
}

/// Type one summary attribute according to its id.
pub fn summary_value(
    field: &str,
    id: &str,
    raw: &str,
    mode: IntegerCoercion,
) -> ExperianResult<SummaryValue> {
    if is_text_attribute(id) {
        Ok(SummaryValue::Text(raw.to_string()))
    } else {
        coerce_integer(field, raw, mode).map(SummaryValue::Integer)
    }
}

/// Slice of `raw` covering optional sign plus leading digits, after leading whitespace.
fn leading_integer(raw: &str) -> &str {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with('+') || s.starts_with('-'));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        ""
    } else {
        &s[..sign_len + digits]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_attribute_rule() {
        assert!(is_text_attribute("oldestTradeDate"));
        assert!(is_text_attribute("creditActiveFlag"));
        assert!(is_text_attribute("FlagOnly"));
        assert!(!is_text_attribute("totalInquiries"));
        // Case-sensitive substring match.
        assert!(!is_text_attribute("creditactiveflag"));
        assert!(!is_text_attribute("OldestTradeDate"));
    }

    #[test]
    fn test_strict_accepts_padding_and_sign() {
        assert_eq!(coerce_integer("f", "0005", IntegerCoercion::Strict).unwrap(), 5);
        assert_eq!(coerce_integer("f", " 42 ", IntegerCoercion::Strict).unwrap(), 42);
        assert_eq!(coerce_integer("f", "-3", IntegerCoercion::Strict).unwrap(), -3);
    }

    #[test]
    fn test_strict_rejects_trailing_junk() {
        let err = coerce_integer("score", "12abc", IntegerCoercion::Strict).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("score"));
    }

    #[test]
    fn test_empty_value_rejected_in_both_modes() {
        assert!(coerce_integer("f", "", IntegerCoercion::Strict).is_err());
        assert!(coerce_integer("f", "   ", IntegerCoercion::LeadingDigits).is_err());
        assert!(coerce_integer("f", "N/A", IntegerCoercion::LeadingDigits).is_err());
        assert!(coerce_integer("f", "-", IntegerCoercion::LeadingDigits).is_err());
    }

    #[test]
    fn test_leading_digits_takes_prefix() {
        assert_eq!(coerce_integer("f", "12abc", IntegerCoercion::LeadingDigits).unwrap(), 12);
        assert_eq!(coerce_integer("f", "  -7.9", IntegerCoercion::LeadingDigits).unwrap(), -7);
        assert_eq!(coerce_integer("f", "+0031 ", IntegerCoercion::LeadingDigits).unwrap(), 31);
    }

    #[test]
    fn test_overflow_is_malformed() {
        let err = coerce_integer("f", "99999999999999999999", IntegerCoercion::Strict).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_summary_value_typing() {
        assert_eq!(
            summary_value("a", "oldestTradeDate", "01152010", IntegerCoercion::Strict).unwrap(),
            SummaryValue::Text("01152010".into())
        );
        assert_eq!(
            summary_value("a", "creditActiveFlag", "Y", IntegerCoercion::Strict).unwrap(),
            SummaryValue::Text("Y".into())
        );
        assert_eq!(
            summary_value("a", "totalInquiries", "5", IntegerCoercion::Strict).unwrap(),
            SummaryValue::Integer(5)
        );
    }
}
