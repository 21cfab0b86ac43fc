use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::document::PublicRecord;
use crate::{ExperianError, ExperianResult};

const FILING_DATE_LEN: usize = 8;

/// How the 8-digit `filingDate` maps to a calendar date.
///
/// Both layouts read month from characters `[0,2)`, day from `[2,4)` and year
/// from `[4,8)`. They differ in how the month digits are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingDateLayout {
    /// Month digits are a zero-based month index with overflow rolling into
    /// later months and years: `"01152024"` is 15 February 2024 and
    /// `"12012024"` is 1 January 2025. Years `0..=99` mean `1900..=1999`.
    /// This is the decoding every existing consumer of the flag relies on.
    #[default]
    ShiftedMonth,
    /// Conventional MMDDYYYY. Impossible dates are rejected.
    Calendar,
}

impl std::fmt::Display for FilingDateLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ShiftedMonth => "shifted_month",
            Self::Calendar => "calendar",
        };
        write!(f, "{}", s)
    }
}

/// Decode a raw `filingDate`.
pub fn decode_filing_date(raw: &str, layout: FilingDateLayout) -> ExperianResult<NaiveDate> {
    decode_field("filingDate", raw, layout)
}

fn decode_field(field: &str, raw: &str, layout: FilingDateLayout) -> ExperianResult<NaiveDate> {
    if raw.len() != FILING_DATE_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExperianError::malformed(
            field,
            raw,
            "expected exactly 8 digits (MMDDYYYY)",
        ));
    }

    // All ASCII digits, so these slices are on char boundaries and parse.
    let month: u32 = raw[0..2].parse().unwrap_or_default();
    let day: u32 = raw[2..4].parse().unwrap_or_default();
    let year: i32 = raw[4..8].parse().unwrap_or_default();

    let decoded = match layout {
        FilingDateLayout::ShiftedMonth => normalised_date(year, month, day),
        FilingDateLayout::Calendar => NaiveDate::from_ymd_opt(year, month, day),
    };

    decoded.ok_or_else(|| {
        ExperianError::malformed(field, raw, format!("not a valid date under {layout} layout"))
    })
}

/// Date from a zero-based month index and a day that may fall outside the
/// month, both normalised forward the way a lenient date constructor does.
fn normalised_date(year: i32, month_index: u32, day: u32) -> Option<NaiveDate> {
    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let year = year + (month_index / 12) as i32;
    let first = NaiveDate::from_ymd_opt(year, month_index % 12 + 1, 1)?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// Filing dates of every bankruptcy-type record, in record order.
pub fn bankruptcy_filing_dates(
    records: &[PublicRecord],
    layout: FilingDateLayout,
) -> ExperianResult<Vec<NaiveDate>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_bankruptcy())
        .map(|(i, record)| {
            let field = format!("publicRecord[{i}].filingDate");
            match record.filing_date.as_deref() {
                Some(raw) => decode_field(&field, raw, layout),
                None => Err(ExperianError::malformed(
                    field,
                    "",
                    "bankruptcy record has no filing date",
                )),
            }
        })
        .collect()
}

/// Start of the look-back window; dates must fall strictly after it.
pub fn window_cutoff(as_of: NaiveDateTime, window_days: i64) -> ExperianResult<NaiveDateTime> {
    as_of
        .checked_sub_signed(Duration::days(window_days))
        .ok_or_else(|| ExperianError::InvalidInput {
            field: "as_of".into(),
            reason: format!("{as_of} minus {window_days} days is outside the supported date range"),
        })
}

/// True iff any date, taken at midnight, is strictly after `as_of - window_days`.
pub fn filed_within_window(
    dates: &[NaiveDate],
    as_of: NaiveDateTime,
    window_days: i64,
) -> ExperianResult<bool> {
    let cutoff = window_cutoff(as_of, window_days)?;
    Ok(dates
        .iter()
        .filter_map(|d| d.and_hms_opt(0, 0, 0))
        .any(|midnight| midnight > cutoff))
}

/// Most recent of the decoded dates.
pub fn latest_filing(dates: &[NaiveDate]) -> Option<NaiveDate> {
    dates.iter().copied().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> NaiveDateTime {
        ymd(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_shifted_month_reads_month_as_index() {
        let d = decode_filing_date("01152024", FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(d, ymd(2024, 2, 15));
    }

    #[test]
    fn test_shifted_month_december_rolls_into_next_year() {
        let d = decode_filing_date("12152025", FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(d, ymd(2026, 1, 15));
    }

    #[test]
    fn test_shifted_month_day_overflow() {
        // Index 1 is February; 2026 is not a leap year so day 31 lands on 3 March.
        let d = decode_filing_date("01312026", FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(d, ymd(2026, 3, 3));
        // Month index zero is January.
        let d = decode_filing_date("00312026", FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(d, ymd(2026, 1, 31));
    }

    #[test]
    fn test_shifted_month_day_zero_and_two_digit_year() {
        let d = decode_filing_date("01000099", FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(d, ymd(1999, 1, 31));
    }

    #[test]
    fn test_calendar_layout() {
        let d = decode_filing_date("07152026", FilingDateLayout::Calendar).unwrap();
        assert_eq!(d, ymd(2026, 7, 15));
        assert!(decode_filing_date("00312026", FilingDateLayout::Calendar).is_err());
        assert!(decode_filing_date("02302026", FilingDateLayout::Calendar).is_err());
    }

    #[test]
    fn test_rejects_wrong_length_or_non_digits() {
        for raw in ["0715202", "071520261", "07-15-26", "", "ab152026"] {
            let err = decode_filing_date(raw, FilingDateLayout::ShiftedMonth).unwrap_err();
            assert!(err.is_malformed_input(), "{raw} should be malformed");
        }
    }

    #[test]
    fn test_window_is_strict_and_uses_midnight() {
        // Cutoff is 2026-07-21 12:00.
        assert!(!filed_within_window(&[ymd(2026, 7, 21)], as_of(), 90).unwrap());
        assert!(filed_within_window(&[ymd(2026, 7, 22)], as_of(), 90).unwrap());
        assert!(!filed_within_window(&[], as_of(), 90).unwrap());
    }

    #[test]
    fn test_any_date_in_window_suffices() {
        let dates = [ymd(2019, 1, 1), ymd(2026, 10, 1)];
        assert!(filed_within_window(&dates, as_of(), 90).unwrap());
        assert_eq!(latest_filing(&dates), Some(ymd(2026, 10, 1)));
    }

    #[test]
    fn test_cutoff_before_earliest_date_is_an_error() {
        let earliest = NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap();
        let err = window_cutoff(earliest, 90).unwrap_err();
        assert!(matches!(err, ExperianError::InvalidInput { ref field, .. } if field == "as_of"));
        assert!(filed_within_window(&[], earliest, 90).is_err());
    }

    #[test]
    fn test_only_bankruptcy_records_are_decoded() {
        let records: Vec<PublicRecord> = serde_json::from_value(json!([
            { "filingDate": "garbage" },
            { "bankruptcyAssetAmount": "0", "filingDate": "09012026" }
        ]))
        .unwrap();
        let dates = bankruptcy_filing_dates(&records, FilingDateLayout::ShiftedMonth).unwrap();
        assert_eq!(dates, vec![ymd(2026, 10, 1)]);
    }

    #[test]
    fn test_bankruptcy_without_filing_date_names_record() {
        let records: Vec<PublicRecord> = serde_json::from_value(json!([
            { "bankruptcyAssetAmount": "1000", "filingDate": "01012020" },
            { "bankruptcyAssetAmount": "1000" }
        ]))
        .unwrap();
        let err = bankruptcy_filing_dates(&records, FilingDateLayout::ShiftedMonth).unwrap_err();
        assert!(err.to_string().contains("publicRecord[1].filingDate"));
    }
}
