use clap::Args;
use serde_json::{json, Value};

use experian_core::credit_profile::bankruptcy::{
    decode_filing_date, filed_within_window, window_cutoff,
};

use super::options::WindowArgs;

/// Arguments for inspecting a single filingDate
#[derive(Args)]
pub struct DecodeFilingDateArgs {
    /// Raw 8-digit filingDate as it appears in publicRecord
    pub raw: String,

    #[command(flatten)]
    pub options: WindowArgs,
}

pub fn run_decode_filing_date(
    args: DecodeFilingDateArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let options = args.options.resolve()?;
    let as_of = options.reference_time();
    let days = options.bankruptcy_window_days;

    let decoded = decode_filing_date(&args.raw, options.filing_date_layout)?;

    Ok(json!({
        "filing_date": args.raw,
        "layout": options.filing_date_layout,
        "decoded": decoded,
        "as_of": as_of,
        "window_days": days,
        "window_start": window_cutoff(as_of, days)?,
        "within_window": filed_within_window(&[decoded], as_of, days)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: DecodeFilingDateArgs,
    }

    #[test]
    fn test_only_window_flags_accepted() {
        assert!(Harness::try_parse_from(["xpn", "07152026", "--as-of", "2026-10-19"]).is_ok());
        assert!(Harness::try_parse_from(["xpn", "07152026", "--integer-coercion", "strict"]).is_err());
        assert!(
            Harness::try_parse_from(["xpn", "07152026", "--require-informational-message"]).is_err()
        );
    }

    #[test]
    fn test_decode_reports_window_membership() {
        let harness = Harness::try_parse_from([
            "xpn",
            "07152026",
            "--as-of",
            "2026-10-19T12:00:00",
            "--filing-date-layout",
            "calendar",
        ])
        .unwrap();
        let out = run_decode_filing_date(harness.args).unwrap();
        assert_eq!(out["decoded"], json!("2026-07-15"));
        assert_eq!(out["window_start"], json!("2026-07-21T12:00:00"));
        assert_eq!(out["within_window"], json!(false));
    }
}
