use napi::Result as NapiResult;
use napi_derive::napi;

use experian_core::credit_profile::{self, bankruptcy, FilingDateLayout, ParseOptions};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn read_options(options_json: Option<String>) -> NapiResult<ParseOptions> {
    match options_json {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(to_napi_error),
        _ => Ok(ParseOptions::default()),
    }
}

fn read_document(document_json: &str) -> NapiResult<credit_profile::CreditProfileDocument> {
    let value: serde_json::Value = serde_json::from_str(document_json).map_err(to_napi_error)?;
    credit_profile::CreditProfileDocument::from_value(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Credit profile
// ---------------------------------------------------------------------------

/// Flat summary of an inquiry response body, `{}` when it has no credit profile.
#[napi]
pub fn parse_credit_profile(document_json: String) -> NapiResult<String> {
    let document = read_document(&document_json)?;
    let output = credit_profile::parse(&document).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn parse_credit_profile_with_options(
    document_json: String,
    options_json: String,
) -> NapiResult<String> {
    let document = read_document(&document_json)?;
    let options = read_options(Some(options_json))?;
    let output =
        credit_profile::parse_with_options(&document, &options).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Summary wrapped with the options used, warnings and timing.
#[napi]
pub fn credit_report_summary(
    document_json: String,
    options_json: Option<String>,
) -> NapiResult<String> {
    let document = read_document(&document_json)?;
    let options = read_options(options_json)?;
    let output =
        credit_profile::parse_credit_report(&document, &options).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Filing dates
// ---------------------------------------------------------------------------

/// Decoded `filingDate` as an ISO `YYYY-MM-DD` string.
#[napi]
pub fn decode_filing_date(raw: String, layout: Option<String>) -> NapiResult<String> {
    let layout: FilingDateLayout = match layout {
        Some(name) => serde_json::from_value(serde_json::Value::String(name))
            .map_err(to_napi_error)?,
        None => FilingDateLayout::default(),
    };
    let date = bankruptcy::decode_filing_date(&raw, layout).map_err(to_napi_error)?;
    Ok(date.format("%Y-%m-%d").to_string())
}
