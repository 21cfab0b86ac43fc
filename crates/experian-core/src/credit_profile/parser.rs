use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

use super::bankruptcy::{self, FilingDateLayout};
use super::coercion::{self, IntegerCoercion, SummaryValue};
use super::document::{CreditProfile, CreditProfileDocument, PROFILE_SUMMARY_TYPE};
use crate::{types::*, ExperianError, ExperianResult};

pub const DEFAULT_BANKRUPTCY_WINDOW_DAYS: i64 = 90;

/// A century of look-back is already far beyond any reporting horizon.
const MAX_BANKRUPTCY_WINDOW_DAYS: i64 = 36_500;

/// Every path reported in errors is relative to the profile actually read.
const PROFILE_PATH: &str = "creditProfile[0]";

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub bankruptcy_window_days: i64,
    pub filing_date_layout: FilingDateLayout,
    pub integer_coercion: IntegerCoercion,
    /// Fail instead of assuming "record found" when `informationalMessage` is missing.
    pub require_informational_message: bool,
    /// Reference time for the bankruptcy window; the local clock when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDateTime>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            bankruptcy_window_days: DEFAULT_BANKRUPTCY_WINDOW_DAYS,
            filing_date_layout: FilingDateLayout::default(),
            integer_coercion: IntegerCoercion::default(),
            require_informational_message: false,
            as_of: None,
        }
    }
}

impl ParseOptions {
    pub fn validate(&self) -> ExperianResult<()> {
        if !(1..=MAX_BANKRUPTCY_WINDOW_DAYS).contains(&self.bankruptcy_window_days) {
            return Err(ExperianError::InvalidInput {
                field: "bankruptcy_window_days".into(),
                reason: format!(
                    "must be between 1 and {MAX_BANKRUPTCY_WINDOW_DAYS}, got {}",
                    self.bankruptcy_window_days
                ),
            });
        }
        if let Some(as_of) = self.as_of {
            bankruptcy::window_cutoff(as_of, self.bankruptcy_window_days)?;
        }
        Ok(())
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.as_of.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Flat summary of one credit profile.
///
/// Every field is `None` when the document carried no credit profile. With a
/// profile present, `no_record`, `profile_summary` and `risk_model` are always
/// set while `tradeline_count` and `is_bankrupt_in_90_days` follow the presence
/// of their source sections. `None` fields are omitted when serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradeline_count: Option<usize>,
    /// Keyed by its historical wire name even when the window is not 90 days.
    #[serde(
        rename = "isBankruptIn90Days",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_bankrupt_in_90_days: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_summary: Option<BTreeMap<String, SummaryValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_model: Option<BTreeMap<String, i64>>,
}

impl ParsedResult {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarise the first credit profile of `document` with default options.
pub fn parse(document: &CreditProfileDocument) -> ExperianResult<ParsedResult> {
    parse_with_options(document, &ParseOptions::default())
}

pub fn parse_with_options(
    document: &CreditProfileDocument,
    options: &ParseOptions,
) -> ExperianResult<ParsedResult> {
    options.validate()?;
    let mut warnings = Vec::new();
    summarise(document, options, options.reference_time(), &mut warnings)
}

/// Decode a raw response body and summarise it.
pub fn parse_value(value: &Value, options: &ParseOptions) -> ExperianResult<ParsedResult> {
    let document = CreditProfileDocument::from_value(value)?;
    parse_with_options(&document, options)
}

/// Summarise and wrap the result with the options used, warnings and timing.
pub fn parse_credit_report(
    document: &CreditProfileDocument,
    options: &ParseOptions,
) -> ExperianResult<ComputationOutput<ParsedResult>> {
    let start = Instant::now();
    options.validate()?;

    let as_of = options.reference_time();
    let mut warnings: Vec<String> = Vec::new();
    let result = summarise(document, options, as_of, &mut warnings)?;

    let assumptions = ParseOptions {
        as_of: Some(as_of),
        ..options.clone()
    };
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Experian credit profile summary: first profile only, bankruptcy flag from public-record filing dates",
        &assumptions,
        warnings,
        elapsed,
        as_of,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Section extraction
// ---------------------------------------------------------------------------

fn summarise(
    document: &CreditProfileDocument,
    options: &ParseOptions,
    as_of: NaiveDateTime,
    warnings: &mut Vec<String>,
) -> ExperianResult<ParsedResult> {
    let Some(profile) = document.active_profile() else {
        tracing::debug!("document has no credit profile");
        return Ok(ParsedResult::default());
    };

    let profiles = document.profile_count();
    if profiles > 1 {
        push_warning(
            warnings,
            format!("creditProfile holds {profiles} profiles; only the first was consulted"),
        );
    }

    let no_record = no_record(profile, options, warnings)?;
    let profile_summary = profile_summary(profile, options.integer_coercion, warnings)
        .map_err(|e| e.within(PROFILE_PATH))?;
    let risk_model =
        risk_model_scores(profile, options.integer_coercion).map_err(|e| e.within(PROFILE_PATH))?;
    let is_bankrupt_in_90_days =
        recent_bankruptcy(profile, options, as_of).map_err(|e| e.within(PROFILE_PATH))?;

    let result = ParsedResult {
        no_record: Some(no_record),
        tradeline_count: profile.tradeline_count(),
        is_bankrupt_in_90_days,
        profile_summary: Some(profile_summary),
        risk_model: Some(risk_model),
    };

    tracing::debug!(
        no_record,
        tradelines = ?result.tradeline_count,
        bankrupt = ?result.is_bankrupt_in_90_days,
        "summarised credit profile"
    );

    Ok(result)
}

fn no_record(
    profile: &CreditProfile,
    options: &ParseOptions,
    warnings: &mut Vec<String>,
) -> ExperianResult<bool> {
    match profile.has_no_record_message() {
        Some(found) => Ok(found),
        None if options.require_informational_message => Err(ExperianError::UnsupportedSchema(
            format!("{PROFILE_PATH}.informationalMessage is missing"),
        )),
        None => {
            push_warning(
                warnings,
                "informationalMessage is missing; noRecord assumed false".to_string(),
            );
            Ok(false)
        }
    }
}

fn profile_summary(
    profile: &CreditProfile,
    mode: IntegerCoercion,
    warnings: &mut Vec<String>,
) -> ExperianResult<BTreeMap<String, SummaryValue>> {
    let mut summary = BTreeMap::new();

    let Some(leading) = profile.leading_summary() else {
        return Ok(summary);
    };

    if !leading.is_profile_summary() {
        push_warning(
            warnings,
            format!(
                "first summary is {:?}, not {PROFILE_SUMMARY_TYPE:?}; profileSummary left empty",
                leading.summary_type.as_deref().unwrap_or("untyped")
            ),
        );
        return Ok(summary);
    }

    let Some(attributes) = leading.attributes.as_deref() else {
        push_warning(
            warnings,
            "profile summary has no attributes".to_string(),
        );
        return Ok(summary);
    };

    for (i, attribute) in attributes.iter().enumerate() {
        let field = format!("summaries[0].attributes[{i}].value");
        let raw = attribute.value.as_deref().ok_or_else(|| {
            ExperianError::malformed(
                field.clone(),
                "",
                format!("attribute {:?} has no value", attribute.id),
            )
        })?;
        let value = coercion::summary_value(&field, &attribute.id, raw, mode)?;
        // Later duplicates overwrite earlier ones.
        summary.insert(attribute.id.clone(), value);
    }

    Ok(summary)
}

fn risk_model_scores(
    profile: &CreditProfile,
    mode: IntegerCoercion,
) -> ExperianResult<BTreeMap<String, i64>> {
    let mut scores = BTreeMap::new();

    for (i, model) in profile.risk_model.iter().flatten().enumerate() {
        let field = format!("riskModel[{i}].score");
        let raw = model.score.as_deref().ok_or_else(|| {
            ExperianError::malformed(
                field.clone(),
                "",
                format!("model {:?} has no score", model.model_indicator),
            )
        })?;
        scores.insert(
            model.model_indicator.clone(),
            coercion::coerce_integer(&field, raw, mode)?,
        );
    }

    Ok(scores)
}

fn recent_bankruptcy(
    profile: &CreditProfile,
    options: &ParseOptions,
    as_of: NaiveDateTime,
) -> ExperianResult<Option<bool>> {
    let Some(records) = profile.public_record.as_deref() else {
        return Ok(None);
    };

    let dates = bankruptcy::bankruptcy_filing_dates(records, options.filing_date_layout)?;
    tracing::debug!(
        public_records = records.len(),
        bankruptcies = dates.len(),
        latest = ?bankruptcy::latest_filing(&dates),
        layout = %options.filing_date_layout,
        "decoded bankruptcy filing dates"
    );

    bankruptcy::filed_within_window(&dates, as_of, options.bankruptcy_window_days).map(Some)
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{message}");
    warnings.push(message);
}
