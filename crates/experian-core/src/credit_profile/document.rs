use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{ExperianError, ExperianResult};

// ---------------------------------------------------------------------------
// Wire schema
// ---------------------------------------------------------------------------

/// Decoded body of the credit-profile inquiry response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditProfileDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_profile: Option<Vec<CreditProfile>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informational_message: Option<Vec<InformationalMessage>>,
    /// Individual accounts; only their number matters here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradeline: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_model: Option<Vec<RiskModelScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_record: Option<Vec<PublicRecord>>,
}

/// Kept as raw values: only an exact `"07"` string matters, so an off-type
/// message number is simply not a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationalMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<Value>,
}

impl InformationalMessage {
    pub fn is_no_record(&self) -> bool {
        self.message_number.as_ref().and_then(Value::as_str) == Some(NO_RECORD_MESSAGE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<SummaryAttribute>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryAttribute {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskModelScore {
    pub model_indicator: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<String>,
}

/// A legal filing. A record is bankruptcy-type when the
/// `bankruptcyAssetAmount` key exists, whatever its value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRecord {
    #[serde(
        default,
        deserialize_with = "key_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub bankruptcy_asset_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

impl CreditProfileDocument {
    /// Decode a raw response body, rejecting shapes the schema does not allow.
    pub fn from_value(value: &Value) -> ExperianResult<Self> {
        if !value.is_object() {
            return Err(ExperianError::UnsupportedSchema(format!(
                "expected a JSON object at the document root, found {}",
                json_kind(value)
            )));
        }
        Self::deserialize(value)
            .map_err(|e| ExperianError::UnsupportedSchema(format!("credit profile document: {e}")))
    }

    /// The profile every lookup is scoped to.
    pub fn active_profile(&self) -> Option<&CreditProfile> {
        self.credit_profile.as_ref().and_then(|profiles| profiles.first())
    }

    pub fn profile_count(&self) -> usize {
        self.credit_profile.as_ref().map_or(0, Vec::len)
    }
}

impl CreditProfile {
    /// `None` when the section itself is missing, so callers can tell
    /// "no message 07" apart from "no messages reported".
    pub fn has_no_record_message(&self) -> Option<bool> {
        self.informational_message.as_ref().map(|messages| {
            messages
                .iter()
                .any(InformationalMessage::is_no_record)
        })
    }

    pub fn tradeline_count(&self) -> Option<usize> {
        self.tradeline.as_ref().map(Vec::len)
    }

    /// The first summary, whatever its type.
    pub fn leading_summary(&self) -> Option<&Summary> {
        self.summaries.as_ref().and_then(|s| s.first())
    }
}

impl Summary {
    pub fn is_profile_summary(&self) -> bool {
        self.summary_type.as_deref() == Some(PROFILE_SUMMARY_TYPE)
    }
}

impl PublicRecord {
    pub fn is_bankruptcy(&self) -> bool {
        self.bankruptcy_asset_amount.is_some()
    }
}

/// Informational message number meaning the subject was not found.
pub const NO_RECORD_MESSAGE: &str = "07";

pub const PROFILE_SUMMARY_TYPE: &str = "Profile Summary";

// ---------------------------------------------------------------------------
// Field deserialisers
// ---------------------------------------------------------------------------

/// Only invoked when the key exists, so an explicit `null` still yields `Some`.
fn key_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
