use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperianError {
    #[error("Malformed value at {field}: {value:?} ({reason})")]
    MalformedValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported schema: {0}")]
    UnsupportedSchema(String),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ExperianError {
    pub(crate) fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ExperianError::MalformedValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Qualify a malformed-value path with the section it was found in.
    pub(crate) fn within(self, prefix: &str) -> Self {
        match self {
            ExperianError::MalformedValue {
                field,
                value,
                reason,
            } => ExperianError::MalformedValue {
                field: format!("{prefix}.{field}"),
                value,
                reason,
            },
            other => other,
        }
    }

    /// True for faults caused by a value inside an otherwise well-shaped document.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ExperianError::MalformedValue { .. })
    }

    /// True when the document does not follow the credit-profile schema at all.
    pub fn is_unsupported_schema(&self) -> bool {
        matches!(self, ExperianError::UnsupportedSchema(_))
    }
}

impl From<serde_json::Error> for ExperianError {
    fn from(e: serde_json::Error) -> Self {
        ExperianError::SerializationError(e.to_string())
    }
}
