use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, ValueEnum};

use experian_core::credit_profile::{FilingDateLayout, IntegerCoercion, ParseOptions};

use crate::input;

/// Options that shape the bankruptcy window; flags override `--options`.
#[derive(Args, Debug, Default)]
pub struct WindowArgs {
    /// Path to a JSON or YAML file of parse options
    #[arg(long)]
    pub options: Option<String>,

    /// Reference time for the bankruptcy window (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Bankruptcy look-back window in days
    #[arg(long)]
    pub window_days: Option<i64>,

    /// How the 8-digit filingDate is decoded
    #[arg(long, value_enum)]
    pub filing_date_layout: Option<LayoutArg>,
}

/// Full parse options: the window settings plus value coercion rules.
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// How numeric attribute values and scores are parsed
    #[arg(long, value_enum)]
    pub integer_coercion: Option<CoercionArg>,

    /// Fail when a profile has no informationalMessage section
    #[arg(long)]
    pub require_informational_message: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    ShiftedMonth,
    Calendar,
}

impl From<LayoutArg> for FilingDateLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::ShiftedMonth => FilingDateLayout::ShiftedMonth,
            LayoutArg::Calendar => FilingDateLayout::Calendar,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CoercionArg {
    Strict,
    LeadingDigits,
}

impl From<CoercionArg> for IntegerCoercion {
    fn from(value: CoercionArg) -> Self {
        match value {
            CoercionArg::Strict => IntegerCoercion::Strict,
            CoercionArg::LeadingDigits => IntegerCoercion::LeadingDigits,
        }
    }
}

impl WindowArgs {
    pub fn resolve(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let options = self.merge()?;
        options.validate()?;
        Ok(options)
    }

    fn merge(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let mut options: ParseOptions = match self.options {
            Some(ref path) => input::file::read_config(path)?,
            None => ParseOptions::default(),
        };

        if let Some(ref raw) = self.as_of {
            options.as_of = Some(parse_as_of(raw)?);
        }
        if let Some(days) = self.window_days {
            options.bankruptcy_window_days = days;
        }
        if let Some(layout) = self.filing_date_layout {
            options.filing_date_layout = layout.into();
        }
        Ok(options)
    }
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let mut options = self.window.merge()?;

        if let Some(mode) = self.integer_coercion {
            options.integer_coercion = mode.into();
        }
        if self.require_informational_message {
            options.require_informational_message = true;
        }

        options.validate()?;
        Ok(options)
    }
}

fn parse_as_of(raw: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("--as-of '{}' is not YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS", raw).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = OptionArgs {
            window: WindowArgs {
                as_of: Some("2026-10-19".into()),
                window_days: Some(30),
                filing_date_layout: Some(LayoutArg::Calendar),
                ..Default::default()
            },
            require_informational_message: true,
            ..Default::default()
        };
        let options = args.resolve().unwrap();
        assert_eq!(options.bankruptcy_window_days, 30);
        assert_eq!(options.filing_date_layout, FilingDateLayout::Calendar);
        assert_eq!(options.integer_coercion, IntegerCoercion::Strict);
        assert!(options.require_informational_message);
        assert_eq!(
            options.as_of,
            NaiveDate::from_ymd_opt(2026, 10, 19).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn test_as_of_accepts_date_time() {
        let dt = parse_as_of("2026-10-19T08:30:00").unwrap();
        assert_eq!(dt.to_string(), "2026-10-19 08:30:00");
        assert!(parse_as_of("19/10/2026").is_err());
    }

    #[test]
    fn test_invalid_window_rejected() {
        let args = WindowArgs {
            window_days: Some(-5),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}
