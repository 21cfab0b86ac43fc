use clap::Args;
use serde_json::{json, Value};

use experian_core::credit_profile::{
    parse_credit_report, parse_value, CreditProfileDocument, ParseOptions,
};

use super::options::OptionArgs;
use crate::input;

/// Arguments for summarising credit-profile responses
#[derive(Args)]
pub struct ParseArgs {
    /// Path to a JSON response body, or a JSON array of bodies
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Emit {"error": ...} for a failing document and carry on with the rest
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Print options, warnings and timing alongside the result (single document only)
    #[arg(long)]
    pub envelope: bool,
}

pub fn run_parse(args: ParseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body: Value = if let Some(ref path) = args.input {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input file or piped JSON is required".into());
    };

    let mut options = args.options.resolve()?;
    // One reference time for the whole batch.
    options.as_of = Some(options.reference_time());

    match body {
        Value::Array(items) => {
            if args.envelope {
                return Err("--envelope applies to a single document, not a batch".into());
            }
            parse_batch(&items, &options, args.continue_on_fail)
        }
        single => parse_single(&single, &options, args.envelope),
    }
}

fn parse_single(
    body: &Value,
    options: &ParseOptions,
    envelope: bool,
) -> Result<Value, Box<dyn std::error::Error>> {
    if envelope {
        let document = CreditProfileDocument::from_value(body)?;
        let output = parse_credit_report(&document, options)?;
        Ok(serde_json::to_value(output)?)
    } else {
        Ok(serde_json::to_value(parse_value(body, options)?)?)
    }
}

fn parse_batch(
    items: &[Value],
    options: &ParseOptions,
    continue_on_fail: bool,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut results = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match parse_value(item, options) {
            Ok(result) => results.push(serde_json::to_value(result)?),
            Err(e) if continue_on_fail => {
                tracing::warn!(index, error = %e, "document failed, continuing");
                results.push(json!({ "error": e.to_string() }));
            }
            Err(e) => return Err(format!("document {}: {}", index, e).into()),
        }
    }

    tracing::debug!(documents = items.len(), "batch summarised");
    Ok(Value::Array(results))
}
