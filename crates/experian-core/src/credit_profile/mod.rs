//! Parsing of the Experian credit-profile response body.
//!
//! The inquiry endpoint returns a deeply nested, sparsely populated document.
//! Only the first entry of `creditProfile` is consulted and it is reduced to a
//! flat [`ParsedResult`]: record-found flag, trade-line count, a recent
//! bankruptcy flag, typed profile-summary attributes and risk-model scores.

pub mod bankruptcy;
pub mod coercion;
pub mod document;
pub mod parser;

pub use bankruptcy::FilingDateLayout;
pub use coercion::{IntegerCoercion, SummaryValue};
pub use document::CreditProfileDocument;
pub use parser::{
    parse, parse_credit_report, parse_value, parse_with_options, ParseOptions, ParsedResult,
};
