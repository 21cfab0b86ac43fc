pub mod filing_date;
pub mod options;
pub mod parse;
