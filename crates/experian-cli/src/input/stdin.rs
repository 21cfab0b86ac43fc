use serde_json::{Deserializer, Value};
use std::io::{self, Read};

/// Read piped JSON from stdin. Returns None if stdin is a TTY (interactive)
/// or nothing was piped.
///
/// Several whitespace-separated documents (e.g. one response per line) are
/// collected into an array and treated as a batch.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_documents(&buffer)
}

fn parse_documents(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut documents = Deserializer::from_str(trimmed)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Failed to parse piped JSON: {}", e))?;

    if documents.len() == 1 {
        return Ok(documents.pop());
    }
    Ok(Some(Value::Array(documents)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_document() {
        let v = parse_documents(r#" {"creditProfile": []} "#).unwrap();
        assert_eq!(v, Some(json!({ "creditProfile": [] })));
    }

    #[test]
    fn test_document_stream_becomes_batch() {
        let v = parse_documents("{\"a\":1}\n{\"b\":2}\n").unwrap();
        assert_eq!(v, Some(json!([{ "a": 1 }, { "b": 2 }])));
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(parse_documents("  \n").unwrap(), None);
        assert!(parse_documents("{not json").is_err());
    }
}
