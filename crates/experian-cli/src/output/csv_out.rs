use serde_json::Value;
use std::io;

use super::{format_scalar, result_of};

/// Write output as CSV to stdout. Nested maps become dotted columns
/// (`riskModel.V4`).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Array(items) => {
            let rows: Vec<Vec<(String, String)>> = items.iter().map(flatten_document).collect();
            let headers = union_headers(&rows);
            if !headers.is_empty() {
                let _ = wtr.write_record(&headers);
            }
            for row in &rows {
                let record: Vec<&str> = headers
                    .iter()
                    .map(|h| {
                        row.iter()
                            .find(|(k, _)| k == h)
                            .map(|(_, v)| v.as_str())
                            .unwrap_or_default()
                    })
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
        other => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten_document(other) {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
        }
    }

    let _ = wtr.flush();
}

fn flatten_document(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(key, val, &mut out);
            }
        }
        other => out.push(("value".to_string(), format_scalar(other))),
    }
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, val) in map {
                flatten_into(&format!("{}.{}", prefix, key), val, out);
            }
        }
        Value::Null => out.push((prefix.to_string(), String::new())),
        _ => out.push((prefix.to_string(), format_scalar(value))),
    }
}

/// Column order is first appearance across rows.
fn union_headers(rows: &[Vec<(String, String)>]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (key, _) in rows.iter().flatten() {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_maps_flatten_to_dotted_keys() {
        let rows = flatten_document(&json!({
            "noRecord": false,
            "profileSummary": {},
            "riskModel": { "V4": 720 }
        }));
        assert_eq!(
            rows,
            vec![
                ("noRecord".to_string(), "false".to_string()),
                ("profileSummary".to_string(), "{}".to_string()),
                ("riskModel.V4".to_string(), "720".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_union_across_error_items() {
        let rows = vec![
            flatten_document(&json!({ "noRecord": true })),
            flatten_document(&json!({ "error": "boom" })),
        ];
        assert_eq!(union_headers(&rows), vec!["noRecord", "error"]);
    }
}
