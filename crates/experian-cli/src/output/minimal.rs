use serde_json::Value;

use super::{format_scalar, result_of};

/// Headline fields in order of priority.
const PRIORITY_KEYS: [&str; 5] = [
    "within_window",
    "isBankruptIn90Days",
    "noRecord",
    "tradelineCount",
    "error",
];

/// Print just the key answer: one line per document.
pub fn print_minimal(value: &Value) {
    match result_of(value) {
        Value::Array(items) => {
            for item in items {
                println!("{}", headline(item));
            }
        }
        other => println!("{}", headline(other)),
    }
}

fn headline(value: &Value) -> String {
    let Value::Object(map) = value else {
        return format_scalar(value);
    };

    if map.is_empty() {
        return "no credit profile".to_string();
    }

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    // Fall back to first field
    map.iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_scalar(val)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_prefers_bankruptcy_flag() {
        let v = json!({ "noRecord": false, "isBankruptIn90Days": true });
        assert_eq!(headline(&v), "isBankruptIn90Days: true");
    }

    #[test]
    fn test_headline_falls_back_through_priorities() {
        assert_eq!(headline(&json!({ "noRecord": true, "riskModel": {} })), "noRecord: true");
        assert_eq!(headline(&json!({})), "no credit profile");
        assert_eq!(headline(&json!({ "error": "bad" })), "error: bad");
    }
}
