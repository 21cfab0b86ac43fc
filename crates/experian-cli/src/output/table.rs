use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_of};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                println!("(empty)");
                return;
            }
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("Document {}", index);
                print_summary(item);
            }
        }
        Value::Object(map) => {
            print_summary(result_of(value));
            print_envelope_notes(map);
        }
        _ => println!("{}", value),
    }
}

/// Scalars in one Field/Value table, then each nested map as its own table.
fn print_summary(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_scalar(value));
        return;
    };

    if map.is_empty() {
        println!("(no credit profile)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut sections: Vec<(&String, &Map<String, Value>)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(inner) => sections.push((key, inner)),
            _ => builder.push_record([key.as_str(), &format_scalar(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (title, inner) in sections {
        println!("\n{}", title);
        if inner.is_empty() {
            println!("(none)");
            continue;
        }
        let mut section = Builder::default();
        section.push_record(["Id", "Value"]);
        for (key, val) in inner {
            section.push_record([key.as_str(), &format_scalar(val)]);
        }
        println!("{}", Table::from(section));
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
