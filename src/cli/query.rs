//! Query command implementation.
//!
//! Prints the loaded manifest record as JSON for consumption by scripts
//! and the external build pipeline.

use std::fs;
use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

use crate::cli::args::QueryArgs;
use crate::config::SiteConfig;
use crate::log;

/// Execute query command
pub fn run(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let record = serde_json::to_value(config)?;
    let output = shape_output(&record, args);

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Apply --fields and --filter-empty to the serialized record.
fn shape_output(record: &JsonValue, args: &QueryArgs) -> JsonValue {
    let JsonValue::Object(record) = record else {
        return record.clone();
    };

    let mut obj = Map::new();
    match &args.fields {
        Some(fields) => {
            for field in fields {
                match record.get(field) {
                    Some(value) if !args.filter_empty || !is_empty_value(value) => {
                        obj.insert(field.clone(), value.clone());
                    }
                    // Field explicitly requested but absent - show null when not filtering
                    None if !args.filter_empty => {
                        obj.insert(field.clone(), JsonValue::Null);
                    }
                    _ => {}
                }
            }
        }
        None => {
            for (key, value) in record {
                if !args.filter_empty || !is_empty_value(value) {
                    obj.insert(key.clone(), value.clone());
                }
            }
        }
    }

    JsonValue::Object(obj)
}

/// Check if a JSON value is considered "empty" (null, "", [] or {})
fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(arr) => arr.is_empty(),
        JsonValue::Object(obj) => obj.is_empty(),
        _ => false,
    }
}
