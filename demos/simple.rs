//! Encoding nested host values.
//!
//! Run with: cargo run --example simple

use chrono::{TimeZone, Utc};
use objson::{to_string, to_string_with_options, value, DateUnit, EncodeOptions, HostObject, Value};
use std::error::Error;
use std::sync::Arc;

/// A host object reached only through member reflection.
#[derive(Debug)]
struct User {
    id: i64,
    name: String,
}

impl HostObject for User {
    fn type_name(&self) -> &str {
        "User"
    }

    fn dir(&self) -> Vec<String> {
        vec!["name".into(), "id".into(), "_secret".into()]
    }

    fn getattr(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id)),
            "name" => Some(Value::from(self.name.as_str())),
            _ => None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let nan = f64::NAN;
    let created = Utc.with_ymd_and_hms(2013, 1, 1, 12, 30, 0).unwrap();

    let doc = value!({
        "users": [
            (Value::Object(Arc::new(User { id: 42, name: "Alice Johnson".into() }))),
            (Value::Object(Arc::new(User { id: 43, name: "Bob Smith".into() })))
        ],
        "readings": [1.5, 2.25, nan],
        "created": created,
        "note": "café <b>"
    });

    // Default options: ASCII output, epoch milliseconds, NaN as null.
    println!("default:\n{}\n", to_string(&doc)?);

    let options = EncodeOptions::new()
        .with_ensure_ascii(false)
        .with_encode_html_chars(true)
        .with_iso_dates(true)
        .with_date_unit(DateUnit::Seconds)
        .with_double_precision(1);
    println!("customized:\n{}", to_string_with_options(&doc, options)?);

    Ok(())
}
