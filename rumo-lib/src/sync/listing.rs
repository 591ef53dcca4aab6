use getset::Getters;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{
    Error, Result,
    record::{RevenueRecord, date::display_raw},
    schema::{self, Field, text_of},
};

const WRAPPER_KEY: &str = "data";

/// One row of the open revenue listing: the labels shown to the user, plus the decoded
/// record used to pre-fill the form when the row is selected.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct OpenEntry {
    expedition_label: String,
    client_name: String,
    date_label: String,
    package_value: Decimal,
    status_label: String,
    record: RevenueRecord,
}

impl OpenEntry {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let record = schema::decode(object);
        let text = |field: Field| text_of(field.lookup(object));

        Self {
            expedition_label: non_empty(text(Field::Expedition), "Expedição não informada"),
            client_name: non_empty(text(Field::ClientName), "Cliente não informado"),
            date_label: display_raw(&text(Field::Date)),
            package_value: record.package_value,
            status_label: non_empty(text(Field::Status), "ABERTO"),
            record,
        }
    }
}

fn non_empty(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.into()
    } else {
        text
    }
}

/// Decode a listing response body.
pub fn parse_listing_bytes(body: &[u8]) -> Result<Vec<OpenEntry>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| Error::Format(format!("invalid JSON: {e}")))?;
    parse_listing(value)
}

/// Decode a listing that is either a bare array of records or an object carrying the
/// array under `data`. Entries that are not objects are skipped.
pub fn parse_listing(value: Value) -> Result<Vec<OpenEntry>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove(WRAPPER_KEY) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::Format(format!(
                    "expected an array under `{WRAPPER_KEY}`"
                )));
            }
        },
        other => {
            return Err(Error::Format(format!(
                "expected an array of records, got {}",
                kind(&other)
            )));
        }
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(object) => Some(OpenEntry::from_object(object)),
            other => {
                warn!("Skipping listing entry {i}: expected an object, got {}", kind(other));
                None
            }
        })
        .collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
