//! Untyped records coming in from outside.
//!
//! This is the one place a value can claim a kind the variant set doesn't have, so it's where the
//! runtime guard lives: the discriminant is checked against `EventKind` before the rest of the
//! record is looked at.
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DispatchError, Result};
use crate::event::{Event, EventKind, KIND_FIELD};

/// Read the discriminant of a record without decoding the rest of it.
pub fn kind_of(record: &Value) -> Result<EventKind> {
    let tag = match record.get(KIND_FIELD) {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            warn!(discriminant = %other, "non-string discriminant");
            return Err(DispatchError::unhandled(other.to_string()));
        }
        None => {
            warn!("record without discriminant");
            return Err(DispatchError::MissingDiscriminant { field: KIND_FIELD });
        }
    };
    EventKind::from_str(tag).map_err(|_| {
        warn!(kind = %tag, "record of unknown kind");
        DispatchError::unhandled(tag.as_str())
    })
}

pub fn event_from_value(record: Value) -> Result<Event> {
    let kind = kind_of(&record)?;
    debug!(%kind, "decoding record");
    serde_json::from_value(record).map_err(|source| DispatchError::Malformed { kind, source })
}

pub fn parse_event(json: &str) -> Result<Event> {
    event_from_value(serde_json::from_str(json)?)
}

/// Parse a JSON array of records. Stops at the first bad record and reports its index.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            event_from_value(record).map_err(|err| DispatchError::AtIndex {
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

pub fn to_value(event: &Event) -> Result<Value> {
    Ok(serde_json::to_value(event)?)
}
