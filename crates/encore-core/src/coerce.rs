// Coercion of untrusted upstream event payloads
//
// The ingestion API is treated as untrusted: each record is rebuilt field by
// field into the canonical `Event` shape. A wrong-typed or missing field
// degrades to "" (mandatory text) or None (optional values); it never fails
// the whole payload.

use serde_json::{Map, Number, Value};

use crate::event::Event;

/// Coerce a list payload into events.
///
/// A non-array payload yields no events. Array elements that are not JSON
/// objects are skipped; every object element yields exactly one event.
pub fn events_from_payload(payload: &Value) -> Vec<Event> {
    match payload {
        Value::Array(items) => items.iter().filter_map(event_from_value).collect(),
        _ => Vec::new(),
    }
}

/// Coerce a single record into an event; None when it is not a JSON object.
pub fn event_from_value(value: &Value) -> Option<Event> {
    let record = value.as_object()?;

    Some(Event {
        id: text(record, "id"),
        title: text(record, "title"),
        artist: text(record, "artist"),
        description: text(record, "description"),
        start_date: text(record, "start_date"),
        end_date: text(record, "end_date"),
        venue: text(record, "venue"),
        venue_address: optional_text(record, "venue_address"),
        venue_lat: number(record, "venue_lat"),
        venue_lng: number(record, "venue_lng"),
        genre: text(record, "genre"),
        image_url: optional_text(record, "image_url"),
        price_range: optional_text(record, "price_range"),
        ticket_url: optional_text(record, "ticket_url"),
        ticket_open_time: optional_text(record, "ticket_open_time"),
        age_limit: optional_text(record, "age_limit"),
        artist_profile: optional_text(record, "artist_profile"),
        created_at: text(record, "created_at"),
        updated_at: text(record, "updated_at"),
    })
}

/// Mandatory text: scalars render as text, anything else becomes "".
fn text(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Optional text: present only for truthy scalars.
fn optional_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Integral floats render without a fraction (`12.0` becomes "12").
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Coordinates: present only when the wire value is a JSON number.
fn number(record: &Map<String, Value>, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}
