// src/utils/serialization.rs
//! Serialization utilities for the registry.
//!
//! Thin JSON helpers used for commitment derivation and for audit log export.

use crate::models::event::EventRecord;
use serde::Serialize;

/// Serializes a value to a compact JSON string.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(String)` with JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn serialize<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Renders the audit log as newline-delimited JSON, one event per line.
///
/// External indexers can consume this format incrementally.
pub fn events_to_ndjson(events: &[EventRecord]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for record in events {
        out.push_str(&serialize(record)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::degree::DegreeRecord;
    use crate::models::event::{EventLog, RegistryEvent};
    use ethers_core::types::Address;

    #[test]
    fn test_serialize_preserves_field_order() {
        let degree = DegreeRecord {
            name: "N".into(),
            program: "P".into(),
            institution: "I".into(),
            date: "D".into(),
            id: "X".into(),
        };
        let json = serialize(&degree).unwrap();
        assert_eq!(
            json,
            r#"{"name":"N","program":"P","institution":"I","date":"D","id":"X"}"#
        );
        let back: DegreeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, degree);
    }

    #[test]
    fn test_events_to_ndjson() {
        let mut log = EventLog::new();
        log.emit(RegistryEvent::Issued { id: 0, holder: Address::from_low_u64_be(5) });
        log.emit(RegistryEvent::Revoked { id: 0 });

        let ndjson = events_to_ndjson(log.entries()).unwrap();
        let lines: Vec<&str> = ndjson.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: EventRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.sequence, 1);
        assert_eq!(second.event, RegistryEvent::Revoked { id: 0 });
    }
}
