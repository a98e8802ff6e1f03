// src/models/event.rs
//! Audit events emitted by the registry.

use crate::models::credential::CredentialId;
use chrono::{DateTime, Utc};
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};

/// Outcome of a successful state-changing operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryEvent {
    Issued { id: CredentialId, holder: Address },
    Revoked { id: CredentialId },
}

/// Entry of the append-only audit log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Position in the log, starting at 0
    pub sequence: u64,
    pub event: RegistryEvent,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered, append-only sequence of emitted events.
///
/// Kept apart from the credential store so observers can replay history
/// while the store only exposes current state.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    entries: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { entries: Vec::new() }
    }

    /// Appends an event and returns its sequence number.
    pub fn emit(&mut self, event: RegistryEvent) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(EventRecord {
            sequence,
            event,
            recorded_at: Utc::now(),
        });
        sequence
    }

    pub fn entries(&self) -> &[EventRecord] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_assigns_sequence_in_order() {
        let mut log = EventLog::new();
        assert!(log.entries().is_empty());

        let holder = Address::from_low_u64_be(9);
        assert_eq!(log.emit(RegistryEvent::Issued { id: 0, holder }), 0);
        assert_eq!(log.emit(RegistryEvent::Revoked { id: 0 }), 1);

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, RegistryEvent::Issued { id: 0, holder });
        assert_eq!(entries[1].event, RegistryEvent::Revoked { id: 0 });
        assert!(entries[0].recorded_at <= entries[1].recorded_at);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_value(RegistryEvent::Revoked { id: 4 }).unwrap();
        assert_eq!(json["kind"], "revoked");
        assert_eq!(json["id"], 4);
    }
}
