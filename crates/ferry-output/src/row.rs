//! Plain data row written by the CSV trace.

use ferry_core::{Event, Port, VehicleId};
use serde::{Deserialize, Serialize};

/// One event, split into columns.
///
/// `id` and `port` are empty for events that carry none (`P: finish`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRow {
    pub seq:    u64,
    /// `P` for the ferry, otherwise the vehicle class tag.
    pub actor:  String,
    pub id:     Option<VehicleId>,
    pub action: String,
    pub port:   Option<Port>,
}

impl TraceRow {
    pub fn new(seq: u64, event: &Event) -> Self {
        let (actor, id) = match event.vehicle() {
            Some((class, id)) => (class.tag().to_string(), Some(id)),
            None => ("P".to_string(), None),
        };
        Self {
            seq,
            actor,
            id,
            action: event.action().to_string(),
            port:   event.port(),
        }
    }
}
