use std::collections::HashMap;

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};

// ============================================================================
// In-Memory Event Log
// ============================================================================
//
// Append-only history per aggregate. Nothing here is persisted; the log lives
// as long as its owner.
//
// Responsibilities:
// 1. Append events for an aggregate (append-only)
// 2. Load event history for aggregates
// 3. Optimistic concurrency on the expected version
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EventLogError {
    #[error("Cannot append empty event list")]
    EmptyBatch,

    #[error("Concurrency conflict on {aggregate_id}: expected version {expected}, but current is {current}")]
    ConcurrencyConflict {
        aggregate_id: String,
        expected: u64,
        current: u64,
    },

    #[error("Event sequence gap on {aggregate_id}: expected {expected}, got {got}")]
    SequenceGap {
        aggregate_id: String,
        expected: u64,
        got: u64,
    },
}

#[derive(Debug)]
pub struct EventLog<E: DomainEvent> {
    streams: HashMap<String, Vec<EventEnvelope<E>>>,
}

impl<E: DomainEvent> Default for EventLog<E> {
    fn default() -> Self {
        Self { streams: HashMap::new() }
    }
}

impl<E: DomainEvent> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events to the log.
    /// Returns the new version number after appending
    pub fn append_events(
        &mut self,
        aggregate_id: &str,
        expected_version: u64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<u64, EventLogError> {
        if events.is_empty() {
            return Err(EventLogError::EmptyBatch);
        }

        let current_version = self.current_version(aggregate_id);
        if current_version != expected_version {
            return Err(EventLogError::ConcurrencyConflict {
                aggregate_id: aggregate_id.to_string(),
                expected: expected_version,
                current: current_version,
            });
        }

        let mut new_version = expected_version;
        for envelope in &events {
            new_version += 1;
            if envelope.sequence_number != new_version {
                return Err(EventLogError::SequenceGap {
                    aggregate_id: aggregate_id.to_string(),
                    expected: new_version,
                    got: envelope.sequence_number,
                });
            }
        }

        tracing::debug!(
            aggregate_id = %aggregate_id,
            appended = events.len(),
            new_version,
            "Appended events"
        );

        self.streams
            .entry(aggregate_id.to_string())
            .or_default()
            .extend(events);

        Ok(new_version)
    }

    pub fn load_events(&self, aggregate_id: &str) -> &[EventEnvelope<E>] {
        self.streams
            .get(aggregate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn current_version(&self, aggregate_id: &str) -> u64 {
        self.load_events(aggregate_id)
            .last()
            .map(|e| e.sequence_number)
            .unwrap_or(0)
    }

    pub fn aggregate_exists(&self, aggregate_id: &str) -> bool {
        self.streams.contains_key(aggregate_id)
    }

    /// Rebuild an aggregate from its recorded history
    pub fn load_aggregate<A>(&self, aggregate_id: &str) -> anyhow::Result<A>
    where
        A: Aggregate<Event = E>,
        A::Error: std::fmt::Display,
    {
        A::load_from_events(self.load_events(aggregate_id))
    }
}
