// ============================================================================
// Event Sourcing Store
// ============================================================================
//
// In-memory, append-only history. Works with ANY aggregate/event type.
//
// ============================================================================

pub mod event_log;

pub use event_log::{EventLog, EventLogError};
