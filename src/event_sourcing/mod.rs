// ============================================================================
// Event Sourcing - aggregate trait, envelopes and the in-memory log
// ============================================================================
//
// Knows nothing about orders; `domain::order` plugs into it.
//
// ============================================================================

mod core;
mod store;

pub use self::core::*;
pub use self::store::*;
