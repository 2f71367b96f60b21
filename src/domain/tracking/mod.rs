// ============================================================================
// Tracking Domain - shipment timeline and lookup
// ============================================================================

pub mod record;
pub mod lookup;
pub mod errors;

pub use record::*;
pub use lookup::*;
pub use errors::*;
