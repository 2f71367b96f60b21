// ============================================================================
// View Models - what the portal's tables and cards render
// ============================================================================

pub mod listing;
pub mod dashboard;
pub mod routes;

pub use listing::*;
pub use dashboard::*;
pub use routes::Route;
