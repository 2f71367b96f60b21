// ============================================================================
// Account Domain - signup, login, profile and password reset forms
// ============================================================================

pub mod forms;
pub mod reset;
pub mod errors;

pub use forms::*;
pub use reset::*;
pub use errors::*;
