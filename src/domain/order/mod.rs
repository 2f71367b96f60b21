// ============================================================================
// Order Domain - Business Logic for Orders
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderId, OrderItem, Priority, OrderStatus, PaymentStatus)
// - Draft (the in-progress order owned by the creation form)
// - Pricing (PricingRules, PriceQuote)
// - Validation (ValidationRules, ValidationErrors)
// - Builder (OrderRecordBuilder, Clock, OrderIdGenerator)
// - Events / Commands / Errors
// - Aggregate (Order with lifecycle rules)
// - Command Handler (OrderBook)
//
// ============================================================================

pub mod value_objects;
pub mod draft;
pub mod pricing;
pub mod validation;
pub mod builder;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;
pub mod samples;

// Re-export for convenience
pub use value_objects::*;
pub use draft::*;
pub use pricing::*;
pub use validation::*;
pub use builder::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
pub use samples::sample_orders;
