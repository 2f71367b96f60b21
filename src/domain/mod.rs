// ============================================================================
// Domain Layer - Portal Business Logic
// ============================================================================
//
// Orders are the only aggregate: value objects, events, commands, errors,
// the aggregate itself and a command handler live under `order/`.
// Invoices and tracking records are read-only sample data; account forms
// only validate input. Payment goes through an injected port.
//
// Nothing here touches a network or a database.
//
// ============================================================================

pub mod order;
pub mod invoice;
pub mod tracking;
pub mod account;
pub mod payment;
pub mod contact;
