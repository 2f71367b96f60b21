//! Domain logic of a small logistics portal: order intake and pricing,
//! lifecycle commands over an in-memory event log, read-only billing and
//! tracking data, account form checks and the table view models.

pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;
pub mod view;
