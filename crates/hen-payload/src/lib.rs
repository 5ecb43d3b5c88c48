//! hen-payload: SI-normalized request body for the external solver.
//!
//! Building a payload does not validate. Text that fails to parse becomes a
//! neutral default (zero, or null for optional pressures); callers are
//! expected to gate on an error-free validation pass and the solver performs
//! its own checks.

pub mod build;
pub mod schema;

pub use build::{build_intervals_config_payload, build_payload_si, build_stream_payload};
pub use schema::*;
