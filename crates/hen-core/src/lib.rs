//! hen-core: stable foundation for the heat-exchanger-network stream tools.
//!
//! Contains:
//! - numeric (Real + tolerances + absent-aware text parsing)
//! - units (quantity families + conversion to SI)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::{Quantity, SiValue};
