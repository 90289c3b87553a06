//! Core invoice types, pricing and capture.
//!
//! This module holds the in-memory invoice aggregate, the single
//! text-to-number boundary and the CGST/SGST amount computation.

mod capture;
mod error;
pub mod pricing;
mod types;
mod validation;

pub use capture::*;
pub use error::*;
pub use pricing::{
    checked_amount, checked_grand_total, compute_amount, compute_grand_total, format_currency,
    format_quantity, parse_amount,
};
pub use types::*;
pub use validation::*;
