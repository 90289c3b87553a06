//! # gstbill
//!
//! Capture GST invoice headers and goods lines, and render them to a
//! paginated PDF with a branding banner, a details table, an items table
//! with CGST/SGST and a grand total.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use gstbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut invoice = Invoice::new();
//! invoice.set_header_field(HeaderField::BuyerName, "Sharma Traders");
//! invoice.add_line_item("Widget", "$10.00", "1", "1", "5", "pcs").unwrap();
//! invoice.add_line_item("Bolt", "$5.00", "0.05", "0.05", "5", "pcs").unwrap();
//!
//! assert!(invoice.can_generate());
//! assert_eq!(invoice.grand_total(), dec!(85.50));
//! assert_eq!(format_currency(invoice.grand_total()), "$85.50");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Invoice types, amount computation, line-item capture |
//! | `pdf` | Document layout, pagination and PDF output |
//! | `form` | Session, user notices and the terminal front end |
//! | `all` | Everything (same as the default) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pdf")]
pub mod render;

#[cfg(feature = "form")]
pub mod form;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
