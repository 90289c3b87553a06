//! Interactive capture of an invoice.
//!
//! [`Session`] owns the invoice for one run and turns every outcome into a
//! [`Notice`]. [`Prompter`] is a terminal front end over any reader and
//! writer; other front ends can drive a `Session` directly.

mod notice;
mod prompt;
mod session;

pub use notice::{Notice, NoticeLevel};
pub use prompt::Prompter;
pub use session::Session;
