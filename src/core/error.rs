use std::path::PathBuf;

use thiserror::Error;

use super::types::LineField;

/// Errors that can occur while capturing line items or generating a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A required line-item field was empty.
    #[error("missing field: {field}")]
    MissingField { field: LineField },

    /// A numeric field could not be parsed after stripping `$` and `,`.
    #[error("invalid numeric input for {field}: {value:?}")]
    InvalidNumericInput { field: LineField, value: String },

    /// Generation was attempted before any line item was added.
    #[error("invoice has no line items")]
    NoItems,

    /// The branding image is missing or not a readable raster image.
    #[error("branding image {} unavailable: {reason}", path.display())]
    AssetMissing { path: PathBuf, reason: String },

    /// Deserialized invoice data is inconsistent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// PDF serialization failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items.0.amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
