//! PDF rendering of an [`Invoice`](crate::core::Invoice).
//!
//! Rendering happens in three stages:
//!
//! | Stage | Output |
//! |-------|--------|
//! | [`build_document`] | ordered blocks: banner, address, details table, items table, total |
//! | [`paginate`] | positioned fills, strokes, text runs and image placements per page |
//! | [`write_pdf`] | PDF 1.7 bytes via `lopdf` |
//!
//! [`generate_invoice_pdf`] runs all three against the configured banner
//! and replaces the output file only once the whole document is in memory.

mod banner;
mod config;
mod layout;
pub mod metrics;
mod paginate;
mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use banner::{BannerImage, ColorSpace};
pub use config::{INCH, PageSetup, RenderConfig};
pub use layout::{
    Align, Block, Color, DocumentModel, Font, ITEM_COLUMNS, ImageBlock, Paragraph, Row, RowStyle,
    Table, TextLine, build_document,
};
pub use paginate::{Page, Primitive, Rect, paginate};
pub use pdf::write_pdf;

use crate::core::{HeaderField, Invoice, InvoiceError};

/// Render `invoice` to PDF bytes without touching the output path.
///
/// Fails with [`InvoiceError::NoItems`] before the banner is even read.
pub fn render_invoice(invoice: &Invoice, config: &RenderConfig) -> Result<Vec<u8>, InvoiceError> {
    invoice.ensure_generatable()?;
    let banner = BannerImage::load(&config.banner_path)?;
    render_with_banner(invoice, &banner, config)
}

/// Render `invoice` with an already loaded banner.
pub fn render_with_banner(
    invoice: &Invoice,
    banner: &BannerImage,
    config: &RenderConfig,
) -> Result<Vec<u8>, InvoiceError> {
    invoice.ensure_generatable()?;
    let model = build_document(invoice, banner, config);
    let pages = paginate(&model, config);
    debug!(
        items = invoice.items().len(),
        pages = pages.len(),
        "invoice laid out"
    );
    write_pdf(&pages, banner, &config.page, &document_title(invoice))
}

/// Render `invoice` and write it to `config.output_path`, replacing any
/// previous file. On error the output path is left as it was.
pub fn generate_invoice_pdf(
    invoice: &Invoice,
    config: &RenderConfig,
) -> Result<PathBuf, InvoiceError> {
    let bytes = render_invoice(invoice, config).inspect_err(|e| {
        warn!(error = %e, "invoice generation failed");
    })?;
    write_atomically(&config.output_path, &bytes)?;
    info!(
        path = %config.output_path.display(),
        bytes = bytes.len(),
        "invoice written"
    );
    Ok(config.output_path.clone())
}

fn document_title(invoice: &Invoice) -> String {
    let number = invoice.header_field(HeaderField::InvoiceNumber).trim();
    if number.is_empty() {
        "Invoice".to_string()
    } else {
        format!("Invoice {number}")
    }
}

/// Write to a sibling temporary file, then rename it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), InvoiceError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "invoice.pdf".to_string());
    let staging = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&staging, bytes)
        .and_then(|()| fs::rename(&staging, path))
        .map_err(|e| {
            let _ = fs::remove_file(&staging);
            InvoiceError::Io(e)
        })
}
