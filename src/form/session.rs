use std::path::PathBuf;

use tracing::debug;

use super::notice::Notice;
use crate::core::{
    HeaderField, Invoice, LineItem, LineItemDraft, format_currency, format_quantity,
};
use crate::render::{self, RenderConfig};

/// The one invoice being edited, plus where and how it will be rendered.
#[derive(Debug, Clone, Default)]
pub struct Session {
    invoice: Invoice,
    config: RenderConfig,
}

impl Session {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            invoice: Invoice::new(),
            config,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_header(&mut self, field: HeaderField, value: impl Into<String>) {
        self.invoice.set_header_field(field, value);
    }

    /// Submit the add-goods dialog. A warning leaves the invoice unchanged.
    pub fn add_goods(&mut self, draft: &LineItemDraft) -> Result<&LineItem, Notice> {
        self.invoice.add_draft(draft).map_err(|e| {
            debug!(error = %e, "line item rejected");
            Notice::from(e)
        })
    }

    /// Render the invoice to the configured output path.
    pub fn generate(&self) -> Result<PathBuf, Notice> {
        render::generate_invoice_pdf(&self.invoice, &self.config).map_err(Notice::from)
    }

    /// Plain-text listing of the goods entered so far and their total.
    pub fn preview(&self) -> String {
        let mut out = String::new();
        for (i, item) in self.invoice.items().iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {} | {} x {} {} | CGST {} SGST {} | {}\n",
                i + 1,
                item.description(),
                format_quantity(item.quantity()),
                format_currency(item.rate()),
                item.per(),
                format_quantity(item.cgst_rate()),
                format_quantity(item.sgst_rate()),
                format_currency(item.recomputed_amount()),
            ));
        }
        out.push_str(&format!(
            "Grand Total: {}\n",
            format_currency(self.invoice.grand_total())
        ));
        out
    }
}
