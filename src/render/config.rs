use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Points per inch.
pub const INCH: f64 = 72.0;

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PageSetup {
    /// US Letter with 30pt margins all round.
    pub const LETTER: PageSetup = PageSetup {
        width: 612.0,
        height: 792.0,
        margin_left: 30.0,
        margin_right: 30.0,
        margin_top: 30.0,
        margin_bottom: 30.0,
    };

    /// A4 with the same margins.
    pub const A4: PageSetup = PageSetup {
        width: 595.0,
        height: 842.0,
        ..Self::LETTER
    };

    pub fn printable_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn printable_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Where the invoice is written, which banner it uses and how it is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output PDF, overwritten on each generation.
    pub output_path: PathBuf,
    /// Branding JPEG printed across the top of the first page.
    pub banner_path: PathBuf,
    pub page: PageSetup,
    /// Body text size in points.
    pub font_size: f64,
    /// Line height as a multiple of the font size.
    pub line_spacing: f64,
    /// Vertical gap between blocks in points.
    pub block_spacing: f64,
    /// Inner padding of table cells in points.
    pub cell_padding: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("invoice.pdf"),
            banner_path: PathBuf::from("banner.jpeg"),
            page: PageSetup::LETTER,
            font_size: 10.0,
            line_spacing: 1.2,
            block_spacing: 12.0,
            cell_padding: 4.0,
        }
    }
}

impl RenderConfig {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_banner_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.banner_path = path.into();
        self
    }

    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Height of one line of body text.
    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_spacing
    }
}
