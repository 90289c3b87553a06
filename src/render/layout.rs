//! Page-independent document model: what goes on the invoice, in order.

use crate::core::{HeaderField, Invoice, format_currency, format_quantity};

use super::banner::BannerImage;
use super::config::{INCH, RenderConfig};

/// Headings of the items table.
pub const ITEM_COLUMNS: [&str; 7] = [
    "Description",
    "CGST Rate",
    "SGST Rate",
    "Rate",
    "Quantity",
    "Per",
    "Amount",
];

const DETAIL_WIDTHS: [f64; 2] = [2.5 * INCH, 3.5 * INCH];
const ITEM_WIDTHS: [f64; 7] = [
    2.5 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    0.75 * INCH,
    1.0 * INCH,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const WHITESMOKE: Color = Color::rgb(0.96, 0.96, 0.96);
    pub const BEIGE: Color = Color::rgb(0.96, 0.96, 0.86);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Visual style shared by every cell in a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub font: Font,
    pub text_color: Color,
    pub background: Color,
}

impl RowStyle {
    pub const HEADER: RowStyle = RowStyle {
        font: Font::Bold,
        text_color: Color::WHITESMOKE,
        background: Color::GREY,
    };

    pub const BODY: RowStyle = RowStyle {
        font: Font::Regular,
        text_color: Color::BLACK,
        background: Color::BEIGE,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub style: RowStyle,
}

impl Row {
    pub fn header(cells: Vec<String>) -> Self {
        Self {
            cells,
            style: RowStyle::HEADER,
        }
    }

    pub fn body(cells: Vec<String>) -> Self {
        Self {
            cells,
            style: RowStyle::BODY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column widths in points.
    pub columns: Vec<f64>,
    pub rows: Vec<Row>,
    pub align: Align,
    /// Leading rows repeated at the top of every continuation page.
    pub repeat_rows: usize,
    pub grid_width: f64,
    pub grid_color: Color,
}

impl Table {
    pub fn width(&self) -> f64 {
        self.columns.iter().sum()
    }
}

/// One logical line of a paragraph; wrapped to the page width when placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<TextLine>,
}

/// The banner, already scaled to its display size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBlock {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image(ImageBlock),
    Paragraph(Paragraph),
    Table(Table),
    Spacer(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub blocks: Vec<Block>,
}

impl DocumentModel {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Text of every table row (cells joined by tabs), then the closing
    /// total line. Stable across repeated builds of the same invoice.
    pub fn tabular_text(&self) -> String {
        let mut out = String::new();
        for table in self.tables() {
            for row in &table.rows {
                out.push_str(&row.cells.join("\t"));
                out.push('\n');
            }
            out.push('\n');
        }
        if let Some(total) = self.paragraphs().last().and_then(|p| p.lines.first()) {
            out.push_str(&total.text);
            out.push('\n');
        }
        out
    }
}

/// Lay out `invoice` as banner, address, details table, items table and total.
///
/// Item amounts and the total are recomputed here rather than read from
/// the stored line items.
pub fn build_document(
    invoice: &Invoice,
    banner: &BannerImage,
    config: &RenderConfig,
) -> DocumentModel {
    let spacer = Block::Spacer(config.block_spacing);
    DocumentModel {
        blocks: vec![
            Block::Image(scale_banner(banner, config)),
            spacer.clone(),
            Block::Paragraph(address_paragraph(
                invoice.header_field(HeaderField::BuyerAddress),
            )),
            spacer.clone(),
            Block::Table(details_table(invoice)),
            spacer.clone(),
            Block::Table(items_table(invoice)),
            spacer,
            Block::Paragraph(Paragraph {
                lines: vec![TextLine {
                    text: format!("Grand Total: {}", format_currency(invoice.grand_total())),
                    font: Font::Bold,
                }],
            }),
        ],
    }
}

/// Fit the banner to the printable width, keeping its aspect ratio. A banner
/// taller than the printable height is shrunk to fit on one page.
fn scale_banner(banner: &BannerImage, config: &RenderConfig) -> ImageBlock {
    let ratio = banner.aspect_ratio();
    let width = config.page.printable_width();
    let height = width * ratio;
    let max_height = config.page.printable_height();
    if height > max_height {
        ImageBlock {
            width: max_height / ratio,
            height: max_height,
        }
    } else {
        ImageBlock { width, height }
    }
}

fn address_paragraph(address: &str) -> Paragraph {
    let mut lines = vec![TextLine {
        text: "Buyer Address:".to_string(),
        font: Font::Bold,
    }];
    lines.extend(address.lines().map(|line| TextLine {
        text: line.trim_end().to_string(),
        font: Font::Regular,
    }));
    Paragraph { lines }
}

fn details_table(invoice: &Invoice) -> Table {
    let rows = HeaderField::DETAILS
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let cells = vec![
                field.label().to_string(),
                invoice.header_field(field).to_string(),
            ];
            if i == 0 { Row::header(cells) } else { Row::body(cells) }
        })
        .collect();

    Table {
        columns: DETAIL_WIDTHS.to_vec(),
        rows,
        align: Align::Left,
        repeat_rows: 0,
        grid_width: 0.5,
        grid_color: Color::BLACK,
    }
}

fn items_table(invoice: &Invoice) -> Table {
    let mut rows = vec![Row::header(
        ITEM_COLUMNS.iter().map(|c| c.to_string()).collect(),
    )];
    rows.extend(invoice.items().iter().map(|item| {
        Row::body(vec![
            item.description().to_string(),
            format_quantity(item.cgst_rate()),
            format_quantity(item.sgst_rate()),
            format_currency(item.rate()),
            format_quantity(item.quantity()),
            item.per().to_string(),
            format_currency(item.recomputed_amount()),
        ])
    }));

    Table {
        columns: ITEM_WIDTHS.to_vec(),
        rows,
        align: Align::Center,
        repeat_rows: 1,
        grid_width: 0.5,
        grid_color: Color::BLACK,
    }
}
