//! Flow a [`DocumentModel`] onto fixed-size pages.
//!
//! Coordinates are PDF user space: origin at the bottom-left corner, y up.

use super::config::RenderConfig;
use super::layout::{Align, Block, Color, DocumentModel, Font, ImageBlock, Paragraph, Row, Table};
use super::metrics::{text_width, wrap_text};

/// Fraction of the font size below the baseline reserved for descenders.
const DESCENT: f64 = 0.22;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Fill { rect: Rect, color: Color },
    Stroke { rect: Rect, color: Color, line_width: f64 },
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Color,
        text: String,
    },
    /// The banner image, drawn into `rect`.
    Image { rect: Rect },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Primitive>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Place every block top-down, starting a new page whenever the next
/// block (or table row, or paragraph line) does not fit. A row moves to the
/// next page whole; only a row taller than a page is split, continuing
/// under the repeated header rows. Always yields at least one page.
pub fn paginate(model: &DocumentModel, config: &RenderConfig) -> Vec<Page> {
    let mut flow = Flow::new(config);
    for block in &model.blocks {
        match block {
            Block::Spacer(height) => flow.space(*height),
            Block::Image(image) => flow.image(image),
            Block::Paragraph(paragraph) => flow.paragraph(paragraph),
            Block::Table(table) => flow.table(table),
        }
    }
    flow.finish()
}

struct Flow<'a> {
    config: &'a RenderConfig,
    pages: Vec<Page>,
    current: Page,
    cursor: f64,
}

impl<'a> Flow<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            current: Page::default(),
            cursor: config.page.height - config.page.margin_top,
        }
    }

    fn top(&self) -> f64 {
        self.config.page.height - self.config.page.margin_top
    }

    fn bottom(&self) -> f64 {
        self.config.page.margin_bottom
    }

    fn left(&self) -> f64 {
        self.config.page.margin_left
    }

    fn remaining(&self) -> f64 {
        self.cursor - self.bottom()
    }

    fn at_page_top(&self) -> bool {
        self.current.items.is_empty()
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.cursor = self.top();
    }

    /// Break the page if `height` does not fit, unless the page is still
    /// empty. Images are scaled to the printable area beforehand and a
    /// single text line always fits, so nothing placed here overflows.
    fn reserve(&mut self, height: f64) {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    fn space(&mut self, height: f64) {
        if self.at_page_top() {
            return;
        }
        if height >= self.remaining() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn image(&mut self, image: &ImageBlock) {
        self.reserve(image.height);
        let printable = self.config.page.printable_width();
        let x = self.left() + (printable - image.width) / 2.0;
        self.current.items.push(Primitive::Image {
            rect: Rect {
                x,
                y: self.cursor - image.height,
                width: image.width,
                height: image.height,
            },
        });
        self.cursor -= image.height;
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let size = self.config.font_size;
        let line_height = self.config.line_height();
        let width = self.config.page.printable_width();
        for line in &paragraph.lines {
            for wrapped in wrap_text(&line.text, line.font, size, width) {
                self.reserve(line_height);
                let baseline = self.baseline(self.cursor, line_height);
                let x = self.left();
                self.current.items.push(Primitive::Text {
                    x,
                    y: baseline,
                    font: line.font,
                    size,
                    color: Color::BLACK,
                    text: wrapped,
                });
                self.cursor -= line_height;
            }
        }
    }

    fn table(&mut self, table: &Table) {
        let x = self.left() + (self.config.page.printable_width() - table.width()).max(0.0) / 2.0;
        let laid: Vec<LaidRow<'_>> = table
            .rows
            .iter()
            .map(|row| self.lay_row(table, row))
            .collect();
        let repeat = table.repeat_rows.min(laid.len());
        let header_height: f64 = laid[..repeat].iter().map(|r| r.height).sum();

        for (index, row) in laid.iter().enumerate() {
            let (headers, capacity) = if index >= repeat {
                (&laid[..repeat], self.top() - self.bottom() - header_height)
            } else {
                (&laid[..0], self.top() - self.bottom())
            };

            let mut fresh = self.at_page_top();
            if row.height > self.remaining() && !fresh && row.height <= capacity {
                self.continue_table(table, headers, x);
                fresh = true;
            }

            let mut rest = row.clone();
            while rest.height > self.remaining() {
                let fit = self.lines_that_fit();
                if fit == 0 {
                    if fresh {
                        // not even one line fits below the header rows
                        break;
                    }
                    self.continue_table(table, headers, x);
                    fresh = true;
                    continue;
                }
                let (head, tail) =
                    rest.split(fit, self.config.line_height(), self.config.cell_padding);
                self.draw_row(table, &head, x);
                self.continue_table(table, headers, x);
                fresh = true;
                rest = tail;
            }
            self.draw_row(table, &rest, x);
        }
    }

    fn continue_table(&mut self, table: &Table, headers: &[LaidRow<'_>], x: f64) {
        self.new_page();
        for header in headers {
            self.draw_row(table, header, x);
        }
    }

    /// Cell lines that fit in the space left on the page.
    fn lines_that_fit(&self) -> usize {
        let available = self.remaining() - 2.0 * self.config.cell_padding;
        ((available / self.config.line_height()) + 1e-9).floor().max(0.0) as usize
    }

    fn lay_row<'r>(&self, table: &Table, row: &'r Row) -> LaidRow<'r> {
        let padding = self.config.cell_padding;
        let size = self.config.font_size;
        let cells: Vec<Vec<String>> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let text = row.cells.get(i).map(String::as_str).unwrap_or("");
                wrap_text(text, row.style.font, size, (width - 2.0 * padding).max(1.0))
            })
            .collect();
        LaidRow {
            row,
            height: row_height(&cells, self.config.line_height(), padding),
            cells,
        }
    }

    fn draw_row(&mut self, table: &Table, laid: &LaidRow<'_>, x: f64) {
        let padding = self.config.cell_padding;
        let size = self.config.font_size;
        let line_height = self.config.line_height();
        let style = laid.row.style;
        let y = self.cursor - laid.height;

        let mut cell_x = x;
        for (width, lines) in table.columns.iter().zip(&laid.cells) {
            let rect = Rect {
                x: cell_x,
                y,
                width: *width,
                height: laid.height,
            };
            self.current.items.push(Primitive::Fill {
                rect,
                color: style.background,
            });

            let mut line_top = self.cursor - padding;
            for line in lines {
                let text_x = match table.align {
                    Align::Left => cell_x + padding,
                    Align::Center => cell_x + (width - text_width(line, style.font, size)) / 2.0,
                };
                if !line.is_empty() {
                    let baseline = self.baseline(line_top, line_height);
                    self.current.items.push(Primitive::Text {
                        x: text_x,
                        y: baseline,
                        font: style.font,
                        size,
                        color: style.text_color,
                        text: line.clone(),
                    });
                }
                line_top -= line_height;
            }

            if table.grid_width > 0.0 {
                self.current.items.push(Primitive::Stroke {
                    rect,
                    color: table.grid_color,
                    line_width: table.grid_width,
                });
            }
            cell_x += width;
        }
        self.cursor = y;
    }

    /// Baseline of a text line whose box starts at `top`.
    fn baseline(&self, top: f64, line_height: f64) -> f64 {
        let size = self.config.font_size;
        top - line_height + (line_height - size) / 2.0 + DESCENT * size
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.items.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

#[derive(Clone)]
struct LaidRow<'r> {
    row: &'r Row,
    cells: Vec<Vec<String>>,
    height: f64,
}

impl<'r> LaidRow<'r> {
    /// Split after the first `lines` lines of every cell.
    fn split(&self, lines: usize, line_height: f64, padding: f64) -> (Self, Self) {
        let (head, tail): (Vec<_>, Vec<_>) = self
            .cells
            .iter()
            .map(|cell| {
                let (head, tail) = cell.split_at(lines.min(cell.len()));
                (head.to_vec(), tail.to_vec())
            })
            .unzip();
        (
            LaidRow {
                row: self.row,
                height: row_height(&head, line_height, padding),
                cells: head,
            },
            LaidRow {
                row: self.row,
                height: row_height(&tail, line_height, padding),
                cells: tail,
            },
        )
    }
}

fn row_height(cells: &[Vec<String>], line_height: f64, padding: f64) -> f64 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
    lines as f64 * line_height + 2.0 * padding
}
