use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::banner::BannerImage;
use super::config::PageSetup;
use super::layout::{Color, Font};
use super::paginate::{Page, Primitive, Rect};
use crate::core::InvoiceError;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";
const BANNER: &str = "Im1";

/// Serialize laid-out pages to PDF bytes.
///
/// The output carries no timestamps, so identical input yields identical
/// bytes.
pub fn write_pdf(
    pages: &[Page],
    banner: &BannerImage,
    setup: &PageSetup,
    title: &str,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(type1_font("Helvetica"));
    let bold_id = doc.add_object(type1_font("Helvetica-Bold"));
    let mut image_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => Object::Integer(i64::from(banner.width)),
        "Height" => Object::Integer(i64::from(banner.height)),
        "ColorSpace" => banner.color_space.pdf_name(),
        "BitsPerComponent" => Object::Integer(8),
        "Filter" => "DCTDecode",
    };
    if let Some(decode) = banner.color_space.decode() {
        image_dict.set("Decode", decode.into_iter().map(Object::Integer).collect::<Vec<_>>());
    }
    let image_id =
        doc.add_object(Stream::new(image_dict, banner.data.clone()).with_compression(false));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => Object::Reference(regular_id),
            FONT_BOLD => Object::Reference(bold_id),
        },
        "XObject" => dictionary! {
            BANNER => Object::Reference(image_id),
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| InvoiceError::Pdf(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), real(setup.width), real(setup.height)],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Pdf(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn type1_font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in &page.items {
        match item {
            Primitive::Fill { rect, color } => {
                ops.push(color_op("rg", *color));
                ops.push(rect_op(rect));
                ops.push(Operation::new("f", vec![]));
            }
            Primitive::Stroke {
                rect,
                color,
                line_width,
            } => {
                ops.push(color_op("RG", *color));
                ops.push(Operation::new("w", vec![real(*line_width)]));
                ops.push(rect_op(rect));
                ops.push(Operation::new("S", vec![]));
            }
            Primitive::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                let name = match font {
                    Font::Regular => FONT_REGULAR,
                    Font::Bold => FONT_BOLD,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(color_op("rg", *color));
                ops.push(Operation::new("Tf", vec![name.into(), real(*size)]));
                ops.push(Operation::new("Td", vec![real(*x), real(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Primitive::Image { rect } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(rect.width),
                        0.into(),
                        0.into(),
                        real(rect.height),
                        real(rect.x),
                        real(rect.y),
                    ],
                ));
                ops.push(Operation::new("Do", vec![BANNER.into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn rect_op(rect: &Rect) -> Operation {
    Operation::new(
        "re",
        vec![
            real(rect.x),
            real(rect.y),
            real(rect.width),
            real(rect.height),
        ],
    )
}

fn color_op(operator: &str, color: Color) -> Operation {
    Operation::new(operator, vec![real(color.r), real(color.g), real(color.b)])
}

/// Coordinates are rounded to hundredths of a point.
fn real(value: f64) -> Object {
    Object::from(((value * 100.0).round() / 100.0) as f32)
}

/// Encode text for the standard fonts' WinAnsiEncoding. Characters with no
/// WinAnsi code become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7E}' => ch as u8,
            '\u{A0}'..='\u{FF}' => ch as u32 as u8,
            '\t' => b' ',
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_keeps_latin1_and_replaces_the_rest() {
        assert_eq!(encode_win_ansi("Rs. 10"), b"Rs. 10".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("₹5"), b"?5".to_vec());
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
    }
}
