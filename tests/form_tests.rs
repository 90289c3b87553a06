#![cfg(feature = "form")]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use gstbill::core::*;
use gstbill::form::*;
use gstbill::render::RenderConfig;

mod common;

use common::jpeg;

fn session_in(dir: &Path) -> Session {
    let banner = dir.join("banner.jpeg");
    fs::write(&banner, jpeg(800, 200)).unwrap();
    Session::new(
        RenderConfig::default()
            .with_banner_path(banner)
            .with_output_path(dir.join("invoice.pdf")),
    )
}

fn widget() -> LineItemDraft {
    LineItemDraft::new()
        .description("Widget")
        .rate("$10.00")
        .cgst_rate("1")
        .sgst_rate("1")
        .quantity("5")
        .per("pcs")
}

/// Header answers in form order, with a two-line address and a blank date.
const HEADER_SCRIPT: &str = "\
Sharma Traders
27AAPFU0939F1ZV
INV-017
8471
Blue Dart
14-06-2024

NEFT
MH12AB1234
301234567890
27CGST
27SGST
12 MG Road
Pune

9820000000
";

// --- Session ---

#[test]
fn add_goods_reports_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    let notice = session.add_goods(&widget().per("  ")).unwrap_err();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.title, "Incomplete Data");
    assert_eq!(notice.message, "Please fill in all fields.");

    let notice = session.add_goods(&widget().quantity("five")).unwrap_err();
    assert_eq!(notice.title, "Invalid Data");
    assert_eq!(
        notice.message,
        "Please enter valid numbers for rates and quantities."
    );
    assert!(session.invoice().items().is_empty());

    let item = session.add_goods(&widget()).unwrap();
    assert_eq!(format_currency(item.amount()), "$60.00");
    assert_eq!(session.invoice().items().len(), 1);
}

#[test]
fn generate_without_items_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());

    let notice = session.generate().unwrap_err();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.title, "No Items");
    assert!(!dir.path().join("invoice.pdf").exists());
}

#[test]
fn generate_without_banner_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(
        RenderConfig::default()
            .with_banner_path(dir.path().join("logo.jpeg"))
            .with_output_path(dir.path().join("invoice.pdf")),
    );
    session.add_goods(&widget()).unwrap();

    let notice = session.generate().unwrap_err();
    assert_eq!(notice.title, "Missing Banner");
    assert!(notice.message.contains("logo.jpeg"));
}

#[test]
fn generate_writes_the_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    session.set_header(HeaderField::BuyerName, "Sharma Traders");
    session.add_goods(&widget()).unwrap();

    let path = session.generate().unwrap();
    assert_eq!(path, dir.path().join("invoice.pdf"));
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));

    let notice = Notice::generated(&path);
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, "Success");
    assert!(notice.message.starts_with("Invoice generated successfully: "));
}

#[test]
fn preview_lists_goods_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    session.add_goods(&widget()).unwrap();
    session
        .add_goods(&widget().description("Bolt").rate("5").cgst_rate("0.05").sgst_rate("0.05"))
        .unwrap();

    let preview = session.preview();
    let lines: Vec<&str> = preview.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Widget") && lines[0].ends_with("$60.00"));
    assert!(lines[1].contains("Bolt") && lines[1].ends_with("$25.50"));
    assert_eq!(lines[2], "Grand Total: $85.50");
}

#[test]
fn notice_display() {
    let notice = Notice::from(InvoiceError::NoItems);
    assert_eq!(
        notice.to_string(),
        "[!] No Items: Please add at least one item before generating the invoice."
    );
    assert_eq!(Notice::info("Saved", "ok").to_string(), "[i] Saved: ok");
}

// --- Prompter ---

#[test]
fn capture_header_reads_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let mut prompter = Prompter::new(Cursor::new(HEADER_SCRIPT), Vec::new())
        .with_default_date(Some("15-06-2024".into()));

    assert!(prompter.capture_header(&mut session).unwrap());

    let header = &session.invoice().header;
    assert_eq!(header.buyer_name, "Sharma Traders");
    assert_eq!(header.date, "15-06-2024");
    assert_eq!(header.buyer_address, "12 MG Road\nPune");
    assert_eq!(header.buyer_phone_number, "9820000000");
    assert_eq!(header.sgstin, "27SGST");

    let output = String::from_utf8(prompter.into_output()).unwrap();
    assert!(output.starts_with("Invoice Generator\n"));
    assert!(output.contains("Date [15-06-2024]: "));
    assert!(output.contains("Buyer Address (end with an empty line):"));
}

#[test]
fn blank_date_stays_blank_without_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let mut prompter =
        Prompter::new(Cursor::new(HEADER_SCRIPT), Vec::new()).with_default_date(None);

    assert!(prompter.capture_header(&mut session).unwrap());
    assert_eq!(session.invoice().header.date, "");
}

#[test]
fn capture_header_stops_at_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let mut prompter = Prompter::new(Cursor::new("Sharma Traders\n"), Vec::new());

    assert!(!prompter.capture_header(&mut session).unwrap());
    assert_eq!(session.invoice().header.buyer_name, "Sharma Traders");
}

#[test]
fn capture_line_item_retries_after_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let script = "Widget\nten\n1\n1\n5\npcs\nWidget\n$10.00\n1\n1\n5\npcs\n";
    let mut prompter = Prompter::new(Cursor::new(script), Vec::new());

    let item = prompter.capture_line_item(&mut session).unwrap().unwrap();
    assert_eq!(item.description(), "Widget");
    assert_eq!(session.invoice().items().len(), 1);

    let output = String::from_utf8(prompter.into_output()).unwrap();
    assert_eq!(output.matches("Add Goods").count(), 2);
    assert!(output.contains("[!] Invalid Data"));
    assert!(output.contains("Added Widget ($60.00)"));
}

#[test]
fn scripted_run_generates_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let script = format!(
        "{HEADER_SCRIPT}g\na\nWidget\n\n1\n1\n5\npcs\nWidget\n$10.00\n1\n1\n5\npcs\nl\nx\ng\n"
    );
    let mut prompter =
        Prompter::new(Cursor::new(script), Vec::new()).with_default_date(Some("15-06-2024".into()));

    let path = prompter.run(&mut session).unwrap();
    assert_eq!(path, Some(dir.path().join("invoice.pdf")));
    assert!(dir.path().join("invoice.pdf").exists());

    let output = String::from_utf8(prompter.into_output()).unwrap();
    let no_items = output.find("[!] No Items").unwrap();
    let incomplete = output.find("[!] Incomplete Data").unwrap();
    let success = output.find("[i] Success").unwrap();
    assert!(no_items < incomplete && incomplete < success);
    assert!(output.contains("Grand Total: $60.00"));
    assert!(output.contains("Unknown choice \"x\""));
    assert_eq!(output.matches("[q] Quit").count(), 6);
}

#[test]
fn menu_continues_after_generating() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let script = format!(
        "{HEADER_SCRIPT}a\nWidget\n$10.00\n1\n1\n5\npcs\ng\na\nBolt\n5\n0.05\n0.05\n5\npcs\ng\nq\n"
    );
    let mut prompter = Prompter::new(Cursor::new(script), Vec::new());

    let path = prompter.run(&mut session).unwrap();
    assert_eq!(path, Some(dir.path().join("invoice.pdf")));
    assert_eq!(session.invoice().items().len(), 2);

    let output = String::from_utf8(prompter.into_output()).unwrap();
    assert_eq!(output.matches("[i] Success").count(), 2);
    let doc = lopdf::Document::load(dir.path().join("invoice.pdf")).unwrap();
    let page = *doc.get_pages().values().next().unwrap();
    let content = doc.get_page_content(page).unwrap();
    let total = b"(Grand Total: $85.50)";
    assert!(content.windows(total.len()).any(|w| w == total));
}

#[test]
fn quitting_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let script = format!("{HEADER_SCRIPT}a\nWidget\n$10.00\n1\n1\n5\npcs\nq\n");
    let mut prompter = Prompter::new(Cursor::new(script), Vec::new());

    assert_eq!(prompter.run(&mut session).unwrap(), None);
    assert_eq!(session.invoice().items().len(), 1);
    assert!(!dir.path().join("invoice.pdf").exists());
}
