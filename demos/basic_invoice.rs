use gstbill::core::*;
use gstbill::render::{self, RenderConfig};

fn main() {
    let mut invoice = Invoice::new();
    invoice.set_header_field(HeaderField::BuyerName, "Sharma Traders");
    invoice.set_header_field(HeaderField::GstNumber, "27AAPFU0939F1ZV");
    invoice.set_header_field(HeaderField::InvoiceNumber, "INV-2024-017");
    invoice.set_header_field(HeaderField::HsnCode, "8471");
    invoice.set_header_field(HeaderField::DispatchedThrough, "Blue Dart");
    invoice.set_header_field(HeaderField::DispatchedOn, "15-06-2024");
    invoice.set_header_field(HeaderField::Date, "15-06-2024");
    invoice.set_header_field(HeaderField::ModeOfPayment, "NEFT");
    invoice.set_header_field(HeaderField::DispatchedVehicleNumber, "MH12AB1234");
    invoice.set_header_field(HeaderField::EwayBillNumber, "301234567890");
    invoice.set_header_field(HeaderField::Cgstin, "27AAPFU0939F1ZV");
    invoice.set_header_field(HeaderField::Sgstin, "27AAPFU0939F1ZV");
    invoice.set_header_field(
        HeaderField::BuyerAddress,
        "12 MG Road\nShivaji Nagar\nPune 411005",
    );
    invoice.set_header_field(HeaderField::BuyerPhoneNumber, "+91 20 2553 0000");

    invoice
        .add_line_item("Widget", "$10.00", "1", "1", "5", "pcs")
        .expect("widget line should be valid");
    invoice
        .add_line_item("Copper wire", "$1,250.00", "22.5", "22.5", "2", "kg")
        .expect("wire line should be valid");

    for item in invoice.items() {
        println!(
            "  {} x {} {} @ {} = {}",
            format_quantity(item.quantity()),
            item.per(),
            item.description(),
            format_currency(item.rate()),
            format_currency(item.amount())
        );
    }
    println!("Grand Total: {}", format_currency(invoice.grand_total()));

    match render::generate_invoice_pdf(&invoice, &RenderConfig::default()) {
        Ok(path) => println!("Written {}", path.display()),
        Err(e) => eprintln!("Could not generate invoice: {e}"),
    }
}
