//! Property-based tests for pricing, capture and the document model.
//!
//! Run with: `cargo test --test proptest_tests`

use gstbill::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

mod common;

/// Non-negative decimal with up to two fractional digits.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|milli| Decimal::new(milli, 3))
}

proptest! {
    #[test]
    fn amount_is_rate_times_quantity_plus_flat_tax(
        rate in money(),
        cgst in money(),
        sgst in money(),
        qty in quantity(),
    ) {
        let expected = (rate * qty + qty * (cgst + sgst))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(compute_amount(rate, cgst, sgst, qty), expected);
    }

    #[test]
    fn amount_never_negative(rate in money(), cgst in money(), sgst in money(), qty in quantity()) {
        prop_assert!(compute_amount(rate, cgst, sgst, qty) >= Decimal::ZERO);
    }

    #[test]
    fn grand_total_grows_by_the_added_amount(
        rates in prop::collection::vec(money(), 1..20),
        qty in quantity(),
    ) {
        let mut invoice = Invoice::new();
        for (i, rate) in rates.iter().enumerate() {
            let before = invoice.grand_total();
            let item = invoice
                .add_line_item(&format!("Item {i}"), &rate.to_string(), "1", "0.5", &qty.to_string(), "pcs")
                .unwrap();
            let amount = item.amount();
            prop_assert_eq!(invoice.grand_total(), before + amount);
        }
        prop_assert_eq!(invoice.items().len(), rates.len());
    }

    #[test]
    fn rejected_input_leaves_items_unchanged(
        existing in 0usize..5,
        junk in "[a-zA-Z#@]{1,8}",
        field_index in 0usize..4,
    ) {
        let mut invoice = Invoice::new();
        for _ in 0..existing {
            invoice.add_line_item("Widget", "10", "1", "1", "5", "pcs").unwrap();
        }
        let total = invoice.grand_total();

        let field = [LineField::Rate, LineField::CgstRate, LineField::SgstRate, LineField::Quantity][field_index];
        let mut draft = LineItemDraft::new()
            .description("Widget")
            .rate("10")
            .cgst_rate("1")
            .sgst_rate("1")
            .quantity("5")
            .per("pcs");
        draft.set(field, junk);

        let is_invalid = matches!(
            invoice.add_draft(&draft),
            Err(InvoiceError::InvalidNumericInput { .. })
        );
        prop_assert!(is_invalid);
        prop_assert_eq!(invoice.items().len(), existing);
        prop_assert_eq!(invoice.grand_total(), total);
    }

    #[test]
    fn currency_formatting_has_two_decimals(value in money()) {
        let text = format_currency(value);
        prop_assert!(text.starts_with('$'));
        let (_, cents) = text.rsplit_once('.').unwrap();
        prop_assert_eq!(cents.len(), 2);
        prop_assert_eq!(parse_amount(LineField::Rate, &text).unwrap(), value);
    }
}

#[cfg(feature = "pdf")]
mod document {
    use super::*;
    use gstbill::render::{BannerImage, RenderConfig, build_document};
    use rust_decimal_macros::dec;

    fn banner() -> BannerImage {
        BannerImage::from_jpeg(crate::common::jpeg(400, 100)).unwrap()
    }

    proptest! {
        #[test]
        fn tabular_text_is_stable(
            names in prop::collection::vec("[A-Za-z][A-Za-z ]{0,11}", 1..10),
            buyer in "[A-Za-z ]{0,20}",
        ) {
            let mut invoice = Invoice::new();
            invoice.set_header_field(HeaderField::BuyerName, buyer);
            for name in &names {
                invoice.add_line_item(name, "2.50", "0.1", "0.1", "4", "pcs").unwrap();
            }
            let config = RenderConfig::default();
            let first = build_document(&invoice, &banner(), &config).tabular_text();
            let second = build_document(&invoice, &banner(), &config).tabular_text();
            prop_assert_eq!(&first, &second);

            let expected_total = format!("Grand Total: {}", format_currency(dec!(10.80) * Decimal::from(names.len())));
            let expected_suffix = format!("{expected_total}\n");
            prop_assert!(first.ends_with(&expected_suffix));
        }
    }
}
