use tracing::debug;

use super::error::InvoiceError;
use super::pricing::parse_amount;
use super::types::{HeaderField, Invoice, LineField, LineItem};

/// Raw text for one goods line, as typed into the add-goods dialog.
///
/// ```
/// use gstbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let item = LineItemDraft::new()
///     .description("Widget")
///     .rate("$10.00")
///     .cgst_rate("1")
///     .sgst_rate("1")
///     .quantity("5")
///     .per("pcs")
///     .submit()
///     .unwrap();
/// assert_eq!(item.amount(), dec!(60.00));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemDraft {
    pub description: String,
    pub rate: String,
    pub cgst_rate: String,
    pub sgst_rate: String,
    pub quantity: String,
    pub per: String,
}

impl LineItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = value.into();
        self
    }

    pub fn rate(mut self, value: impl Into<String>) -> Self {
        self.rate = value.into();
        self
    }

    pub fn cgst_rate(mut self, value: impl Into<String>) -> Self {
        self.cgst_rate = value.into();
        self
    }

    pub fn sgst_rate(mut self, value: impl Into<String>) -> Self {
        self.sgst_rate = value.into();
        self
    }

    pub fn quantity(mut self, value: impl Into<String>) -> Self {
        self.quantity = value.into();
        self
    }

    pub fn per(mut self, value: impl Into<String>) -> Self {
        self.per = value.into();
        self
    }

    pub fn get(&self, field: LineField) -> &str {
        match field {
            LineField::Description => &self.description,
            LineField::Rate => &self.rate,
            LineField::CgstRate => &self.cgst_rate,
            LineField::SgstRate => &self.sgst_rate,
            LineField::Quantity => &self.quantity,
            LineField::Per => &self.per,
        }
    }

    pub fn set(&mut self, field: LineField, value: impl Into<String>) {
        let slot = match field {
            LineField::Description => &mut self.description,
            LineField::Rate => &mut self.rate,
            LineField::CgstRate => &mut self.cgst_rate,
            LineField::SgstRate => &mut self.sgst_rate,
            LineField::Quantity => &mut self.quantity,
            LineField::Per => &mut self.per,
        };
        *slot = value.into();
    }

    /// Every empty (or whitespace-only) field, in form order.
    pub fn missing_fields(&self) -> Vec<LineField> {
        LineField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Validate the draft and build the line item.
    ///
    /// Reports the first empty field as [`InvoiceError::MissingField`], then
    /// the first unparseable number as [`InvoiceError::InvalidNumericInput`].
    /// An amount too large for a `Decimal` is also `InvalidNumericInput`,
    /// naming the field (and raw text) blamed for the overflow.
    pub fn submit(&self) -> Result<LineItem, InvoiceError> {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(InvoiceError::MissingField { field });
        }

        let rate = parse_amount(LineField::Rate, &self.rate)?;
        let cgst_rate = parse_amount(LineField::CgstRate, &self.cgst_rate)?;
        let sgst_rate = parse_amount(LineField::SgstRate, &self.sgst_rate)?;
        let quantity = parse_amount(LineField::Quantity, &self.quantity)?;

        LineItem::new(
            self.description.trim(),
            rate,
            cgst_rate,
            sgst_rate,
            quantity,
            self.per.trim(),
        )
        .map_err(|err| match err {
            InvoiceError::InvalidNumericInput { field, .. } => self.invalid(field),
            other => other,
        })
    }

    fn invalid(&self, field: LineField) -> InvoiceError {
        InvoiceError::InvalidNumericInput {
            field,
            value: self.get(field).to_string(),
        }
    }
}

impl Invoice {
    /// Validate the six raw fields and append the resulting line item.
    ///
    /// On error the invoice is left unchanged.
    pub fn add_line_item(
        &mut self,
        description: &str,
        rate: &str,
        cgst_rate: &str,
        sgst_rate: &str,
        quantity: &str,
        per: &str,
    ) -> Result<&LineItem, InvoiceError> {
        let draft = LineItemDraft::new()
            .description(description)
            .rate(rate)
            .cgst_rate(cgst_rate)
            .sgst_rate(sgst_rate)
            .quantity(quantity)
            .per(per);
        self.add_draft(&draft)
    }

    /// Validate `draft` and append the resulting line item.
    ///
    /// An item whose amount would push the grand total past `Decimal::MAX`
    /// is rejected on its quantity.
    pub fn add_draft(&mut self, draft: &LineItemDraft) -> Result<&LineItem, InvoiceError> {
        let item = draft.submit()?;
        if self.grand_total().checked_add(item.amount()).is_none() {
            return Err(draft.invalid(LineField::Quantity));
        }
        debug!(
            description = item.description(),
            amount = %item.amount(),
            position = self.items.len(),
            "line item added"
        );
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn set_header_field(&mut self, field: HeaderField, value: impl Into<String>) {
        *self.header.get_mut(field) = value.into();
    }

    pub fn header_field(&self, field: HeaderField) -> &str {
        self.header.get(field)
    }

    /// True once at least one line item exists.
    pub fn can_generate(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn ensure_generatable(&self) -> Result<(), InvoiceError> {
        if self.can_generate() {
            Ok(())
        } else {
            Err(InvoiceError::NoItems)
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn widget() -> LineItemDraft {
        LineItemDraft::new()
            .description("Widget")
            .rate("$10.00")
            .cgst_rate("1")
            .sgst_rate("1")
            .quantity("5")
            .per("pcs")
    }

    #[test]
    fn missing_fields_lists_all_blanks_in_order() {
        let draft = widget().rate("").per("   ");
        assert_eq!(draft.missing_fields(), vec![LineField::Rate, LineField::Per]);
        let err = draft.submit().unwrap_err();
        assert!(matches!(err, InvoiceError::MissingField { field: LineField::Rate }));
    }

    #[test]
    fn missing_field_wins_over_invalid_number() {
        let err = widget().rate("abc").per("").submit().unwrap_err();
        assert!(matches!(err, InvoiceError::MissingField { field: LineField::Per }));
    }

    #[test]
    fn first_invalid_number_is_reported() {
        let err = widget().sgst_rate("x").quantity("y").submit().unwrap_err();
        match err {
            InvoiceError::InvalidNumericInput { field, value } => {
                assert_eq!(field, LineField::SgstRate);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn set_updates_the_matching_field() {
        let mut draft = LineItemDraft::new();
        for field in LineField::ALL {
            draft.set(field, field.label());
        }
        for field in LineField::ALL {
            assert_eq!(draft.get(field), field.label());
        }
    }

    #[test]
    fn add_draft_returns_stored_item() {
        let mut invoice = Invoice::new();
        let item = invoice.add_draft(&widget()).unwrap();
        assert_eq!(item.amount(), dec!(60.00));
        assert_eq!(item.per(), "pcs");
        assert_eq!(invoice.items().len(), 1);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let item = widget().description("  Widget  ").per(" kg ").submit().unwrap();
        assert_eq!(item.description(), "Widget");
        assert_eq!(item.per(), "kg");
    }

    #[test]
    fn overflowing_amount_names_the_raw_quantity() {
        let err = widget()
            .rate("100,000,000,000,000,000,000")
            .quantity("$100,000,000,000,000,000,000")
            .submit()
            .unwrap_err();
        match err {
            InvoiceError::InvalidNumericInput { field, value } => {
                assert_eq!(field, LineField::Quantity);
                assert_eq!(value, "$100,000,000,000,000,000,000");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
