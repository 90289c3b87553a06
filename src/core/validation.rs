use super::error::ValidationError;
use super::types::*;

/// Check that every stored line amount matches its recomputation.
///
/// Items built through [`LineItem::new`] always pass; deserialized data
/// may not.
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    invoice
        .items()
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let expected = item.recomputed_amount();
            (item.amount() != expected).then(|| {
                ValidationError::new(
                    format!("items.{i}.amount"),
                    format!(
                        "stored amount {} does not match rate * quantity + quantity * (cgst + sgst) = {}",
                        item.amount(),
                        expected
                    ),
                )
            })
        })
        .collect()
}

/// Consistency report for an invoice that did not come through capture,
/// e.g. deserialized data. Returns all errors found (not just the first).
/// Header fields are free text and never checked.
///
/// Rendering does not run this: it only needs
/// [`Invoice::ensure_generatable`], because every amount it prints is
/// recomputed from the numeric inputs.
pub fn validate_for_generation(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !invoice.can_generate() {
        errors.push(ValidationError::new(
            "items",
            "invoice must have at least one line item",
        ));
    }

    for (i, item) in invoice.items().iter().enumerate() {
        if item.description().trim().is_empty() {
            errors.push(ValidationError::new(
                format!("items.{i}.description"),
                "description must not be empty",
            ));
        }
        if item.per().trim().is_empty() {
            errors.push(ValidationError::new(
                format!("items.{i}.per"),
                "unit must not be empty",
            ));
        }
        for (name, value) in [
            ("rate", item.rate()),
            ("cgst_rate", item.cgst_rate()),
            ("sgst_rate", item.sgst_rate()),
            ("quantity", item.quantity()),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                errors.push(ValidationError::new(
                    format!("items.{i}.{name}"),
                    format!("{name} must not be negative, got {value}"),
                ));
            }
        }
    }

    errors.extend(validate_arithmetic(invoice));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_items_are_consistent() {
        let mut invoice = Invoice::new();
        invoice.add_line_item("Widget", "$10.00", "1", "1", "5", "pcs").unwrap();
        assert!(validate_arithmetic(&invoice).is_empty());
        assert!(validate_for_generation(&invoice).is_empty());
    }

    #[test]
    fn empty_invoice_is_not_generatable() {
        let errors = validate_for_generation(&Invoice::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "items");
    }
}
