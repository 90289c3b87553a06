use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::pricing;

/// A GST invoice: free-form header fields plus goods lines in entry order.
///
/// Every line amount and the grand total fit in a `Decimal`; capture and
/// deserialization both reject input that would break this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceFields")]
pub struct Invoice {
    /// Header values, stored verbatim.
    pub header: InvoiceHeader,
    /// Goods lines. Append-only through [`Invoice::add_line_item`].
    pub(crate) items: Vec<LineItem>,
}

impl Invoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Goods lines in the order they were added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of every line amount, recomputed from the numeric inputs.
    pub fn grand_total(&self) -> Decimal {
        pricing::compute_grand_total(&self.items)
    }
}

#[derive(Deserialize)]
struct InvoiceFields {
    header: InvoiceHeader,
    items: Vec<LineItem>,
}

impl TryFrom<InvoiceFields> for Invoice {
    type Error = InvoiceError;

    fn try_from(fields: InvoiceFields) -> Result<Self, Self::Error> {
        if pricing::checked_grand_total(&fields.items).is_none() {
            return Err(InvoiceError::Validation(
                "items: grand total does not fit in a decimal".into(),
            ));
        }
        Ok(Self {
            header: fields.header,
            items: fields.items,
        })
    }
}

/// Invoice header. Every field is free text; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    pub buyer_name: String,
    pub gst_number: String,
    pub invoice_number: String,
    pub hsn_code: String,
    pub dispatched_through: String,
    pub dispatched_on: String,
    pub date: String,
    pub mode_of_payment: String,
    pub dispatched_vehicle_number: String,
    pub eway_bill_number: String,
    pub cgstin: String,
    pub sgstin: String,
    /// May span several lines.
    pub buyer_address: String,
    pub buyer_phone_number: String,
}

impl InvoiceHeader {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::BuyerName => &self.buyer_name,
            HeaderField::GstNumber => &self.gst_number,
            HeaderField::InvoiceNumber => &self.invoice_number,
            HeaderField::HsnCode => &self.hsn_code,
            HeaderField::DispatchedThrough => &self.dispatched_through,
            HeaderField::DispatchedOn => &self.dispatched_on,
            HeaderField::Date => &self.date,
            HeaderField::ModeOfPayment => &self.mode_of_payment,
            HeaderField::DispatchedVehicleNumber => &self.dispatched_vehicle_number,
            HeaderField::EwayBillNumber => &self.eway_bill_number,
            HeaderField::Cgstin => &self.cgstin,
            HeaderField::Sgstin => &self.sgstin,
            HeaderField::BuyerAddress => &self.buyer_address,
            HeaderField::BuyerPhoneNumber => &self.buyer_phone_number,
        }
    }

    pub fn get_mut(&mut self, field: HeaderField) -> &mut String {
        match field {
            HeaderField::BuyerName => &mut self.buyer_name,
            HeaderField::GstNumber => &mut self.gst_number,
            HeaderField::InvoiceNumber => &mut self.invoice_number,
            HeaderField::HsnCode => &mut self.hsn_code,
            HeaderField::DispatchedThrough => &mut self.dispatched_through,
            HeaderField::DispatchedOn => &mut self.dispatched_on,
            HeaderField::Date => &mut self.date,
            HeaderField::ModeOfPayment => &mut self.mode_of_payment,
            HeaderField::DispatchedVehicleNumber => &mut self.dispatched_vehicle_number,
            HeaderField::EwayBillNumber => &mut self.eway_bill_number,
            HeaderField::Cgstin => &mut self.cgstin,
            HeaderField::Sgstin => &mut self.sgstin,
            HeaderField::BuyerAddress => &mut self.buyer_address,
            HeaderField::BuyerPhoneNumber => &mut self.buyer_phone_number,
        }
    }
}

/// Invoice header fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderField {
    BuyerName,
    GstNumber,
    InvoiceNumber,
    HsnCode,
    DispatchedThrough,
    DispatchedOn,
    Date,
    ModeOfPayment,
    DispatchedVehicleNumber,
    EwayBillNumber,
    Cgstin,
    Sgstin,
    BuyerAddress,
    BuyerPhoneNumber,
}

impl HeaderField {
    /// All fields in the order the form asks for them.
    pub const ALL: [HeaderField; 14] = [
        Self::BuyerName,
        Self::GstNumber,
        Self::InvoiceNumber,
        Self::HsnCode,
        Self::DispatchedThrough,
        Self::DispatchedOn,
        Self::Date,
        Self::ModeOfPayment,
        Self::DispatchedVehicleNumber,
        Self::EwayBillNumber,
        Self::Cgstin,
        Self::Sgstin,
        Self::BuyerAddress,
        Self::BuyerPhoneNumber,
    ];

    /// Rows of the details table. The address is rendered as its own block.
    pub const DETAILS: [HeaderField; 13] = [
        Self::BuyerName,
        Self::GstNumber,
        Self::InvoiceNumber,
        Self::HsnCode,
        Self::DispatchedThrough,
        Self::DispatchedOn,
        Self::Date,
        Self::ModeOfPayment,
        Self::DispatchedVehicleNumber,
        Self::EwayBillNumber,
        Self::Cgstin,
        Self::Sgstin,
        Self::BuyerPhoneNumber,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BuyerName => "Buyer Name",
            Self::GstNumber => "GST Number",
            Self::InvoiceNumber => "Invoice Number",
            Self::HsnCode => "HSN Code",
            Self::DispatchedThrough => "Dispatched Through",
            Self::DispatchedOn => "Dispatched On",
            Self::Date => "Date",
            Self::ModeOfPayment => "Mode of Payment",
            Self::DispatchedVehicleNumber => "Dispatched Vehicle Number",
            Self::EwayBillNumber => "Eway Bill Number",
            Self::Cgstin => "CGSTIN",
            Self::Sgstin => "SGSTIN",
            Self::BuyerAddress => "Buyer Address",
            Self::BuyerPhoneNumber => "Buyer Phone Number",
        }
    }

    /// Parse from a display label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label))
    }

    /// True for fields that accept several lines of text.
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::BuyerAddress)
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The six fields captured for each goods line, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineField {
    Description,
    Rate,
    CgstRate,
    SgstRate,
    Quantity,
    Per,
}

impl LineField {
    pub const ALL: [LineField; 6] = [
        Self::Description,
        Self::Rate,
        Self::CgstRate,
        Self::SgstRate,
        Self::Quantity,
        Self::Per,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description of Goods",
            Self::Rate => "Rate",
            Self::CgstRate => "CGST Rate",
            Self::SgstRate => "SGST Rate",
            Self::Quantity => "Quantity",
            Self::Per => "Per",
        }
    }
}

impl std::fmt::Display for LineField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One goods line.
///
/// The amount is derived from the four numeric inputs when the item is
/// constructed and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemFields")]
pub struct LineItem {
    description: String,
    rate: Decimal,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    quantity: Decimal,
    /// Unit of measure, e.g. "pcs" or "kg".
    per: String,
    amount: Decimal,
}

impl LineItem {
    /// Create a line item, deriving its amount with [`pricing::compute_amount`].
    ///
    /// Fails with [`InvoiceError::InvalidNumericInput`] if the amount does
    /// not fit in a `Decimal`.
    pub fn new(
        description: impl Into<String>,
        rate: Decimal,
        cgst_rate: Decimal,
        sgst_rate: Decimal,
        quantity: Decimal,
        per: impl Into<String>,
    ) -> Result<Self, InvoiceError> {
        let amount = pricing::try_amount(rate, cgst_rate, sgst_rate, quantity).map_err(|field| {
            let value = match field {
                LineField::SgstRate => sgst_rate,
                _ => quantity,
            };
            InvoiceError::InvalidNumericInput {
                field,
                value: value.to_string(),
            }
        })?;
        Ok(Self {
            description: description.into(),
            rate,
            cgst_rate,
            sgst_rate,
            quantity,
            per: per.into(),
            amount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn cgst_rate(&self) -> Decimal {
        self.cgst_rate
    }

    pub fn sgst_rate(&self) -> Decimal {
        self.sgst_rate
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn per(&self) -> &str {
        &self.per
    }

    /// Amount stored at construction (or deserialization).
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount recomputed from the numeric inputs.
    pub fn recomputed_amount(&self) -> Decimal {
        pricing::compute_amount(self.rate, self.cgst_rate, self.sgst_rate, self.quantity)
    }
}

/// Serialized form of [`LineItem`]. The stored amount is kept as given, so
/// [`validate_arithmetic`](super::validate_arithmetic) can report a
/// mismatch; only an amount that cannot be recomputed is rejected.
#[derive(Deserialize)]
struct LineItemFields {
    description: String,
    rate: Decimal,
    cgst_rate: Decimal,
    sgst_rate: Decimal,
    quantity: Decimal,
    per: String,
    amount: Decimal,
}

impl TryFrom<LineItemFields> for LineItem {
    type Error = InvoiceError;

    fn try_from(fields: LineItemFields) -> Result<Self, Self::Error> {
        let item = LineItem::new(
            fields.description,
            fields.rate,
            fields.cgst_rate,
            fields.sgst_rate,
            fields.quantity,
            fields.per,
        )?;
        Ok(Self {
            amount: fields.amount,
            ..item
        })
    }
}
