use std::path::Path;

use crate::core::InvoiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message shown to the user after an action, like a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn generated(path: &Path) -> Self {
        Self::info(
            "Success",
            format!("Invoice generated successfully: {}", path.display()),
        )
    }
}

impl From<&InvoiceError> for Notice {
    fn from(err: &InvoiceError) -> Self {
        match err {
            InvoiceError::MissingField { .. } => {
                Self::warning("Incomplete Data", "Please fill in all fields.")
            }
            InvoiceError::InvalidNumericInput { .. } => Self::warning(
                "Invalid Data",
                "Please enter valid numbers for rates and quantities.",
            ),
            InvoiceError::NoItems => Self::warning(
                "No Items",
                "Please add at least one item before generating the invoice.",
            ),
            InvoiceError::AssetMissing { path, .. } => Self::warning(
                "Missing Banner",
                format!("Branding image {} could not be read.", path.display()),
            ),
            other => Self::warning("Error", other.to_string()),
        }
    }
}

impl From<InvoiceError> for Notice {
    fn from(err: InvoiceError) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self.level {
            NoticeLevel::Info => "i",
            NoticeLevel::Warning => "!",
        };
        write!(f, "[{marker}] {}: {}", self.title, self.message)
    }
}
