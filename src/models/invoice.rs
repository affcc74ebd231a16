//! Wire shapes of the `/invoices` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::invoice::{Invoice, NewInvoice};
use crate::domain::types::{RecordId, TypeConstraintError};
use crate::models::envelope::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRecord {
    #[serde(default, alias = "ID", deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub amount: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub month: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = TypeConstraintError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map(RecordId::new).transpose()?,
            amount: record.amount,
            month: record.month,
            year: record.year,
            status: record.status,
            resident_name: record.name,
            flat: record.flat,
        })
    }
}

/// Body of `POST /invoices/issue`.
#[derive(Debug, Serialize, PartialEq)]
pub struct InvoiceBody {
    pub amount: f64,
}

impl From<&NewInvoice> for InvoiceBody {
    fn from(invoice: &NewInvoice) -> Self {
        Self {
            amount: invoice.amount.get(),
        }
    }
}
