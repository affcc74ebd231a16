//! Maintenance invoices issued to residents.

use serde::Serialize;

use crate::domain::types::{Amount, RecordId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Invoice {
    pub id: Option<RecordId>,
    pub amount: f64,
    pub month: String,
    pub year: String,
    pub status: Option<String>,
    pub resident_name: Option<String>,
    pub flat: Option<String>,
}

/// Payload for issuing a new invoice to every resident.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewInvoice {
    pub amount: Amount,
}
