use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::invoice::NewInvoice;
use crate::domain::types::Amount;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq)]
/// Draft of the issue-invoice dialog.
pub struct IssueInvoiceForm {
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub amount: f64,
}

impl TryFrom<IssueInvoiceForm> for NewInvoice {
    type Error = FormError;

    fn try_from(form: IssueInvoiceForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            amount: Amount::new(form.amount)?,
        })
    }
}
