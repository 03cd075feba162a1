use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// One scheduled rent line: a due date and the amount expected on it.
///
/// Obligations are created in bulk by schedule generation and are only ever
/// mutated by marking them paid; a contract renewal discards and regenerates
/// the whole set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Obligation {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

impl Obligation {
    pub fn new(contract_id: Uuid, due_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_id,
            due_date,
            amount,
            is_paid: false,
            paid_date: None,
        }
    }

    /// Records settlement. Calling this again with the same date is a no-op.
    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.is_paid = true;
        self.paid_date = Some(date);
    }
}
