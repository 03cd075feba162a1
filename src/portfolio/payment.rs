use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// An actual recorded money movement against a contract.
///
/// Payments are ledger entries independent of obligations: settling an
/// obligation does not create or reference a payment record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(
        contract_id: Uuid,
        amount: Money,
        due_date: NaiveDate,
        kind: PaymentKind,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_id,
            amount,
            due_date,
            kind,
            method,
            paid_date: None,
            is_partial: false,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentKind {
    Rent,
    LateFee,
    Deposit,
    DepositReturn,
}

impl PaymentKind {
    /// Whether the movement counts toward income. Deposit returns flow back
    /// out to the tenant.
    pub fn is_income(&self) -> bool {
        !matches!(self, PaymentKind::DepositReturn)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    BankTransfer,
    MobilePay,
    Cash,
}
