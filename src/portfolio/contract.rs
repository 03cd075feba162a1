use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A lease binding one tenant to one property for a date range.
///
/// At most one contract per property is active at a time; opening a new one
/// deactivates the previous holder. Contracts own the obligations generated
/// from them and the payments recorded against them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contract {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Money,
    pub cycle: PaymentCycle,
    pub deposit_amount: Money,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property_id: Uuid,
        tenant_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rent_amount: Money,
        cycle: PaymentCycle,
        deposit_amount: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            tenant_id,
            start_date,
            end_date,
            rent_amount,
            cycle,
            deposit_amount,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// How often rent falls due over the life of a contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentCycle {
    Monthly,
    Bimonthly,
    Quarterly,
    Yearly,
}

impl PaymentCycle {
    /// Number of months between consecutive due dates.
    pub fn months_interval(&self) -> u32 {
        match self {
            PaymentCycle::Monthly => 1,
            PaymentCycle::Bimonthly => 2,
            PaymentCycle::Quarterly => 3,
            PaymentCycle::Yearly => 12,
        }
    }
}
