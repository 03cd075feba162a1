use chrono::NaiveDate;
use uuid::Uuid;

use crate::portfolio::{Contract, Obligation};

pub const DUE_SOON_WINDOW_DAYS: i64 = 3;
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Where a single rent line stands relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObligationStatus {
    Paid,
    Overdue,
    DueSoon,
    Upcoming,
}

/// Lifecycle state of a contract relative to a reference day.
///
/// `Expired` means the end date has passed while the active flag is still
/// set, a signal that termination was never processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Active,
    ExpiringSoon,
    Expired,
    Ended,
    Upcoming,
}

pub fn classify_obligation(obligation: &Obligation, today: NaiveDate) -> ObligationStatus {
    if obligation.is_paid {
        return ObligationStatus::Paid;
    }
    if obligation.due_date < today {
        return ObligationStatus::Overdue;
    }
    let days_until = (obligation.due_date - today).num_days();
    if days_until <= DUE_SOON_WINDOW_DAYS {
        ObligationStatus::DueSoon
    } else {
        ObligationStatus::Upcoming
    }
}

/// Whole days an unpaid line has been overdue; zero when paid or not yet due.
pub fn days_overdue(obligation: &Obligation, today: NaiveDate) -> i64 {
    if obligation.is_paid || obligation.due_date >= today {
        return 0;
    }
    (today - obligation.due_date).num_days()
}

/// Classifies a contract. An inactive contract is `Ended` regardless of its
/// dates; the remaining states follow from the date range.
pub fn classify_contract(contract: &Contract, today: NaiveDate) -> ContractStatus {
    if !contract.is_active {
        return ContractStatus::Ended;
    }
    if contract.end_date < today {
        return ContractStatus::Expired;
    }
    if contract.start_date > today {
        return ContractStatus::Upcoming;
    }
    let days_to_end = (contract.end_date - today).num_days();
    if days_to_end <= EXPIRING_SOON_WINDOW_DAYS {
        ContractStatus::ExpiringSoon
    } else {
        ContractStatus::Active
    }
}

/// Earliest unpaid due date across a contract's obligations.
pub fn next_due(contract_id: Uuid, obligations: &[Obligation]) -> Option<NaiveDate> {
    obligations
        .iter()
        .filter(|obligation| obligation.contract_id == contract_id && !obligation.is_paid)
        .map(|obligation| obligation.due_date)
        .min()
}
