//! Pure computations over portfolio snapshots: schedule expansion, status
//! classification, money rollups, and reminder planning. Nothing here talks
//! to storage or notifiers; callers pass the reference time in.

pub mod reminders;
pub mod schedule;
pub mod status;
pub mod summary;

pub use reminders::{ReminderKind, ReminderPayload, ReminderRequest};
pub use schedule::generate_schedule;
pub use status::{
    classify_contract, classify_obligation, days_overdue, next_due, ContractStatus,
    ObligationStatus,
};
pub use summary::{ContractTotals, PortfolioTotals, PropertySummary, YearlySummary};
