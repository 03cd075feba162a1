//! Derives the reminder triggers an external scheduler should fire for an
//! obligation, with ids stable enough for exact-match cancellation.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::portfolio::{Contract, Obligation};

/// Day offsets relative to the due date for the pre-due nudges.
pub const PRE_DUE_OFFSETS_DAYS: [i64; 3] = [-3, -1, 0];
/// Day offsets relative to the due date for the escalating overdue notices.
pub const OVERDUE_OFFSETS_DAYS: [i64; 3] = [1, 7, 30];
/// Hour of day (UTC) at which date-based triggers fire.
pub const REMINDER_HOUR: u32 = 9;
/// Delay between a snooze request and its one-shot trigger.
pub const SNOOZE_DELAY_SECS: i64 = 3600;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReminderKind {
    RentDue,
    Overdue,
    Snooze,
}

/// What the notifier should present when a trigger fires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderPayload {
    pub obligation_id: Uuid,
    pub contract_id: Uuid,
    pub property_id: Uuid,
    pub kind: ReminderKind,
    pub amount: Money,
    pub due_date: NaiveDate,
}

/// A single trigger request for the external scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderRequest {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub payload: ReminderPayload,
}

/// The six standing triggers for an obligation: three pre-due, three overdue.
/// The same obligation always yields the same ids and instants.
pub fn planned_reminders(obligation: &Obligation, contract: &Contract) -> Vec<ReminderRequest> {
    let mut requests = Vec::with_capacity(PRE_DUE_OFFSETS_DAYS.len() + OVERDUE_OFFSETS_DAYS.len());
    for offset in PRE_DUE_OFFSETS_DAYS {
        requests.push(ReminderRequest {
            id: format!("{}_{}", obligation.id, offset),
            fire_at: fire_instant(obligation.due_date, offset),
            payload: payload_for(obligation, contract, ReminderKind::RentDue),
        });
    }
    for offset in OVERDUE_OFFSETS_DAYS {
        requests.push(ReminderRequest {
            id: format!("overdue_{}_{}", obligation.id, offset),
            fire_at: fire_instant(obligation.due_date, offset),
            payload: payload_for(obligation, contract, ReminderKind::Overdue),
        });
    }
    requests
}

/// A one-shot deferred nudge, requested ad hoc. The id embeds the request
/// instant so repeated snoozes never collide.
pub fn snooze_reminder(
    obligation: &Obligation,
    contract: &Contract,
    requested_at: DateTime<Utc>,
) -> ReminderRequest {
    ReminderRequest {
        id: format!("reminder_{}_{}", obligation.id, requested_at.timestamp()),
        fire_at: requested_at + Duration::seconds(SNOOZE_DELAY_SECS),
        payload: payload_for(obligation, contract, ReminderKind::Snooze),
    }
}

/// The six well-known trigger ids for an obligation, whether or not they were
/// ever scheduled. Cancelling an id that was never scheduled is a no-op.
pub fn cancellation_ids(obligation_id: Uuid) -> Vec<String> {
    PRE_DUE_OFFSETS_DAYS
        .iter()
        .map(|offset| format!("{obligation_id}_{offset}"))
        .chain(
            OVERDUE_OFFSETS_DAYS
                .iter()
                .map(|offset| format!("overdue_{obligation_id}_{offset}")),
        )
        .collect()
}

fn payload_for(obligation: &Obligation, contract: &Contract, kind: ReminderKind) -> ReminderPayload {
    ReminderPayload {
        obligation_id: obligation.id,
        contract_id: contract.id,
        property_id: contract.property_id,
        kind,
        amount: obligation.amount,
        due_date: obligation.due_date,
    }
}

fn fire_instant(due_date: NaiveDate, offset_days: i64) -> DateTime<Utc> {
    let date = due_date + Duration::days(offset_days);
    date.and_hms_opt(REMINDER_HOUR, 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}
