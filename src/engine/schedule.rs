use chrono::{Datelike, Duration, NaiveDate};

use crate::portfolio::{Contract, Obligation};

/// Expands a contract into its full series of rent obligations.
///
/// Due dates start at the contract's start date and advance by the payment
/// cycle's month interval, clamping the day of month to the target month's
/// length, until the end date is passed. If a step ever fails to move the
/// date forward, generation stops at the last computed date.
pub fn generate_schedule(contract: &Contract) -> Vec<Obligation> {
    let step = contract.cycle.months_interval() as i32;
    let mut schedule = Vec::new();
    let mut due = contract.start_date;
    while due <= contract.end_date {
        schedule.push(Obligation::new(contract.id, due, contract.rent_amount));
        let next = shift_month(due, step);
        if next <= due {
            break;
        }
        due = next;
    }
    schedule
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
