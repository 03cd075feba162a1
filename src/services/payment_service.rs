//! Recording payments and settling scheduled obligations.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::engine::reminders;
use crate::money::Money;
use crate::notify::ReminderScheduler;
use crate::portfolio::{Obligation, Payment, PaymentKind, PaymentMethod, Portfolio};

use super::{ServiceError, ServiceResult};

/// Input for a ledger entry against a contract.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub contract_id: Uuid,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub paid_date: Option<NaiveDate>,
    pub is_partial: bool,
    pub notes: Option<String>,
}

pub struct PaymentService;

impl PaymentService {
    pub fn record(portfolio: &mut Portfolio, input: NewPayment) -> ServiceResult<Uuid> {
        if !input.amount.is_positive() {
            return Err(ServiceError::Invalid(
                "Payment amount must be greater than zero".into(),
            ));
        }
        if portfolio.contract(input.contract_id).is_none() {
            return Err(ServiceError::NotFound("Contract".into()));
        }
        let mut payment = Payment::new(
            input.contract_id,
            input.amount,
            input.due_date,
            input.kind,
            input.method,
        );
        payment.paid_date = input.paid_date;
        payment.is_partial = input.is_partial;
        payment.notes = input.notes;
        Ok(portfolio.add_payment(payment))
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<Payment> {
        portfolio
            .remove_payment(id)
            .ok_or_else(|| ServiceError::NotFound("Payment".into()))
    }

    pub fn list_for_contract(portfolio: &Portfolio, contract_id: Uuid) -> Vec<&Payment> {
        portfolio.payments_for_contract(contract_id)
    }

    /// Settles an obligation and cancels its standing reminders.
    ///
    /// Settling twice with the same date lands in the same state; the fixed
    /// id set makes the repeated cancellation harmless.
    pub fn mark_obligation_paid(
        portfolio: &mut Portfolio,
        scheduler: &dyn ReminderScheduler,
        obligation_id: Uuid,
        paid_date: NaiveDate,
    ) -> ServiceResult<()> {
        let obligation = portfolio
            .obligation_mut(obligation_id)
            .ok_or_else(|| ServiceError::NotFound("Obligation".into()))?;
        obligation.mark_paid(paid_date);
        portfolio.touch();
        scheduler.cancel(&reminders::cancellation_ids(obligation_id))?;
        Ok(())
    }

    /// Requests a one-shot deferred reminder for an unpaid obligation.
    pub fn snooze(
        portfolio: &Portfolio,
        scheduler: &dyn ReminderScheduler,
        obligation_id: Uuid,
        requested_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let obligation = portfolio
            .obligation(obligation_id)
            .ok_or_else(|| ServiceError::NotFound("Obligation".into()))?;
        let contract = portfolio
            .contract(obligation.contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        let request = reminders::snooze_reminder(obligation, contract, requested_at);
        scheduler.schedule(&request)?;
        Ok(request.id)
    }

    pub fn overdue(portfolio: &Portfolio, today: NaiveDate) -> Vec<&Obligation> {
        portfolio.unpaid_overdue(today)
    }

    pub fn upcoming(portfolio: &Portfolio, days: i64, today: NaiveDate) -> Vec<&Obligation> {
        portfolio.unpaid_due_within(days, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingScheduler;
    use crate::portfolio::{Contract, PaymentCycle, Property, PropertyKind, Tenant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn portfolio_with_contract() -> (Portfolio, Uuid) {
        let mut portfolio = Portfolio::new("Payments");
        let property_id =
            portfolio.add_property(Property::new("Unit 2", "2 Main St", PropertyKind::Residential));
        let tenant_id = portfolio.add_tenant(Tenant::new("Zhang Min", "555-0101"));
        let contract = Contract::new(
            property_id,
            tenant_id,
            date(2024, 1, 1),
            date(2024, 12, 31),
            Money::from_major(1000),
            PaymentCycle::Monthly,
            Money::from_major(2000),
        );
        let contract_id = portfolio.add_contract(contract);
        (portfolio, contract_id)
    }

    fn entry(contract_id: Uuid) -> NewPayment {
        NewPayment {
            contract_id,
            amount: Money::from_major(1000),
            due_date: date(2024, 2, 1),
            kind: PaymentKind::Rent,
            method: PaymentMethod::MobilePay,
            paid_date: Some(date(2024, 2, 1)),
            is_partial: false,
            notes: None,
        }
    }

    #[test]
    fn record_rejects_zero_amount() {
        let (mut portfolio, contract_id) = portfolio_with_contract();
        let mut input = entry(contract_id);
        input.amount = Money::ZERO;
        let err =
            PaymentService::record(&mut portfolio, input).expect_err("zero amount must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(portfolio.payments.is_empty());
    }

    #[test]
    fn record_requires_an_existing_contract() {
        let mut portfolio = Portfolio::new("Orphan");
        let err = PaymentService::record(&mut portfolio, entry(Uuid::new_v4()))
            .expect_err("unknown contract must fail");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn mark_paid_twice_is_idempotent() {
        let (mut portfolio, contract_id) = portfolio_with_contract();
        let scheduler = RecordingScheduler::new();
        let obligation_id = portfolio.add_obligation(Obligation::new(
            contract_id,
            date(2024, 3, 1),
            Money::from_major(1000),
        ));
        let paid_on = date(2024, 3, 2);

        PaymentService::mark_obligation_paid(&mut portfolio, &scheduler, obligation_id, paid_on)
            .unwrap();
        PaymentService::mark_obligation_paid(&mut portfolio, &scheduler, obligation_id, paid_on)
            .unwrap();

        let obligation = portfolio.obligation(obligation_id).unwrap();
        assert!(obligation.is_paid);
        assert_eq!(obligation.paid_date, Some(paid_on));

        let expected = reminders::cancellation_ids(obligation_id);
        let cancelled = scheduler.cancelled();
        assert_eq!(cancelled.len(), expected.len() * 2);
        assert!(cancelled.iter().all(|id| expected.contains(id)));
    }

    #[test]
    fn snooze_schedules_a_single_deferred_trigger() {
        let (mut portfolio, contract_id) = portfolio_with_contract();
        let scheduler = RecordingScheduler::new();
        let obligation_id = portfolio.add_obligation(Obligation::new(
            contract_id,
            date(2024, 3, 1),
            Money::from_major(1000),
        ));
        let requested_at = chrono::Utc::now();

        let id =
            PaymentService::snooze(&portfolio, &scheduler, obligation_id, requested_at).unwrap();

        let scheduled = scheduler.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].id, id);
        assert!(id.starts_with("reminder_"));
    }

    #[test]
    fn overdue_and_upcoming_views_split_by_date() {
        let (mut portfolio, contract_id) = portfolio_with_contract();
        let today = date(2024, 6, 15);
        portfolio.add_obligation(Obligation::new(
            contract_id,
            date(2024, 6, 1),
            Money::from_major(1000),
        ));
        portfolio.add_obligation(Obligation::new(
            contract_id,
            date(2024, 6, 17),
            Money::from_major(1000),
        ));
        portfolio.add_obligation(Obligation::new(
            contract_id,
            date(2024, 8, 1),
            Money::from_major(1000),
        ));

        assert_eq!(PaymentService::overdue(&portfolio, today).len(), 1);
        assert_eq!(PaymentService::upcoming(&portfolio, 7, today).len(), 1);
    }
}
