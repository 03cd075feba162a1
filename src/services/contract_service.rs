//! Contract lifecycle: creation, renewal, termination, and removal.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::engine::{reminders, schedule};
use crate::money::Money;
use crate::notify::ReminderScheduler;
use crate::portfolio::{Contract, PaymentCycle, Portfolio};

use super::{ServiceError, ServiceResult};

/// Input for opening a new contract on a property.
#[derive(Debug, Clone)]
pub struct NewContract {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_amount: Money,
    pub cycle: PaymentCycle,
    pub deposit_amount: Money,
}

pub struct ContractService;

impl ContractService {
    /// Opens a contract, expands its schedule, and registers reminders for
    /// every generated obligation.
    ///
    /// A property can only carry one active contract; any prior holder is
    /// deactivated as part of this call rather than reported as an error.
    pub fn create(
        portfolio: &mut Portfolio,
        scheduler: &dyn ReminderScheduler,
        input: NewContract,
    ) -> ServiceResult<Uuid> {
        if input.start_date >= input.end_date {
            return Err(ServiceError::Invalid(
                "End date must be after start date".into(),
            ));
        }
        if !input.rent_amount.is_positive() {
            return Err(ServiceError::Invalid(
                "Rent amount must be greater than zero".into(),
            ));
        }
        if input.deposit_amount.is_negative() {
            return Err(ServiceError::Invalid(
                "Deposit amount must not be negative".into(),
            ));
        }
        if portfolio.property(input.property_id).is_none() {
            return Err(ServiceError::NotFound("Property".into()));
        }
        if portfolio.tenant(input.tenant_id).is_none() {
            return Err(ServiceError::NotFound("Tenant".into()));
        }

        let replaced = portfolio.deactivate_contracts_for_property(input.property_id);
        if replaced > 0 {
            tracing::info!(property = %input.property_id, replaced, "active contract superseded");
        }

        let contract = Contract::new(
            input.property_id,
            input.tenant_id,
            input.start_date,
            input.end_date,
            input.rent_amount,
            input.cycle,
            input.deposit_amount,
        );
        let contract_id = contract.id;
        let obligations = schedule::generate_schedule(&contract);
        tracing::info!(contract = %contract_id, lines = obligations.len(), "contract created");

        let mut requests = Vec::new();
        for obligation in &obligations {
            requests.extend(reminders::planned_reminders(obligation, &contract));
        }
        portfolio.add_contract(contract);
        for obligation in obligations {
            portfolio.add_obligation(obligation);
        }
        for request in &requests {
            scheduler.schedule(request)?;
        }
        Ok(contract_id)
    }

    /// Extends a contract and regenerates its schedule from scratch.
    ///
    /// Regeneration is destructive: the previous obligations, paid or not,
    /// are dropped together with their reminders, and the ids cease to exist.
    /// Paid history survives only through payment records.
    pub fn renew(
        portfolio: &mut Portfolio,
        scheduler: &dyn ReminderScheduler,
        contract_id: Uuid,
        new_end_date: NaiveDate,
        new_rent: Option<Money>,
    ) -> ServiceResult<()> {
        let contract = portfolio
            .contract(contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        if new_end_date <= contract.start_date {
            return Err(ServiceError::Invalid(
                "End date must be after start date".into(),
            ));
        }
        if let Some(rent) = new_rent {
            if !rent.is_positive() {
                return Err(ServiceError::Invalid(
                    "Rent amount must be greater than zero".into(),
                ));
            }
        }

        let outgoing: Vec<String> = portfolio
            .obligations_for_contract(contract_id)
            .iter()
            .flat_map(|obligation| reminders::cancellation_ids(obligation.id))
            .collect();

        let contract = portfolio
            .contract_mut(contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        contract.end_date = new_end_date;
        if let Some(rent) = new_rent {
            contract.rent_amount = rent;
        }
        let snapshot = contract.clone();

        let obligations = schedule::generate_schedule(&snapshot);
        let mut requests = Vec::new();
        for obligation in &obligations {
            requests.extend(reminders::planned_reminders(obligation, &snapshot));
        }
        tracing::info!(contract = %contract_id, lines = obligations.len(), "schedule regenerated");
        portfolio.replace_schedule(contract_id, obligations);

        scheduler.cancel(&outgoing)?;
        for request in &requests {
            scheduler.schedule(request)?;
        }
        Ok(())
    }

    /// Terminates a contract as of `today`. Its obligations stay untouched as
    /// historical fact.
    pub fn end(portfolio: &mut Portfolio, contract_id: Uuid, today: NaiveDate) -> ServiceResult<()> {
        let contract = portfolio
            .contract_mut(contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        contract.is_active = false;
        contract.end_date = today;
        portfolio.touch();
        Ok(())
    }

    /// Deletes a contract and everything it owns, cancelling the reminders of
    /// its obligations.
    pub fn remove(
        portfolio: &mut Portfolio,
        scheduler: &dyn ReminderScheduler,
        contract_id: Uuid,
    ) -> ServiceResult<Contract> {
        let cancellations: Vec<String> = portfolio
            .obligations_for_contract(contract_id)
            .iter()
            .flat_map(|obligation| reminders::cancellation_ids(obligation.id))
            .collect();
        let removed = portfolio
            .remove_contract(contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        scheduler.cancel(&cancellations)?;
        Ok(removed)
    }

    pub fn list(portfolio: &Portfolio) -> Vec<&Contract> {
        portfolio.contracts.iter().collect()
    }

    /// Active contracts whose end date falls within the next `days` days.
    pub fn expiring_within<'a>(
        portfolio: &'a Portfolio,
        days: i64,
        today: NaiveDate,
    ) -> Vec<&'a Contract> {
        let cutoff = today + Duration::days(days);
        portfolio
            .active_contracts()
            .into_iter()
            .filter(|contract| contract.end_date <= cutoff)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingScheduler;
    use crate::portfolio::{Property, PropertyKind, Tenant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> (Portfolio, Uuid, Uuid) {
        let mut portfolio = Portfolio::new("Test");
        let property_id =
            portfolio.add_property(Property::new("Unit 1", "1 Main St", PropertyKind::Residential));
        let tenant_id = portfolio.add_tenant(Tenant::new("Li Wei", "555-0100"));
        (portfolio, property_id, tenant_id)
    }

    fn lease_input(property_id: Uuid, tenant_id: Uuid) -> NewContract {
        NewContract {
            property_id,
            tenant_id,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            rent_amount: Money::from_major(1200),
            cycle: PaymentCycle::Monthly,
            deposit_amount: Money::from_major(2400),
        }
    }

    #[test]
    fn create_rejects_inverted_dates_before_mutating() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let mut input = lease_input(property_id, tenant_id);
        input.end_date = input.start_date;

        let err = ContractService::create(&mut portfolio, &scheduler, input)
            .expect_err("inverted dates must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(portfolio.contracts.is_empty());
        assert!(scheduler.scheduled().is_empty());
    }

    #[test]
    fn create_rejects_nonpositive_rent() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let mut input = lease_input(property_id, tenant_id);
        input.rent_amount = Money::ZERO;

        let err = ContractService::create(&mut portfolio, &scheduler, input)
            .expect_err("zero rent must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn create_generates_schedule_and_reminders() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let contract_id =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();

        let schedule = portfolio.obligations_for_contract(contract_id);
        assert_eq!(schedule.len(), 12);
        assert_eq!(scheduler.scheduled().len(), 12 * 6);
    }

    #[test]
    fn second_active_contract_supersedes_the_first() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let first =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();
        let second =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();

        let active: Vec<Uuid> = portfolio
            .contracts
            .iter()
            .filter(|contract| contract.is_active)
            .map(|contract| contract.id)
            .collect();
        assert_eq!(active, vec![second]);
        assert!(!portfolio.contract(first).unwrap().is_active);
    }

    #[test]
    fn renew_discards_old_obligation_ids() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let contract_id =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();
        let old_ids: Vec<Uuid> = portfolio
            .obligations_for_contract(contract_id)
            .iter()
            .map(|obligation| obligation.id)
            .collect();
        portfolio
            .obligation_mut(old_ids[0])
            .unwrap()
            .mark_paid(date(2024, 1, 2));

        ContractService::renew(
            &mut portfolio,
            &scheduler,
            contract_id,
            date(2025, 12, 31),
            Some(Money::from_major(1300)),
        )
        .unwrap();

        let schedule = portfolio.obligations_for_contract(contract_id);
        assert_eq!(schedule.len(), 24);
        for old in &old_ids {
            assert!(portfolio.obligation(*old).is_none());
        }
        assert!(schedule.iter().all(|line| !line.is_paid));
        assert!(schedule
            .iter()
            .all(|line| line.amount == Money::from_major(1300)));
        let cancelled = scheduler.cancelled();
        assert_eq!(cancelled.len(), old_ids.len() * 6);
    }

    #[test]
    fn end_keeps_history_in_place() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let contract_id =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();
        let lines_before = portfolio.obligations_for_contract(contract_id).len();

        ContractService::end(&mut portfolio, contract_id, date(2024, 6, 30)).unwrap();

        let contract = portfolio.contract(contract_id).unwrap();
        assert!(!contract.is_active);
        assert_eq!(contract.end_date, date(2024, 6, 30));
        assert_eq!(
            portfolio.obligations_for_contract(contract_id).len(),
            lines_before
        );
    }

    #[test]
    fn remove_cascades_and_cancels() {
        let (mut portfolio, property_id, tenant_id) = seeded();
        let scheduler = RecordingScheduler::new();
        let contract_id =
            ContractService::create(&mut portfolio, &scheduler, lease_input(property_id, tenant_id))
                .unwrap();

        ContractService::remove(&mut portfolio, &scheduler, contract_id).unwrap();

        assert!(portfolio.contract(contract_id).is_none());
        assert!(portfolio.obligations.is_empty());
        assert_eq!(scheduler.cancelled().len(), 12 * 6);
    }

    #[test]
    fn renew_unknown_contract_is_not_found() {
        let mut portfolio = Portfolio::new("Empty");
        let scheduler = RecordingScheduler::new();
        let err = ContractService::renew(
            &mut portfolio,
            &scheduler,
            Uuid::new_v4(),
            date(2025, 1, 1),
            None,
        )
        .expect_err("unknown contract must fail");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
