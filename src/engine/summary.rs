//! Read-side rollups over portfolio snapshots.
//!
//! Every function here is a pure fold over explicit slices: empty input sums
//! to zero, and the result never depends on record order.

use chrono::NaiveDate;
use uuid::Uuid;

use super::status::{self, ObligationStatus};
use crate::money::Money;
use crate::portfolio::{Contract, Expense, Obligation, Payment, Property};

/// Sum of income-kind payments recorded against a contract.
pub fn total_paid(contract_id: Uuid, payments: &[Payment]) -> Money {
    payments
        .iter()
        .filter(|payment| payment.contract_id == contract_id && payment.kind.is_income())
        .map(|payment| payment.amount)
        .sum()
}

/// Sum of a contract's unpaid obligations whose due date has passed.
pub fn overdue_amount(contract_id: Uuid, obligations: &[Obligation], today: NaiveDate) -> Money {
    obligations
        .iter()
        .filter(|obligation| {
            obligation.contract_id == contract_id
                && status::classify_obligation(obligation, today) == ObligationStatus::Overdue
        })
        .map(|obligation| obligation.amount)
        .sum()
}

/// Income across every contract ever linked to the property.
pub fn total_income(property_id: Uuid, contracts: &[Contract], payments: &[Payment]) -> Money {
    contracts
        .iter()
        .filter(|contract| contract.property_id == property_id)
        .map(|contract| total_paid(contract.id, payments))
        .sum()
}

pub fn total_expenses(property_id: Uuid, expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|expense| expense.property_id == property_id)
        .map(|expense| expense.amount)
        .sum()
}

/// Income minus expenses; negative when a property runs at a loss.
pub fn net_income(
    property_id: Uuid,
    contracts: &[Contract],
    payments: &[Payment],
    expenses: &[Expense],
) -> Money {
    total_income(property_id, contracts, payments) - total_expenses(property_id, expenses)
}

pub fn is_vacant(property_id: Uuid, contracts: &[Contract]) -> bool {
    !contracts
        .iter()
        .any(|contract| contract.property_id == property_id && contract.is_active)
}

/// Share of properties without an active contract, as a percentage.
/// An empty property set reads as fully occupied rather than an error.
pub fn vacancy_rate(properties: &[Property], contracts: &[Contract]) -> f64 {
    if properties.is_empty() {
        return 0.0;
    }
    let vacant = properties
        .iter()
        .filter(|property| is_vacant(property.id, contracts))
        .count();
    vacant as f64 / properties.len() as f64 * 100.0
}

/// The half-open interval `[Jan 1 of year, Jan 1 of year+1)`.
pub fn year_window(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}

/// Income-kind payments whose paid date falls inside the year window.
pub fn yearly_income(year: i32, payments: &[Payment]) -> Money {
    let Some((start, end)) = year_window(year) else {
        return Money::ZERO;
    };
    payments
        .iter()
        .filter(|payment| payment.kind.is_income())
        .filter(|payment| {
            payment
                .paid_date
                .is_some_and(|date| date >= start && date < end)
        })
        .map(|payment| payment.amount)
        .sum()
}

/// Expenses dated inside the year window.
pub fn yearly_expenses(year: i32, expenses: &[Expense]) -> Money {
    let Some((start, end)) = year_window(year) else {
        return Money::ZERO;
    };
    expenses
        .iter()
        .filter(|expense| expense.date >= start && expense.date < end)
        .map(|expense| expense.amount)
        .sum()
}

/// Money figures for a single contract.
#[derive(Debug, Clone)]
pub struct ContractTotals {
    pub contract_id: Uuid,
    pub paid: Money,
    pub overdue: Money,
    pub next_due: Option<NaiveDate>,
}

pub fn contract_totals(
    contract: &Contract,
    obligations: &[Obligation],
    payments: &[Payment],
    today: NaiveDate,
) -> ContractTotals {
    ContractTotals {
        contract_id: contract.id,
        paid: total_paid(contract.id, payments),
        overdue: overdue_amount(contract.id, obligations, today),
        next_due: status::next_due(contract.id, obligations),
    }
}

/// Money figures for a single property.
#[derive(Debug, Clone)]
pub struct PropertySummary {
    pub property_id: Uuid,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub overdue: Money,
    pub vacant: bool,
}

pub fn property_summary(
    property: &Property,
    contracts: &[Contract],
    obligations: &[Obligation],
    payments: &[Payment],
    expenses: &[Expense],
    today: NaiveDate,
) -> PropertySummary {
    let income = total_income(property.id, contracts, payments);
    let spent = total_expenses(property.id, expenses);
    let overdue: Money = contracts
        .iter()
        .filter(|contract| contract.property_id == property.id)
        .map(|contract| overdue_amount(contract.id, obligations, today))
        .sum();
    PropertySummary {
        property_id: property.id,
        income,
        expenses: spent,
        net: income - spent,
        overdue,
        vacant: is_vacant(property.id, contracts),
    }
}

/// Portfolio-wide money figures.
#[derive(Debug, Clone, Default)]
pub struct PortfolioTotals {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    pub vacancy_rate: f64,
    pub properties: usize,
    pub vacant: usize,
}

pub fn portfolio_totals(
    properties: &[Property],
    contracts: &[Contract],
    payments: &[Payment],
    expenses: &[Expense],
) -> PortfolioTotals {
    let income: Money = properties
        .iter()
        .map(|property| total_income(property.id, contracts, payments))
        .sum();
    let spent: Money = properties
        .iter()
        .map(|property| total_expenses(property.id, expenses))
        .sum();
    let vacant = properties
        .iter()
        .filter(|property| is_vacant(property.id, contracts))
        .count();
    PortfolioTotals {
        income,
        expenses: spent,
        net: income - spent,
        vacancy_rate: vacancy_rate(properties, contracts),
        properties: properties.len(),
        vacant,
    }
}

/// One calendar year's income and expense rollup.
#[derive(Debug, Clone)]
pub struct YearlySummary {
    pub year: i32,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

pub fn yearly_summary(year: i32, payments: &[Payment], expenses: &[Expense]) -> YearlySummary {
    let income = yearly_income(year, payments);
    let spent = yearly_expenses(year, expenses);
    YearlySummary {
        year,
        income,
        expenses: spent,
        net: income - spent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{
        ExpenseCategory, PaymentCycle, PaymentKind, PaymentMethod, PropertyKind,
    };
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lease(property_id: Uuid, active: bool) -> Contract {
        let mut contract = Contract::new(
            property_id,
            Uuid::new_v4(),
            date(2024, 1, 1),
            date(2024, 12, 31),
            Money::from_major(1000),
            PaymentCycle::Monthly,
            Money::ZERO,
        );
        contract.is_active = active;
        contract
    }

    fn paid(contract_id: Uuid, amount: Money, kind: PaymentKind, on: NaiveDate) -> Payment {
        let mut payment = Payment::new(contract_id, amount, on, kind, PaymentMethod::BankTransfer);
        payment.paid_date = Some(on);
        payment
    }

    #[test]
    fn total_paid_counts_income_kinds_only() {
        let contract_id = Uuid::new_v4();
        let payments = vec![
            paid(
                contract_id,
                Money::new(dec!(1000.00)),
                PaymentKind::Rent,
                date(2024, 1, 1),
            ),
            paid(
                contract_id,
                Money::new(dec!(50.25)),
                PaymentKind::LateFee,
                date(2024, 1, 10),
            ),
            paid(
                contract_id,
                Money::new(dec!(2000.00)),
                PaymentKind::Deposit,
                date(2024, 1, 1),
            ),
            paid(
                contract_id,
                Money::new(dec!(2000.00)),
                PaymentKind::DepositReturn,
                date(2024, 12, 31),
            ),
        ];
        assert_eq!(total_paid(contract_id, &payments), Money::new(dec!(3050.25)));
    }

    #[test]
    fn property_income_adds_up_across_contracts() {
        let property = Property::new("Unit 4", "12 Elm St", PropertyKind::Residential);
        let old = lease(property.id, false);
        let current = lease(property.id, true);
        let contracts = vec![old.clone(), current.clone()];
        let payments = vec![
            paid(
                old.id,
                Money::from_major(500),
                PaymentKind::Rent,
                date(2023, 6, 1),
            ),
            paid(
                current.id,
                Money::from_major(700),
                PaymentKind::Rent,
                date(2024, 2, 1),
            ),
        ];
        let by_property = total_income(property.id, &contracts, &payments);
        let by_contract = total_paid(old.id, &payments) + total_paid(current.id, &payments);
        assert_eq!(by_property, by_contract);
        assert_eq!(by_property, Money::from_major(1200));
    }

    #[test]
    fn net_income_is_income_minus_expenses_exactly() {
        let property = Property::new("Unit 7", "9 Oak Ave", PropertyKind::Commercial);
        let contract = lease(property.id, true);
        let contracts = vec![contract.clone()];
        let payments = vec![paid(
            contract.id,
            Money::new(dec!(900.10)),
            PaymentKind::Rent,
            date(2024, 3, 1),
        )];
        let expenses = vec![Expense::new(
            property.id,
            Money::new(dec!(1000.00)),
            ExpenseCategory::Repair,
            "Roof leak",
            date(2024, 3, 5),
        )];
        let net = net_income(property.id, &contracts, &payments, &expenses);
        assert_eq!(net, Money::new(dec!(-99.90)));
        assert!(net.is_negative());
    }

    #[test]
    fn vacancy_rate_of_empty_set_is_zero() {
        assert_eq!(vacancy_rate(&[], &[]), 0.0);
    }

    #[test]
    fn vacancy_rate_counts_properties_without_active_contracts() {
        let occupied = Property::new("A", "1 Main", PropertyKind::Residential);
        let vacant = Property::new("B", "2 Main", PropertyKind::Residential);
        let ended = lease(vacant.id, false);
        let running = lease(occupied.id, true);
        let rate = vacancy_rate(&[occupied, vacant], &[ended, running]);
        assert_eq!(rate, 50.0);
    }

    #[test]
    fn january_first_counts_toward_its_own_year() {
        let contract_id = Uuid::new_v4();
        let payments = vec![
            paid(
                contract_id,
                Money::from_major(100),
                PaymentKind::Rent,
                date(2024, 1, 1),
            ),
            paid(
                contract_id,
                Money::from_major(200),
                PaymentKind::Rent,
                date(2023, 12, 31),
            ),
        ];
        assert_eq!(yearly_income(2024, &payments), Money::from_major(100));
        assert_eq!(yearly_income(2023, &payments), Money::from_major(200));
    }

    #[test]
    fn unsettled_payments_stay_out_of_yearly_income() {
        let contract_id = Uuid::new_v4();
        let pending = Payment::new(
            contract_id,
            Money::from_major(100),
            date(2024, 5, 1),
            PaymentKind::Rent,
            PaymentMethod::Cash,
        );
        assert_eq!(yearly_income(2024, &[pending]), Money::ZERO);
    }

    #[test]
    fn overdue_amount_ignores_paid_and_future_lines() {
        let contract_id = Uuid::new_v4();
        let today = date(2024, 6, 15);
        let mut settled = Obligation::new(contract_id, date(2024, 4, 1), Money::from_major(800));
        settled.mark_paid(date(2024, 4, 2));
        let lines = vec![
            settled,
            Obligation::new(contract_id, date(2024, 5, 1), Money::from_major(800)),
            Obligation::new(contract_id, date(2024, 6, 1), Money::from_major(800)),
            Obligation::new(contract_id, date(2024, 7, 1), Money::from_major(800)),
        ];
        assert_eq!(
            overdue_amount(contract_id, &lines, today),
            Money::from_major(1600)
        );
    }
}
