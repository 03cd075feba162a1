//! Read-only reporting facade over a portfolio snapshot.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::engine::summary::{
    self, ContractTotals, PortfolioTotals, PropertySummary, YearlySummary,
};

use crate::portfolio::Portfolio;

use super::{ServiceError, ServiceResult};

pub struct SummaryService;

impl SummaryService {
    pub fn contract_totals(
        portfolio: &Portfolio,
        contract_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<ContractTotals> {
        let contract = portfolio
            .contract(contract_id)
            .ok_or_else(|| ServiceError::NotFound("Contract".into()))?;
        Ok(summary::contract_totals(
            contract,
            &portfolio.obligations,
            &portfolio.payments,
            today,
        ))
    }

    pub fn property_summary(
        portfolio: &Portfolio,
        property_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<PropertySummary> {
        let property = portfolio
            .property(property_id)
            .ok_or_else(|| ServiceError::NotFound("Property".into()))?;
        Ok(summary::property_summary(
            property,
            &portfolio.contracts,
            &portfolio.obligations,
            &portfolio.payments,
            &portfolio.expenses,
            today,
        ))
    }

    pub fn portfolio_totals(portfolio: &Portfolio) -> PortfolioTotals {
        summary::portfolio_totals(
            &portfolio.properties,
            &portfolio.contracts,
            &portfolio.payments,
            &portfolio.expenses,
        )
    }

    pub fn yearly(portfolio: &Portfolio, year: i32) -> YearlySummary {
        summary::yearly_summary(year, &portfolio.payments, &portfolio.expenses)
    }

    pub fn vacancy_rate(portfolio: &Portfolio) -> f64 {
        summary::vacancy_rate(&portfolio.properties, &portfolio.contracts)
    }
}
