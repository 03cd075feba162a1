use uuid::Uuid;

use crate::portfolio::{Expense, Portfolio};

use super::{ServiceError, ServiceResult};

pub struct ExpenseService;

impl ExpenseService {
    pub fn add(portfolio: &mut Portfolio, expense: Expense) -> ServiceResult<Uuid> {
        if !expense.amount.is_positive() {
            return Err(ServiceError::Invalid(
                "Expense amount must be greater than zero".into(),
            ));
        }
        if expense.description.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Expense description is required".into(),
            ));
        }
        if portfolio.property(expense.property_id).is_none() {
            return Err(ServiceError::NotFound("Property".into()));
        }
        Ok(portfolio.add_expense(expense))
    }

    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<Expense> {
        portfolio
            .remove_expense(id)
            .ok_or_else(|| ServiceError::NotFound("Expense".into()))
    }

    pub fn list_for_property(portfolio: &Portfolio, property_id: Uuid) -> Vec<&Expense> {
        portfolio.expenses_for_property(property_id)
    }
}
