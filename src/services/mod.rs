//! Validated entry points over a portfolio snapshot. Input is rejected before
//! any entity is created or mutated; failures always reach the caller.

pub mod contract_service;
pub mod expense_service;
pub mod payment_service;
pub mod property_service;
pub mod summary_service;
pub mod tenant_service;

pub use contract_service::{ContractService, NewContract};
pub use expense_service::ExpenseService;
pub use payment_service::{NewPayment, PaymentService};
pub use property_service::PropertyService;
pub use summary_service::SummaryService;
pub use tenant_service::TenantService;

use crate::errors::RentError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] RentError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
}
