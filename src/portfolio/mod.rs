//! Rental domain models and the portfolio aggregate that holds them.

pub mod contract;
pub mod expense;
pub mod obligation;
pub mod payment;
#[allow(clippy::module_inception)]
pub mod portfolio;
pub mod property;
pub mod tenant;

pub use contract::{Contract, PaymentCycle};
pub use expense::{Expense, ExpenseCategory};
pub use obligation::Obligation;
pub use payment::{Payment, PaymentKind, PaymentMethod};
pub use portfolio::{Portfolio, CURRENT_SCHEMA_VERSION};
pub use property::{Property, PropertyKind};
pub use tenant::Tenant;
