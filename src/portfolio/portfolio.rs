use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    contract::Contract, expense::Expense, obligation::Obligation, payment::Payment,
    property::Property, tenant::Tenant,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory snapshot of every tracked entity, related by id.
///
/// Entities hold foreign ids instead of references; traversal is a query on
/// the snapshot. Removal methods enforce the ownership rules: a property
/// carries its expenses and contracts, a contract carries its obligations and
/// payments, tenants belong to nobody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub obligations: Vec<Obligation>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Portfolio::schema_version_default")]
    pub schema_version: u8,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            properties: Vec::new(),
            tenants: Vec::new(),
            contracts: Vec::new(),
            obligations: Vec::new(),
            payments: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_property(&mut self, property: Property) -> Uuid {
        let id = property.id;
        self.properties.push(property);
        self.touch();
        id
    }

    pub fn add_tenant(&mut self, tenant: Tenant) -> Uuid {
        let id = tenant.id;
        self.tenants.push(tenant);
        self.touch();
        id
    }

    pub fn add_contract(&mut self, contract: Contract) -> Uuid {
        let id = contract.id;
        self.contracts.push(contract);
        self.touch();
        id
    }

    pub fn add_obligation(&mut self, obligation: Obligation) -> Uuid {
        let id = obligation.id;
        self.obligations.push(obligation);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn property_mut(&mut self, id: Uuid) -> Option<&mut Property> {
        self.properties.iter_mut().find(|property| property.id == id)
    }

    pub fn tenant(&self, id: Uuid) -> Option<&Tenant> {
        self.tenants.iter().find(|tenant| tenant.id == id)
    }

    pub fn tenant_mut(&mut self, id: Uuid) -> Option<&mut Tenant> {
        self.tenants.iter_mut().find(|tenant| tenant.id == id)
    }

    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|contract| contract.id == id)
    }

    pub fn contract_mut(&mut self, id: Uuid) -> Option<&mut Contract> {
        self.contracts.iter_mut().find(|contract| contract.id == id)
    }

    pub fn obligation(&self, id: Uuid) -> Option<&Obligation> {
        self.obligations.iter().find(|obligation| obligation.id == id)
    }

    pub fn obligation_mut(&mut self, id: Uuid) -> Option<&mut Obligation> {
        self.obligations
            .iter_mut()
            .find(|obligation| obligation.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn contracts_for_property(&self, property_id: Uuid) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|contract| contract.property_id == property_id)
            .collect()
    }

    pub fn contracts_for_tenant(&self, tenant_id: Uuid) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|contract| contract.tenant_id == tenant_id)
            .collect()
    }

    /// Every contract currently marked in force, across all properties.
    pub fn active_contracts(&self) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|contract| contract.is_active)
            .collect()
    }

    /// The single contract currently in force for a property, if any.
    pub fn active_contract_for_property(&self, property_id: Uuid) -> Option<&Contract> {
        self.contracts
            .iter()
            .find(|contract| contract.property_id == property_id && contract.is_active)
    }

    /// Clears the active flag on every contract of the property, returning how
    /// many were deactivated.
    pub fn deactivate_contracts_for_property(&mut self, property_id: Uuid) -> usize {
        let mut deactivated = 0;
        for contract in self
            .contracts
            .iter_mut()
            .filter(|contract| contract.property_id == property_id && contract.is_active)
        {
            contract.is_active = false;
            deactivated += 1;
        }
        if deactivated > 0 {
            self.touch();
        }
        deactivated
    }

    /// Obligations of a contract ordered by due date.
    pub fn obligations_for_contract(&self, contract_id: Uuid) -> Vec<&Obligation> {
        let mut schedule: Vec<&Obligation> = self
            .obligations
            .iter()
            .filter(|obligation| obligation.contract_id == contract_id)
            .collect();
        schedule.sort_by_key(|obligation| obligation.due_date);
        schedule
    }

    pub fn unpaid_overdue(&self, today: NaiveDate) -> Vec<&Obligation> {
        self.obligations
            .iter()
            .filter(|obligation| !obligation.is_paid && obligation.due_date < today)
            .collect()
    }

    pub fn unpaid_due_within(&self, days: i64, today: NaiveDate) -> Vec<&Obligation> {
        let cutoff = today + Duration::days(days);
        self.obligations
            .iter()
            .filter(|obligation| {
                !obligation.is_paid
                    && obligation.due_date >= today
                    && obligation.due_date <= cutoff
            })
            .collect()
    }

    pub fn payments_for_contract(&self, contract_id: Uuid) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.contract_id == contract_id)
            .collect()
    }

    /// Payments settled within `[start, end)`, keyed on their paid date.
    pub fn payments_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| {
                payment
                    .paid_date
                    .is_some_and(|date| date >= start && date < end)
            })
            .collect()
    }

    pub fn expenses_for_property(&self, property_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.property_id == property_id)
            .collect()
    }

    /// Swaps out a contract's entire obligation set. Prior lines, paid or not,
    /// are discarded.
    pub fn replace_schedule(&mut self, contract_id: Uuid, schedule: Vec<Obligation>) {
        self.obligations
            .retain(|obligation| obligation.contract_id != contract_id);
        self.obligations.extend(schedule);
        self.touch();
    }

    /// Removes a contract along with the obligations and payments it owns.
    pub fn remove_contract(&mut self, id: Uuid) -> Option<Contract> {
        let position = self.contracts.iter().position(|contract| contract.id == id)?;
        let removed = self.contracts.remove(position);
        self.obligations
            .retain(|obligation| obligation.contract_id != id);
        self.payments.retain(|payment| payment.contract_id != id);
        self.touch();
        Some(removed)
    }

    /// Removes a property, cascading to its expenses and contracts.
    pub fn remove_property(&mut self, id: Uuid) -> Option<Property> {
        let position = self.properties.iter().position(|property| property.id == id)?;
        let removed = self.properties.remove(position);
        self.expenses.retain(|expense| expense.property_id != id);
        let owned: Vec<Uuid> = self
            .contracts
            .iter()
            .filter(|contract| contract.property_id == id)
            .map(|contract| contract.id)
            .collect();
        for contract_id in owned {
            let _ = self.remove_contract(contract_id);
        }
        self.touch();
        Some(removed)
    }

    /// Removes a tenant record. Callers are responsible for refusing removal
    /// while contract history still references the tenant.
    pub fn remove_tenant(&mut self, id: Uuid) -> Option<Tenant> {
        let position = self.tenants.iter().position(|tenant| tenant.id == id)?;
        let removed = self.tenants.remove(position);
        self.touch();
        Some(removed)
    }

    pub fn remove_payment(&mut self, id: Uuid) -> Option<Payment> {
        let position = self.payments.iter().position(|payment| payment.id == id)?;
        let removed = self.payments.remove(position);
        self.touch();
        Some(removed)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let position = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(position);
        self.touch();
        Some(removed)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
