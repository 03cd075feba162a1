use uuid::Uuid;

use crate::portfolio::{Portfolio, Tenant};

use super::{ServiceError, ServiceResult};

pub struct TenantService;

impl TenantService {
    pub fn add(portfolio: &mut Portfolio, tenant: Tenant) -> ServiceResult<Uuid> {
        Self::validate(&tenant)?;
        Ok(portfolio.add_tenant(tenant))
    }

    pub fn edit(portfolio: &mut Portfolio, id: Uuid, changes: Tenant) -> ServiceResult<()> {
        Self::validate(&changes)?;
        let tenant = portfolio
            .tenant_mut(id)
            .ok_or_else(|| ServiceError::NotFound("Tenant".into()))?;
        tenant.name = changes.name;
        tenant.phone = changes.phone;
        tenant.email = changes.email;
        portfolio.touch();
        Ok(())
    }

    /// Tenants stay around as long as any contract, active or ended, refers
    /// to them; contract history is fact, not something to orphan.
    pub fn remove(portfolio: &mut Portfolio, id: Uuid) -> ServiceResult<Tenant> {
        if !portfolio.contracts_for_tenant(id).is_empty() {
            return Err(ServiceError::Invalid(
                "Tenant has contract history and cannot be removed".into(),
            ));
        }
        portfolio
            .remove_tenant(id)
            .ok_or_else(|| ServiceError::NotFound("Tenant".into()))
    }

    pub fn list(portfolio: &Portfolio) -> Vec<&Tenant> {
        portfolio.tenants.iter().collect()
    }

    fn validate(tenant: &Tenant) -> ServiceResult<()> {
        if tenant.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Tenant name is required".into()));
        }
        if tenant.phone.trim().is_empty() {
            return Err(ServiceError::Invalid("Tenant phone is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::portfolio::{Contract, PaymentCycle, Property, PropertyKind};
    use chrono::NaiveDate;

    #[test]
    fn remove_refused_while_history_exists() {
        let mut portfolio = Portfolio::new("Tenants");
        let property_id =
            portfolio.add_property(Property::new("Unit 5", "5 Main St", PropertyKind::Residential));
        let tenant_id = portfolio.add_tenant(Tenant::new("Wang Fang", "555-0103"));
        let mut contract = Contract::new(
            property_id,
            tenant_id,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            Money::from_major(900),
            PaymentCycle::Monthly,
            Money::ZERO,
        );
        contract.is_active = false;
        portfolio.add_contract(contract);

        let err = TenantService::remove(&mut portfolio, tenant_id)
            .expect_err("history must block removal");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(portfolio.tenant(tenant_id).is_some());
    }

    #[test]
    fn remove_succeeds_without_history() {
        let mut portfolio = Portfolio::new("Tenants");
        let tenant_id = portfolio.add_tenant(Tenant::new("Liu Yang", "555-0104"));
        let removed = TenantService::remove(&mut portfolio, tenant_id).unwrap();
        assert_eq!(removed.id, tenant_id);
        assert!(portfolio.tenants.is_empty());
    }

    #[test]
    fn add_rejects_blank_phone() {
        let mut portfolio = Portfolio::new("Tenants");
        let err = TenantService::add(&mut portfolio, Tenant::new("No Phone", " "))
            .expect_err("blank phone must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}
