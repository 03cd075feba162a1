use uuid::Uuid;

use crate::engine::reminders;
use crate::notify::ReminderScheduler;
use crate::portfolio::{Portfolio, Property};

use super::{ServiceError, ServiceResult};

pub struct PropertyService;

impl PropertyService {
    pub fn add(portfolio: &mut Portfolio, property: Property) -> ServiceResult<Uuid> {
        Self::validate(&property)?;
        Ok(portfolio.add_property(property))
    }

    pub fn edit(portfolio: &mut Portfolio, id: Uuid, changes: Property) -> ServiceResult<()> {
        Self::validate(&changes)?;
        let property = portfolio
            .property_mut(id)
            .ok_or_else(|| ServiceError::NotFound("Property".into()))?;
        property.name = changes.name;
        property.address = changes.address;
        property.kind = changes.kind;
        portfolio.touch();
        Ok(())
    }

    /// Deletes a property with everything it owns: expenses, contracts, and
    /// the contracts' obligations and payments. Standing reminders of the
    /// removed obligations are cancelled.
    pub fn remove(
        portfolio: &mut Portfolio,
        scheduler: &dyn ReminderScheduler,
        id: Uuid,
    ) -> ServiceResult<Property> {
        let cancellations: Vec<String> = portfolio
            .contracts_for_property(id)
            .iter()
            .flat_map(|contract| portfolio.obligations_for_contract(contract.id))
            .flat_map(|obligation| reminders::cancellation_ids(obligation.id))
            .collect();
        let removed = portfolio
            .remove_property(id)
            .ok_or_else(|| ServiceError::NotFound("Property".into()))?;
        scheduler.cancel(&cancellations)?;
        Ok(removed)
    }

    pub fn list(portfolio: &Portfolio) -> Vec<&Property> {
        portfolio.properties.iter().collect()
    }

    fn validate(property: &Property) -> ServiceResult<()> {
        if property.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Property name is required".into()));
        }
        if property.address.trim().is_empty() {
            return Err(ServiceError::Invalid("Property address is required".into()));
        }
        Ok(())
    }
}
