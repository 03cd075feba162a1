use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rental unit that contracts and expenses attach to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub kind: PropertyKind,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(name: impl Into<String>, address: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            kind,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PropertyKind {
    Residential,
    Commercial,
}
