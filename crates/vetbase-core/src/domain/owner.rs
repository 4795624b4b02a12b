use crate::domain::ids::OwnerId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub address: Option<String>,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Owner {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyOwnerName);
        }
        if self.phone.trim().is_empty() {
            return Err(CoreError::EmptyOwnerPhone);
        }
        Ok(())
    }
}
