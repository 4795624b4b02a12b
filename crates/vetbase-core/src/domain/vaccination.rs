use crate::domain::ids::{OwnerId, VaccinationId};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: VaccinationId,
    pub owner_id: OwnerId,
    pub vaccine_name: String,
    pub administered_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub created_at: i64,
}

impl Vaccination {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.vaccine_name.trim().is_empty() {
            return Err(CoreError::EmptyVaccineName);
        }
        if let Some(due) = self.next_due_on {
            if due < self.administered_on {
                return Err(CoreError::DueDateBeforeAdministered);
            }
        }
        Ok(())
    }
}
