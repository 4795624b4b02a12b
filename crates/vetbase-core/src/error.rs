use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("owner name is required")]
    EmptyOwnerName,
    #[error("owner phone is required")]
    EmptyOwnerPhone,
    #[error("vaccine name is required")]
    EmptyVaccineName,
    #[error("next due date precedes administration date")]
    DueDateBeforeAdministered,
    #[error("prefix is not all digits: {0}")]
    NonDigitPrefix(String),
}
