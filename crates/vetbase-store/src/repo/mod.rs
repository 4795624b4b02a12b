pub mod owners;
pub mod vaccinations;

pub use owners::{OwnerNew, OwnersRepo};
pub use vaccinations::{VaccinationNew, VaccinationsRepo};
