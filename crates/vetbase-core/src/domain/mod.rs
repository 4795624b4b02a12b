pub mod ids;
pub mod owner;
pub mod vaccination;

pub use ids::{OwnerId, VaccinationId};
pub use owner::Owner;
pub use vaccination::Vaccination;
