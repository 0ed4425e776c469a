pub mod health;
pub mod person;

pub use health::{health_check, readiness_check};
pub use person::{create_person, delete_person, get_person, list_persons, update_person};
