pub mod database;

pub use database::PersonDb;
