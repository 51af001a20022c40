pub mod career_repository;
pub mod connection;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod models;

pub use career_repository::{CareerStore, PgCareerStore, StoreError};
