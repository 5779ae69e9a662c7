pub mod connection;
#[cfg(test)]
pub mod memory;
pub mod store;

pub use connection::{DbPool, create_pool, run_migrations};
pub use store::{BillingStore, PlanChanges, SeaOrmBillingStore};
