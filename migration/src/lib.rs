pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_users_and_teams;
mod m20260901_000002_create_plans;
mod m20260901_000003_create_subscriptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_users_and_teams::Migration),
            Box::new(m20260901_000002_create_plans::Migration),
            Box::new(m20260901_000003_create_subscriptions::Migration),
        ]
    }
}
