use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_events;
mod m20260801_000003_create_submissions;
mod m20260801_000004_create_teams;
mod m20260801_000005_create_discounts;
mod m20260801_000006_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_events::Migration),
            Box::new(m20260801_000003_create_submissions::Migration),
            Box::new(m20260801_000004_create_teams::Migration),
            Box::new(m20260801_000005_create_discounts::Migration),
            Box::new(m20260801_000006_add_listing_indexes::Migration),
        ]
    }
}
