pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_links;
mod m20251121_000001_users_and_owned_links;
mod m20251201_000001_link_text;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_links::Migration),
            Box::new(m20251121_000001_users_and_owned_links::Migration),
            Box::new(m20251201_000001_link_text::Migration),
        ]
    }
}
