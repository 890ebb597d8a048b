pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_admins_table;
mod m20250301_000002_create_projects_table;
mod m20250301_000003_create_clients_table;
mod m20250301_000004_create_contacts_table;
mod m20250301_000005_create_newsletters_table;
mod m20250302_000001_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_admins_table::Migration),
            Box::new(m20250301_000002_create_projects_table::Migration),
            Box::new(m20250301_000003_create_clients_table::Migration),
            Box::new(m20250301_000004_create_contacts_table::Migration),
            Box::new(m20250301_000005_create_newsletters_table::Migration),
            Box::new(m20250302_000001_add_listing_indexes::Migration),
        ]
    }
}
