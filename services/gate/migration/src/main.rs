use sea_orm_migration::prelude::*;

mod m20260801_000001_create_marketing_codes;
mod m20260801_000002_create_visitors;
mod m20260801_000003_create_access_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_marketing_codes::Migration),
            Box::new(m20260801_000002_create_visitors::Migration),
            Box::new(m20260801_000003_create_access_events::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
