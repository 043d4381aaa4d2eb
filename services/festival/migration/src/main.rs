use sea_orm_migration::prelude::*;

use lumiere_festival_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
