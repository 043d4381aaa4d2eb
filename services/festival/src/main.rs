use sea_orm::Database;
use tracing::info;

use lumiere_festival::config::FestivalConfig;
use lumiere_festival::router::build_router;
use lumiere_festival::state::AppState;

#[tokio::main]
async fn main() {
    lumiere_core::tracing::init_tracing();

    let config = FestivalConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db, config.jwt_secret, config.cookie_domain);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.festival_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("festival service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
