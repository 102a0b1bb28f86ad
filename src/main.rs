use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use activities::config::Config;
use activities::database::activities_repo::ActivityStore;
use activities::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();

    let store = ActivityStore::seeded().shared();
    let app = web::router(store, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(l) => l,
        Err(e) => {
            warn!(
                "Could not bind {}: {}. Trying fallback {}",
                config.bind_addr(),
                e,
                config.fallback_addr()
            );
            tokio::net::TcpListener::bind(config.fallback_addr())
                .await
                .expect("Could not bind fallback port")
        }
    };

    let bound_addr = listener
        .local_addr()
        .expect("Bound listener has no local address");
    info!("Mergington High School API listening on http://{}", bound_addr);
    info!("Landing page at http://{}{}", bound_addr, web::LANDING_PAGE);

    axum::serve(listener, app).await.expect("Server error");
}
