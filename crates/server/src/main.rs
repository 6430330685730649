use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::info;

mod api;
mod app_state;
mod config;
mod pokeapi;

use api::build_router;
use app_state::AppState;
use config::load_settings;
use pokeapi::PokeApiSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let source = PokeApiSource::new(&settings.upstream_base_url).with_context(|| {
        format!(
            "invalid upstream catalog url '{}'",
            settings.upstream_base_url
        )
    })?;
    let app = build_router(Arc::new(AppState {
        source: Arc::new(source),
    }));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, upstream = %settings.upstream_base_url, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
