//! Proxy server binary: the HTTP facade consumed by the TUI client.
//!
//! Holds the RAWG credential so it never reaches a client machine.
//! Configured entirely from the environment (a `.env` file is honored):
//! `RAWG_API_KEY` is required (the process refuses to start without it)
//! and `PORT` overrides the default 3000.

use rawg_explorer::rawg::RawgClient;
use rawg_explorer::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let api_key = std::env::var("RAWG_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        log::error!("RAWG_API_KEY environment variable is not set");
        std::process::exit(1);
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);

    let app = server::router(RawgClient::new(api_key));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("proxy server listening on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
