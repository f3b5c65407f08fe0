use std::sync::Arc;

use blogi_client::config::ClientConfig;
use blogi_client::net::api::{BlogApi, HttpApi};
use blogi_client::router::{ComponentCatalog, Router};
use blogi_client::session::{AUTH_TOKEN_KEY, MemorySession, SessionStorage};
use blogi_client::store::UserStore;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    let api: Arc<dyn BlogApi> = match HttpApi::new(&config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            tracing::error!(error = %e, "http client init failed");
            std::process::exit(2);
        }
    };

    // Stands in for the login flow that normally writes the token.
    let session = Arc::new(MemorySession::new());
    if let Ok(token) = std::env::var("BLOGI_AUTH_TOKEN") {
        session.set_item(AUTH_TOKEN_KEY, &token);
    }

    let store = UserStore::new();
    store.fetch_users(api.as_ref()).await;
    tracing::info!(users = store.len(), base_url = %config.api_base_url, "user list loaded");

    let router = Router::with_auth(Arc::new(ComponentCatalog), session, api);
    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_owned());

    match router.navigate(&path).await {
        Ok(nav) => {
            let route = &nav.activation.route;
            println!("{} -> {} ({})", path, route.path, nav.activation.view.component());
            if let Some(from) = nav.redirected_from {
                tracing::info!(%from, to = %route.path, "redirected");
            }
        }
        Err(e) => {
            tracing::error!(%path, error = %e, "navigation failed");
            std::process::exit(1);
        }
    }
}
