use std::sync::Arc;

use meui_server::app::app;
use meui_server::config::ServerConfig;
use meui_server::gateway::{AppState, MemorySessionStore, RelyingParty, SessionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let idp_base = Url::parse(&config.idp.url).expect("invalid idp.url");
    let aap_base = Url::parse(&config.aap.url).expect("invalid aap.url");

    // Discover the identity provider
    tracing::info!(issuer = %config.provider.issuer_url(), "Discovering OIDC provider...");
    let relying_party = RelyingParty::discover(config.provider)
        .await
        .expect("failed to discover OIDC provider");

    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    // Spawn periodic expired-session sweep
    let sweep_store = store.clone();
    let sweep_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(sweep_interval_secs));
        loop {
            interval.tick().await;
            match sweep_store.delete_expired().await {
                Ok(count) if count > 0 => {
                    tracing::debug!(deleted_sessions = count, "Periodic session cleanup");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cleanup expired sessions");
                }
            }
        }
    });

    let port = config.serve.port;
    let state = Arc::new(AppState::new(
        store,
        relying_party,
        config.session,
        idp_base,
        aap_base,
    ));

    let router = app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("server error");
}
