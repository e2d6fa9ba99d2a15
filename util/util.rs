use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_auth_gate::{authorize::AuthorizationLayer, config::AuthConfig};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

const ADDR_VAR: &str = "AUTH_GATE_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";

pub fn init(exe: &str) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{exe}=trace,tower_auth_gate=debug,tower_http=info").into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to set global tracing subscriber")?;

    Ok(())
}

/// Logs the loaded config, secrets redacted, and wraps it in the gate layer.
pub fn authorization_layer(config: AuthConfig) -> AuthorizationLayer {
    if config.is_disabled() {
        tracing::warn!("No credentials configured, every request will be let through");
    }

    tracing::info!(
        credentials = config.credentials().len(),
        matchers = config.matchers().len(),
        realm = config.realm(),
        "Authorization gate configured"
    );

    tracing::debug!(?config);

    AuthorizationLayer::new(config)
}

/// Responses are logged with their status so rejected requests show up as `401`.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO))
}

/// Serves on `AUTH_GATE_ADDR`, falling back to `127.0.0.1:5000`.
pub async fn serve(app: axum::Router<()>) -> anyhow::Result<()> {
    let addr = std::env::var(ADDR_VAR).unwrap_or_else(|_| String::from(DEFAULT_ADDR));

    let socket_addr = addr
        .parse::<SocketAddr>()
        .with_context(|| format!("Invalid {ADDR_VAR}: {addr}"))?;

    tracing::info!(%socket_addr, "Starting server");

    let listener = TcpListener::bind(&socket_addr)
        .await
        .context("Bind failed")?;

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
