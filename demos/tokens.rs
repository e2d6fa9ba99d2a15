//! Run with
//!
//! ```not_rust
//! cargo run --example tokens --features="axum"
//! ```
//!

use axum::{routing::get, Router};
use tower_auth_gate::{
    config::AuthSettings,
    matcher::DefaultMatcher,
    token::{Credential, Token},
};

#[path = "../util/util.rs"]
mod util;

async fn secret() -> &'static str {
    "Welcome in"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::init("tokens")?;

    let settings: AuthSettings = serde_json::from_str(
        r#"{
            "realm": "tokens",
            "credentials": [
                { "scheme": "Basic", "value": "foo:s3cr3t" },
                { "scheme": "Bearer", "value": "s3cr3t" }
            ],
            "tokens": ["s3cr3t-token"]
        }"#,
    )?;

    // Also accept any bearer token carrying the admin prefix.
    let config = settings
        .into_builder()
        .matcher(DefaultMatcher)
        .matcher(|_: &[Credential], token: &Token| {
            token.scheme() == "bearer" && token.value().starts_with("admin-")
        })
        .build();

    let layer = util::authorization_layer(config);

    let app = Router::new()
        // curl -u "foo:s3cr3t" localhost:5000
        // curl -H "Authorization: Bearer s3cr3t" localhost:5000
        // curl -H "Authorization: Bearer admin-42" localhost:5000
        // curl -H "Authorization: s3cr3t-token" localhost:5000
        .route("/", get(secret))
        .layer(layer)
        // curl -H "Authorization: Bearer wrong" localhost:5000
        .layer(util::trace_layer());

    util::serve(app).await
}
