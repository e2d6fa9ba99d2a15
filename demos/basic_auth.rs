//! Run with
//!
//! ```not_rust
//! cargo run --example basic_auth --features="axum"
//! ```
//!

use axum::{routing::get, Router};
use tower_auth_gate::config::AuthConfig;

#[path = "../util/util.rs"]
mod util;

async fn secret() -> &'static str {
    "Welcome in"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::init("basic_auth")?;

    let config = AuthConfig::users([("foo", "bar"), ("user-2", "")]);

    let layer = util::authorization_layer(config);

    let app = Router::new()
        // curl -u "foo:bar" localhost:5000/secret
        .route("/secret", get(secret))
        .layer(layer)
        // curl -u "foo:wrong" localhost:5000/secret
        // curl localhost:5000/secret
        .layer(util::trace_layer());

    util::serve(app).await
}
