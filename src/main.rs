// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use taskguard_server::api::router;
use taskguard_server::auth::TokenVerifier;
use taskguard_server::config::{Config, LOG_FORMAT_ENV};
use taskguard_server::state::AppState;
use taskguard_server::store::InMemoryTaskStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json_logs = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration is loaded once; a bad secret is a startup failure, not
    // something to limp along without.
    let config = Config::from_env().expect("invalid configuration");

    let verifier = TokenVerifier::new(&config.jwt_secret);
    let state = AppState::new(InMemoryTaskStore::new(), verifier);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("failed to parse bind address");

    tracing::info!(
        %addr,
        token_ttl_secs = config.token_ttl.as_secs(),
        "Taskguard server listening (docs at /docs)"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install ctrl-c handler");
            tracing::info!("shutdown signal received");
        })
        .await
        .expect("server failed");
}
