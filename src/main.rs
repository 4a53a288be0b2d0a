// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use suisoul_gateway::api;
use suisoul_gateway::config::GatewayConfig;
use suisoul_gateway::providers::{GoogleOAuth, IntraOAuth};
use suisoul_gateway::state::AppState;
use suisoul_gateway::sui::SuiClient;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatewayConfig::from_env();

    // A missing provider is not fatal; its start route answers 400 until
    // credentials are supplied.
    let google = if GoogleOAuth::is_configured() {
        match GoogleOAuth::from_env() {
            Ok(client) => {
                info!("Google OAuth configured");
                Some(client)
            }
            Err(err) => {
                warn!(error = %err, "Google OAuth misconfigured; /auth/google disabled");
                None
            }
        }
    } else {
        info!("Google OAuth not configured (set GOOGLE_CLIENT_ID); /auth/google disabled");
        None
    };

    let intra = if IntraOAuth::is_configured() {
        match IntraOAuth::from_env() {
            Ok(client) => {
                info!("42 OAuth configured");
                Some(client)
            }
            Err(err) => {
                warn!(error = %err, "42 OAuth misconfigured; /auth/42 disabled");
                None
            }
        }
    } else {
        info!("42 OAuth not configured (set FORTY_TWO_CLIENT_ID); /auth/42 disabled");
        None
    };

    let sui = SuiClient::new(config.sui.clone()).expect("Failed to build Sui RPC client");
    info!(
        rpc = %config.sui.rpc_url,
        package = %config.sui.package_id,
        registry = %config.sui.registry_id,
        "Sui read client ready"
    );

    let addr = config.socket_addr().expect("Failed to parse bind address");
    let frontend = config.frontend_url.clone();

    let state = AppState::new(config, google, intra, sui);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    info!("SuiSoul gateway listening on http://{addr} (docs at /docs)");
    info!("Frontend redirect target: {frontend}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    // LOG_FORMAT=json switches to line-JSON for log collectors.
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
