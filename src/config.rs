// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! typed configuration loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `FRONTEND_URL` | SPA origin for CORS and post-login redirects | `http://localhost:5173` |
//! | `SUI_RPC_URL` | Sui fullnode JSON-RPC endpoint | testnet fullnode |
//! | `SUISOUL_PACKAGE_ID` | Published trust_system package | deployed testnet package |
//! | `SUISOUL_REGISTRY_ID` | Shared registry object | deployed testnet registry |
//! | `GOOGLE_CLIENT_ID` | Google OAuth client id | unset = provider disabled |
//! | `GOOGLE_CLIENT_SECRET` | Google OAuth client secret | unset = provider disabled |
//! | `GOOGLE_REDIRECT_URI` | Callback registered with Google | `http://localhost:3001/auth/google/callback` |
//! | `FORTY_TWO_CLIENT_ID` | 42 intra OAuth client id | unset = provider disabled |
//! | `FORTY_TWO_CLIENT_SECRET` | 42 intra OAuth client secret | unset = provider disabled |
//! | `FORTY_TWO_REDIRECT_URI` | Callback registered with 42 | `http://localhost:3001/auth/42/callback` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Provider endpoint URLs (authorize, token, userinfo) also accept overrides
//! (`GOOGLE_AUTH_URL`, `GOOGLE_TOKEN_URL`, `GOOGLE_USERINFO_URL`,
//! `FORTY_TWO_AUTH_URL`, `FORTY_TWO_TOKEN_URL`, `FORTY_TWO_USERINFO_URL`),
//! parsed where the provider clients are built.

use std::net::SocketAddr;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the SPA origin.
///
/// Every post-login redirect (`/auth/callback`, `/login?error=...`) is built
/// against this origin, and CORS is restricted to it.
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";

/// Environment variable name for the Sui fullnode JSON-RPC endpoint.
pub const SUI_RPC_URL_ENV: &str = "SUI_RPC_URL";

/// Environment variable name for the published trust_system package id.
pub const PACKAGE_ID_ENV: &str = "SUISOUL_PACKAGE_ID";

/// Environment variable name for the shared username registry object id.
pub const REGISTRY_ID_ENV: &str = "SUISOUL_REGISTRY_ID";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_SUI_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";

/// trust_system package published on testnet.
pub const DEFAULT_PACKAGE_ID: &str =
    "0x1dd2e57d568ab57ad2782eb992fd4fe0da1eb1259e8a829bd746ee839f999b05";

/// Shared registry object created when the package was published.
pub const DEFAULT_REGISTRY_ID: &str =
    "0xd6b2662621517176817ca7bfcdd87bfd8c6059bb6ad2e06e1f0be79c3db843c2";

/// Server-level configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub sui: SuiConfig,
}

/// Chain-side configuration: which fullnode to talk to and which deployed
/// contract objects to address.
#[derive(Debug, Clone)]
pub struct SuiConfig {
    pub rpc_url: String,
    pub package_id: String,
    pub registry_id: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let host = env_or_default(HOST_ENV, DEFAULT_HOST);
        let port = parse_port(env_optional(PORT_ENV));
        let frontend_url = env_or_default(FRONTEND_URL_ENV, DEFAULT_FRONTEND_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            frontend_url,
            sui: SuiConfig::from_env(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl SuiConfig {
    pub fn from_env() -> Self {
        Self {
            rpc_url: env_or_default(SUI_RPC_URL_ENV, DEFAULT_SUI_RPC_URL),
            package_id: env_or_default(PACKAGE_ID_ENV, DEFAULT_PACKAGE_ID),
            registry_id: env_or_default(REGISTRY_ID_ENV, DEFAULT_REGISTRY_ID),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT)
}

/// Reads an environment variable, treating unset, empty, and whitespace-only
/// values as absent.
pub(crate) fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

pub(crate) fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}
