// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! OAuth2 authorization-code clients for the login relay.
//!
//! Each provider exposes the same three-step surface: build the authorize
//! URL, exchange the callback `code` for tokens, fetch the user identity.
//! The relay never verifies or stores tokens; Google's `id_token` is handed
//! back to the frontend opaquely.

pub mod google;
pub mod intra;

pub use google::GoogleOAuth;
pub use intra::IntraOAuth;

use crate::config::env_optional;

/// What a completed provider login yields: enough to send the frontend its
/// `/auth/callback` redirect and nothing more.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub provider: &'static str,
    pub email: String,
    pub display_name: String,
    /// Only Google issues one; forwarded unverified.
    pub id_token: Option<String>,
}

/// Access token (plus Google's id_token) from the code-for-token exchange.
#[derive(Debug)]
pub(crate) struct TokenGrant {
    pub access_token: String,
    pub id_token: Option<String>,
}

pub(crate) fn grant_from_payload(payload: &serde_json::Value) -> Result<TokenGrant, OAuthError> {
    let access_token = payload
        .get("access_token")
        .and_then(serde_json::Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            OAuthError::InvalidResponse("token response did not include access_token".to_string())
        })?
        .to_string();

    let id_token = payload
        .get("id_token")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    Ok(TokenGrant {
        access_token,
        id_token,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("OAuth configuration missing: {0}")]
    MissingConfig(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("userinfo fetch failed: {0}")]
    Userinfo(String),

    #[error("provider response was invalid: {0}")]
    InvalidResponse(String),
}

pub(crate) fn env_required(name: &str) -> Result<String, OAuthError> {
    env_optional(name).ok_or_else(|| OAuthError::MissingConfig(name.to_string()))
}

/// A credential counts as configured only when set, non-empty, and not the
/// sample placeholder shipped in `.env.example`.
pub(crate) fn credential_configured(name: &str, placeholder: &str) -> bool {
    env_optional(name).is_some_and(|v| v != placeholder)
}
