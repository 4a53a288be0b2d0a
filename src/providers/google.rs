// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Google OAuth2 client (authorization-code flow with OIDC id_token).

use std::{collections::HashMap, time::Duration};

use reqwest::Client;
use serde_json::Value;

use super::{
    credential_configured, env_required, grant_from_payload, OAuthError, ProviderIdentity,
    TokenGrant,
};
use crate::config::env_or_default;

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3001/auth/google/callback";

/// Sample value shipped in `.env.example`; treated the same as unset.
const CLIENT_ID_PLACEHOLDER: &str = "YOUR_GOOGLE_CLIENT_ID";

const SCOPE: &str = "openid email profile";

#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) redirect_uri: String,
    pub(crate) auth_url: String,
    pub(crate) token_url: String,
    pub(crate) userinfo_url: String,
    pub(crate) http: Client,
}

impl GoogleOAuth {
    pub fn is_configured() -> bool {
        credential_configured("GOOGLE_CLIENT_ID", CLIENT_ID_PLACEHOLDER)
            && credential_configured("GOOGLE_CLIENT_SECRET", "YOUR_GOOGLE_CLIENT_SECRET")
    }

    pub fn from_env() -> Result<Self, OAuthError> {
        let client_id = env_required("GOOGLE_CLIENT_ID")?;
        if client_id == CLIENT_ID_PLACEHOLDER {
            return Err(OAuthError::MissingConfig(
                "GOOGLE_CLIENT_ID is still the placeholder value".to_string(),
            ));
        }
        let client_secret = env_required("GOOGLE_CLIENT_SECRET")?;
        let redirect_uri = env_or_default("GOOGLE_REDIRECT_URI", DEFAULT_REDIRECT_URI);
        let auth_url = env_or_default("GOOGLE_AUTH_URL", DEFAULT_AUTH_URL);
        let token_url = env_or_default("GOOGLE_TOKEN_URL", DEFAULT_TOKEN_URL);
        let userinfo_url = env_or_default("GOOGLE_USERINFO_URL", DEFAULT_USERINFO_URL);

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| OAuthError::TokenExchange(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_url,
            token_url,
            userinfo_url,
            http,
        })
    }

    /// Builds the redirect target for `/auth/google`. `state` and `nonce`
    /// are caller-supplied opaque values, echoed through the flow.
    pub fn authorize_url(&self, state: &str, nonce: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_id", &self.client_id);
        query.append_pair("redirect_uri", &self.redirect_uri);
        query.append_pair("response_type", "code");
        query.append_pair("scope", SCOPE);
        query.append_pair("state", state);
        query.append_pair("nonce", nonce);
        format!("{}?{}", self.auth_url, query.finish())
    }

    /// Runs the callback side of the flow: code-for-token exchange, then
    /// userinfo. Two outbound calls, no retries, nothing stored.
    pub async fn authenticate(&self, code: &str) -> Result<ProviderIdentity, OAuthError> {
        let grant = self.exchange_code(code).await?;
        let userinfo = self.fetch_userinfo(&grant.access_token).await?;
        let (email, display_name) = identity_fields(&userinfo)?;

        Ok(ProviderIdentity {
            provider: "google",
            email,
            display_name,
            id_token: grant.id_token,
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, OAuthError> {
        let mut form = HashMap::new();
        form.insert("code".to_string(), code.to_string());
        form.insert("client_id".to_string(), self.client_id.clone());
        form.insert("client_secret".to_string(), self.client_secret.clone());
        form.insert("redirect_uri".to_string(), self.redirect_uri.clone());
        form.insert("grant_type".to_string(), "authorization_code".to_string());

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchange(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenExchange(format!(
                "token request returned {status}: {body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidResponse(format!("invalid token response: {e}")))?;

        grant_from_payload(&payload)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<Value, OAuthError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| OAuthError::Userinfo(format!("userinfo request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Userinfo(format!(
                "userinfo request returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidResponse(format!("invalid userinfo response: {e}")))
    }
}

fn identity_fields(userinfo: &Value) -> Result<(String, String), OAuthError> {
    let email = userinfo
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| {
            OAuthError::InvalidResponse("userinfo response did not include email".to_string())
        })?
        .to_string();

    let display_name = userinfo
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok((email, display_name))
}
