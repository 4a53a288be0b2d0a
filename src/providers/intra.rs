// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! 42 intra OAuth2 client (authorization-code flow, `public` scope).

use std::{collections::HashMap, time::Duration};

use reqwest::Client;
use serde_json::Value;

use super::{
    credential_configured, env_required, grant_from_payload, OAuthError, ProviderIdentity,
};
use crate::config::env_or_default;

const DEFAULT_AUTH_URL: &str = "https://api.intra.42.fr/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://api.intra.42.fr/oauth/token";
const DEFAULT_USERINFO_URL: &str = "https://api.intra.42.fr/v2/me";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3001/auth/42/callback";

const CLIENT_ID_PLACEHOLDER: &str = "YOUR_42_CLIENT_ID";

#[derive(Debug, Clone)]
pub struct IntraOAuth {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) redirect_uri: String,
    pub(crate) auth_url: String,
    pub(crate) token_url: String,
    pub(crate) userinfo_url: String,
    pub(crate) http: Client,
}

impl IntraOAuth {
    pub fn is_configured() -> bool {
        credential_configured("FORTY_TWO_CLIENT_ID", CLIENT_ID_PLACEHOLDER)
            && credential_configured("FORTY_TWO_CLIENT_SECRET", "YOUR_42_CLIENT_SECRET")
    }

    pub fn from_env() -> Result<Self, OAuthError> {
        let client_id = env_required("FORTY_TWO_CLIENT_ID")?;
        if client_id == CLIENT_ID_PLACEHOLDER {
            return Err(OAuthError::MissingConfig(
                "FORTY_TWO_CLIENT_ID is still the placeholder value".to_string(),
            ));
        }
        let client_secret = env_required("FORTY_TWO_CLIENT_SECRET")?;
        let redirect_uri = env_or_default("FORTY_TWO_REDIRECT_URI", DEFAULT_REDIRECT_URI);
        let auth_url = env_or_default("FORTY_TWO_AUTH_URL", DEFAULT_AUTH_URL);
        let token_url = env_or_default("FORTY_TWO_TOKEN_URL", DEFAULT_TOKEN_URL);
        let userinfo_url = env_or_default("FORTY_TWO_USERINFO_URL", DEFAULT_USERINFO_URL);

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

    /// 42 has no nonce parameter; only `state` rides along.
    pub fn authorize_url(&self, state: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_id", &self.client_id);
        query.append_pair("redirect_uri", &self.redirect_uri);
        query.append_pair("response_type", "code");
        query.append_pair("scope", "public");
        query.append_pair("state", state);
        format!("{}?{}", self.auth_url, query.finish())
    }

    pub async fn authenticate(&self, code: &str) -> Result<ProviderIdentity, OAuthError> {
        let grant = self.exchange_code(code).await?;
        let me = self.fetch_me(&grant.access_token).await?;
        let (email, display_name) = identity_fields(&me)?;

        // The intra token response carries no OIDC id_token.
        Ok(ProviderIdentity {
            provider: "42",
            email,
            display_name,
            id_token: None,
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<super::TokenGrant, OAuthError> {
        let mut form = HashMap::new();
        form.insert("grant_type".to_string(), "authorization_code".to_string());
        form.insert("client_id".to_string(), self.client_id.clone());
        form.insert("client_secret".to_string(), self.client_secret.clone());
        form.insert("code".to_string(), code.to_string());
        form.insert("redirect_uri".to_string(), self.redirect_uri.clone());

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

    async fn fetch_me(&self, access_token: &str) -> Result<Value, OAuthError> {
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

/// `/v2/me` identifies the student by `login`; that is the display name the
/// frontend shows.
fn identity_fields(me: &Value) -> Result<(String, String), OAuthError> {
    let email = me
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| {
            OAuthError::InvalidResponse("userinfo response did not include email".to_string())
        })?
        .to_string();

    let display_name = me
        .get("login")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok((email, display_name))
}
