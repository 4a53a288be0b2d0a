// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Provider login relay.
//!
//! Four routes, two per provider: `start` bounces the browser to the
//! provider's consent page, `callback` exchanges the returned `code` and
//! bounces back to the SPA. Every callback outcome is a redirect; the
//! frontend reads the result from the query string. The relay keeps no
//! session and verifies no token (the Google `id_token` rides through
//! opaquely for the SPA's address derivation).

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::providers::ProviderIdentity;
use crate::state::AppState;

/// Query for the start routes. Both values are caller-generated opaque
/// strings, echoed through the provider round trip unchanged.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StartQuery {
    pub state: Option<String>,
    /// Google only; ignored by 42.
    pub nonce: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[utoipa::path(
    get,
    path = "/auth/google",
    params(StartQuery),
    tag = "Auth",
    responses(
        (status = 302, description = "Redirect to Google's consent page"),
        (status = 400, description = "Google OAuth is not configured")
    )
)]
pub async fn google_start(
    State(state): State<AppState>,
    Query(query): Query<StartQuery>,
) -> Result<Response, ApiError> {
    let Some(google) = &state.google else {
        return Err(ApiError::bad_request(
            "Google OAuth is not configured: set GOOGLE_CLIENT_ID in the environment",
        ));
    };

    let url = google.authorize_url(
        query.state.as_deref().unwrap_or_default(),
        query.nonce.as_deref().unwrap_or_default(),
    );
    Ok(found(&url))
}

#[utoipa::path(
    get,
    path = "/auth/google/callback",
    params(CallbackQuery),
    tag = "Auth",
    responses(
        (status = 302, description = "Redirect to the frontend with the login result")
    )
)]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let frontend = &state.config.frontend_url;

    let Some(code) = query.code.as_deref().filter(|c| !c.is_empty()) else {
        return found(&login_error_url(frontend, "no_code"));
    };
    let Some(google) = &state.google else {
        return found(&login_error_url(frontend, "oauth_failed"));
    };

    match google.authenticate(code).await {
        Ok(identity) => found(&callback_url(
            frontend,
            &identity,
            query.state.as_deref().unwrap_or_default(),
        )),
        Err(err) => {
            // Upstream detail stays in the log; the browser sees a marker.
            tracing::error!(provider = "google", error = %err, "OAuth callback failed");
            found(&login_error_url(frontend, "oauth_failed"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/auth/42",
    params(StartQuery),
    tag = "Auth",
    responses(
        (status = 302, description = "Redirect to the 42 intra consent page"),
        (status = 400, description = "42 OAuth is not configured")
    )
)]
pub async fn forty_two_start(
    State(state): State<AppState>,
    Query(query): Query<StartQuery>,
) -> Result<Response, ApiError> {
    let Some(intra) = &state.intra else {
        return Err(ApiError::bad_request(
            "42 OAuth is not configured: set FORTY_TWO_CLIENT_ID in the environment",
        ));
    };

    let url = intra.authorize_url(query.state.as_deref().unwrap_or_default());
    Ok(found(&url))
}

#[utoipa::path(
    get,
    path = "/auth/42/callback",
    params(CallbackQuery),
    tag = "Auth",
    responses(
        (status = 302, description = "Redirect to the frontend with the login result")
    )
)]
pub async fn forty_two_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let frontend = &state.config.frontend_url;

    let Some(code) = query.code.as_deref().filter(|c| !c.is_empty()) else {
        return found(&login_error_url(frontend, "no_code"));
    };
    let Some(intra) = &state.intra else {
        return found(&login_error_url(frontend, "oauth_failed"));
    };

    match intra.authenticate(code).await {
        Ok(identity) => found(&callback_url(
            frontend,
            &identity,
            query.state.as_deref().unwrap_or_default(),
        )),
        Err(err) => {
            tracing::error!(provider = "42", error = %err, "OAuth callback failed");
            found(&login_error_url(frontend, "oauth_failed"))
        }
    }
}

/// Plain 302; axum's `Redirect` helpers emit 303/307 which some SPA router
/// setups treat differently, and the relay contract is a plain Found.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn login_error_url(frontend_url: &str, marker: &str) -> String {
    format!("{frontend_url}/login?error={marker}")
}

/// Success redirect back to the SPA. Parameter order matches what the
/// frontend's callback page parses: email, name, (id_token), provider,
/// state.
fn callback_url(frontend_url: &str, identity: &ProviderIdentity, state: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("email", &identity.email);
    query.append_pair("name", &identity.display_name);
    if let Some(id_token) = &identity.id_token {
        query.append_pair("id_token", id_token);
    }
    query.append_pair("provider", identity.provider);
    query.append_pair("state", state);
    format!("{frontend_url}/auth/callback?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayConfig, SuiConfig};
    use crate::providers::{GoogleOAuth, IntraOAuth};
    use crate::sui::SuiClient;
    use axum::{routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};

    const FRONTEND: &str = "http://localhost:5173";

    fn test_state(google: Option<GoogleOAuth>, intra: Option<IntraOAuth>) -> AppState {
        let sui = SuiConfig {
            rpc_url: "http://127.0.0.1:9".to_string(),
            package_id: "0xpkg".to_string(),
            registry_id: "0xreg".to_string(),
        };
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            frontend_url: FRONTEND.to_string(),
            sui: sui.clone(),
        };
        AppState::new(config, google, intra, SuiClient::new(sui).expect("client"))
    }

    fn stub_google(base: &str) -> GoogleOAuth {
        GoogleOAuth {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3001/auth/google/callback".to_string(),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/token"),
            userinfo_url: format!("{base}/userinfo"),
            http: reqwest::Client::new(),
        }
    }

    fn stub_intra(base: &str) -> IntraOAuth {
        IntraOAuth {
            client_id: "uid".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3001/auth/42/callback".to_string(),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/token"),
            userinfo_url: format!("{base}/userinfo"),
            http: reqwest::Client::new(),
        }
    }

    /// Stub provider serving one canned token response and one canned
    /// userinfo response on an ephemeral port.
    async fn spawn_provider(
        token: (StatusCode, Value),
        userinfo: (StatusCode, Value),
    ) -> String {
        let token_handler = move || {
            let (status, body) = token.clone();
            async move { (status, Json(body)) }
        };
        let userinfo_handler = move || {
            let (status, body) = userinfo.clone();
            async move { (status, Json(body)) }
        };
        let app = Router::new()
            .route("/token", post(token_handler))
            .route("/userinfo", get(userinfo_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub provider");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub provider");
        });
        format!("http://{addr}")
    }

    fn location(response: &Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("Location header")
            .to_str()
            .expect("ascii location")
            .to_string()
    }

    fn query_value(url: &str, key: &str) -> Option<String> {
        let (_, query) = url.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[tokio::test]
    async fn unconfigured_google_start_returns_400_without_redirect() {
        let state = test_state(None, None);
        let err = google_start(
            State(state),
            Query(StartQuery {
                state: Some("st".to_string()),
                nonce: None,
            }),
        )
        .await
        .expect_err("unconfigured provider should refuse");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("GOOGLE_CLIENT_ID"));
    }

    #[tokio::test]
    async fn unconfigured_forty_two_start_returns_400() {
        let state = test_state(None, None);
        let err = forty_two_start(State(state), Query(StartQuery { state: None, nonce: None }))
            .await
            .expect_err("unconfigured provider should refuse");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn google_start_redirects_with_state_and_nonce() {
        let state = test_state(Some(stub_google("http://127.0.0.1:9")), None);
        let response = google_start(
            State(state),
            Query(StartQuery {
                state: Some("opaque-1".to_string()),
                nonce: Some("n-1".to_string()),
            }),
        )
        .await
        .expect("configured provider should redirect");

        assert_eq!(response.status(), StatusCode::FOUND);
        let loc = location(&response);
        assert!(loc.starts_with("http://127.0.0.1:9/authorize?"));
        assert_eq!(query_value(&loc, "state").as_deref(), Some("opaque-1"));
        assert_eq!(query_value(&loc, "nonce").as_deref(), Some("n-1"));
        assert_eq!(query_value(&loc, "response_type").as_deref(), Some("code"));
    }

    #[tokio::test]
    async fn callback_without_code_redirects_to_login_error() {
        let state = test_state(Some(stub_google("http://127.0.0.1:9")), None);
        let response = google_callback(
            State(state.clone()),
            Query(CallbackQuery {
                code: None,
                state: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), format!("{FRONTEND}/login?error=no_code"));

        // An empty code counts as missing.
        let response = google_callback(
            State(state),
            Query(CallbackQuery {
                code: Some(String::new()),
                state: None,
            }),
        )
        .await;
        assert_eq!(location(&response), format!("{FRONTEND}/login?error=no_code"));
    }

    #[tokio::test]
    async fn google_callback_success_carries_identity_and_state() {
        let base = spawn_provider(
            (
                StatusCode::OK,
                json!({ "access_token": "at-1", "id_token": "jwt-123" }),
            ),
            (
                StatusCode::OK,
                json!({ "email": "ada@example.com", "name": "Ada Lovelace" }),
            ),
        )
        .await;
        let state = test_state(Some(stub_google(&base)), None);

        let response = google_callback(
            State(state),
            Query(CallbackQuery {
                code: Some("code-1".to_string()),
                state: Some("st 42&x".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let loc = location(&response);
        assert!(loc.starts_with(&format!("{FRONTEND}/auth/callback?")));
        assert_eq!(
            query_value(&loc, "email").as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(query_value(&loc, "name").as_deref(), Some("Ada Lovelace"));
        assert_eq!(query_value(&loc, "id_token").as_deref(), Some("jwt-123"));
        assert_eq!(query_value(&loc, "provider").as_deref(), Some("google"));
        // state echoes back byte-for-byte after URL decoding
        assert_eq!(query_value(&loc, "state").as_deref(), Some("st 42&x"));
    }

    #[tokio::test]
    async fn google_callback_failure_hides_upstream_body() {
        let base = spawn_provider(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "upstream-secret-detail" }),
            ),
            (StatusCode::OK, json!({})),
        )
        .await;
        let state = test_state(Some(stub_google(&base)), None);

        let response = google_callback(
            State(state),
            Query(CallbackQuery {
                code: Some("code-1".to_string()),
                state: Some("st".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let loc = location(&response);
        assert_eq!(loc, format!("{FRONTEND}/login?error=oauth_failed"));
        assert!(!loc.contains("upstream-secret-detail"));
    }

    #[tokio::test]
    async fn userinfo_failure_also_maps_to_oauth_failed() {
        let base = spawn_provider(
            (StatusCode::OK, json!({ "access_token": "at-1" })),
            (StatusCode::FORBIDDEN, json!({ "error": "scope denied" })),
        )
        .await;
        let state = test_state(Some(stub_google(&base)), None);

        let response = google_callback(
            State(state),
            Query(CallbackQuery {
                code: Some("code-1".to_string()),
                state: None,
            }),
        )
        .await;
        assert_eq!(
            location(&response),
            format!("{FRONTEND}/login?error=oauth_failed")
        );
    }

    #[tokio::test]
    async fn forty_two_callback_success_has_no_id_token() {
        let base = spawn_provider(
            (StatusCode::OK, json!({ "access_token": "at-42" })),
            (
                StatusCode::OK,
                json!({ "email": "jdoe@student.42.fr", "login": "jdoe" }),
            ),
        )
        .await;
        let state = test_state(None, Some(stub_intra(&base)));

        let response = forty_two_callback(
            State(state),
            Query(CallbackQuery {
                code: Some("code-42".to_string()),
                state: Some("st-42".to_string()),
            }),
        )
        .await;

        let loc = location(&response);
        assert_eq!(query_value(&loc, "provider").as_deref(), Some("42"));
        assert_eq!(query_value(&loc, "name").as_deref(), Some("jdoe"));
        assert_eq!(query_value(&loc, "state").as_deref(), Some("st-42"));
        assert_eq!(query_value(&loc, "id_token"), None);
    }

    #[test]
    fn callback_url_orders_parameters_for_the_frontend_parser() {
        let identity = ProviderIdentity {
            provider: "google",
            email: "a@b.c".to_string(),
            display_name: "A B".to_string(),
            id_token: Some("jwt".to_string()),
        };
        let url = callback_url(FRONTEND, &identity, "st");
        let query = url.split_once('?').expect("query").1;
        let keys: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, ["email", "name", "id_token", "provider", "state"]);
    }
}
