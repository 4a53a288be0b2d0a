// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Registry read endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::sui::trust_system::TrustSystem;
use crate::sui::types::ProfileView;

/// Public view of the TrustRegistry singleton.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistryResponse {
    pub registry_id: String,
    pub admin_address: String,
    pub user_count: usize,
    /// Every username ever claimed, in registration order.
    pub usernames: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsernameLookupResponse {
    pub username: String,
    pub profile_id: String,
    pub profile: ProfileView,
}

#[utoipa::path(
    get,
    path = "/v1/registry",
    tag = "Registry",
    responses(
        (status = 200, description = "Registry summary", body = RegistryResponse),
        (status = 502, description = "Chain RPC unavailable")
    )
)]
pub async fn get_registry(
    State(state): State<AppState>,
) -> Result<Json<RegistryResponse>, ApiError> {
    let reader = TrustSystem::new(&state.sui);
    let record = reader.registry().await?;

    let user_count = record.usernames.len();
    Ok(Json(RegistryResponse {
        registry_id: state.sui.config().registry_id.clone(),
        admin_address: record.admin_address,
        user_count,
        usernames: record.usernames,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/registry/usernames/{username}",
    params(("username" = String, Path, description = "Claimed username to resolve")),
    tag = "Registry",
    responses(
        (status = 200, description = "Profile registered under the username", body = UsernameLookupResponse),
        (status = 404, description = "Username not registered")
    )
)]
pub async fn lookup_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UsernameLookupResponse>, ApiError> {
    let reader = TrustSystem::new(&state.sui);
    let Some(profile) = reader.profile_for_username(&username).await? else {
        return Err(ApiError::not_found("username not registered"));
    };

    Ok(Json(UsernameLookupResponse {
        username,
        profile_id: profile.object_id.clone(),
        profile,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayConfig, SuiConfig};
    use crate::sui::testing::{rpc_result, spawn_node};
    use crate::sui::types::TrustBand;
    use crate::sui::SuiClient;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    const WALLET: &str = "0x00aa";

    fn respond(method: &str, params: &Value) -> Value {
        match method {
            "sui_getObject" => {
                let id = params.get(0).and_then(Value::as_str).unwrap_or_default();
                match id {
                    "0xreg" => rpc_result(json!({
                        "data": {
                            "objectId": "0xreg",
                            "content": {
                                "dataType": "moveObject",
                                "fields": {
                                    "id": { "id": "0xreg" },
                                    "admin_address": "0xadmin",
                                    "username_list": ["alice", "bob"],
                                    "wallet_profiles": {
                                        "fields": { "id": { "id": "0xtable" }, "size": "2" }
                                    }
                                }
                            }
                        }
                    })),
                    "0xprof1" => rpc_result(json!({
                        "data": {
                            "objectId": "0xprof1",
                            "content": {
                                "dataType": "moveObject",
                                "fields": {
                                    "id": { "id": "0xprof1" },
                                    "username": "alice",
                                    "trust_score": "73",
                                    "owner": WALLET
                                }
                            }
                        }
                    })),
                    _ => rpc_result(json!({ "error": { "code": "notExists" } })),
                }
            }
            "suix_getDynamicFields" => rpc_result(json!({
                "data": [
                    { "name": { "type": "address", "value": WALLET }, "objectId": "0xentry1" }
                ],
                "hasNextPage": false,
                "nextCursor": null
            })),
            "suix_getDynamicFieldObject" => rpc_result(json!({
                "data": {
                    "objectId": "0xentry1",
                    "content": {
                        "dataType": "moveObject",
                        "fields": { "name": WALLET, "value": "0xprof1" }
                    }
                }
            })),
            other => panic!("unexpected RPC method {other}"),
        }
    }

    async fn state_against_fake_node() -> AppState {
        let url = spawn_node(respond).await;
        let sui = SuiConfig {
            rpc_url: url,
            package_id: "0xpkg".to_string(),
            registry_id: "0xreg".to_string(),
        };
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            frontend_url: "http://localhost:5173".to_string(),
            sui: sui.clone(),
        };
        AppState::new(config, None, None, SuiClient::new(sui).expect("client"))
    }

    #[tokio::test]
    async fn registry_endpoint_reports_count_and_admin() {
        let state = state_against_fake_node().await;

        let Json(body) = get_registry(axum::extract::State(state))
            .await
            .expect("registry");

        assert_eq!(body.registry_id, "0xreg");
        assert_eq!(body.admin_address, "0xadmin");
        assert_eq!(body.user_count, 2);
        assert_eq!(body.usernames, ["alice", "bob"]);
    }

    #[tokio::test]
    async fn username_lookup_returns_profile_and_id() {
        let state = state_against_fake_node().await;

        let Json(body) = lookup_username(
            axum::extract::State(state),
            Path("alice".to_string()),
        )
        .await
        .expect("lookup");

        assert_eq!(body.username, "alice");
        assert_eq!(body.profile_id, "0xprof1");
        assert_eq!(body.profile.trust_score, 73);
        assert_eq!(body.profile.band, TrustBand::Good);
    }

    #[tokio::test]
    async fn unknown_username_is_404() {
        let state = state_against_fake_node().await;

        let err = lookup_username(
            axum::extract::State(state),
            Path("mallory".to_string()),
        )
        .await
        .expect_err("unknown username");

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
