// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Transaction preparation endpoints.
//!
//! The gateway never holds a key. Each prepare route validates its input,
//! then returns the move call for the sender's wallet to sign and execute.
//! Rule violations the contract would abort on anyway (bad score, empty
//! comment, out-of-bounds username) are rejected here with a 422 so the
//! user never pays gas to find out. Self-rating and username uniqueness
//! stay chain-side; `/v1/tx/explain-error` translates those aborts after
//! the fact.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::sui::transactions::{
    classify_failure, complete_redemption_call, create_profile_call, rate_user_call,
    validate_comment, validate_score, validate_username, MoveCall, TxFailureView,
};
use crate::sui::trust_system::TrustSystem;
use crate::sui::types::valid_object_id;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    /// Wallet address that will sign the call.
    pub sender: String,
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RateUserRequest {
    pub sender: String,
    /// UserProfile object id of the wallet being rated.
    pub profile_id: String,
    pub score: u64,
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteRedemptionRequest {
    pub sender: String,
    pub profile_id: String,
    /// AdminCap object id; resolved from the sender's owned objects when
    /// omitted.
    #[serde(default)]
    pub admin_cap_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExplainErrorRequest {
    /// Raw execution error reported by the wallet or node.
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreparedCallResponse {
    pub sender: String,
    pub call: MoveCall,
}

#[utoipa::path(
    post,
    path = "/v1/tx/create-profile",
    request_body = CreateProfileRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Call ready for wallet signing", body = PreparedCallResponse),
        (status = 400, description = "Malformed sender address"),
        (status = 422, description = "Username violates the contract rules")
    )
)]
pub async fn prepare_create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<Json<PreparedCallResponse>, ApiError> {
    if !valid_object_id(&request.sender) {
        return Err(ApiError::bad_request("invalid sender address"));
    }
    let username = validate_username(&request.username).map_err(ApiError::unprocessable)?;

    let sui = state.sui.config();
    Ok(Json(PreparedCallResponse {
        sender: request.sender,
        call: create_profile_call(&sui.package_id, &sui.registry_id, &username),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/tx/rate-user",
    request_body = RateUserRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Call ready for wallet signing", body = PreparedCallResponse),
        (status = 400, description = "Malformed sender or profile id"),
        (status = 422, description = "Score or comment violates the contract rules")
    )
)]
pub async fn prepare_rate_user(
    State(state): State<AppState>,
    Json(request): Json<RateUserRequest>,
) -> Result<Json<PreparedCallResponse>, ApiError> {
    if !valid_object_id(&request.sender) {
        return Err(ApiError::bad_request("invalid sender address"));
    }
    if !valid_object_id(&request.profile_id) {
        return Err(ApiError::bad_request("invalid profile id"));
    }
    validate_score(request.score).map_err(ApiError::unprocessable)?;
    let comment = validate_comment(&request.comment).map_err(ApiError::unprocessable)?;

    let package_id = &state.sui.config().package_id;
    Ok(Json(PreparedCallResponse {
        sender: request.sender,
        call: rate_user_call(package_id, &request.profile_id, request.score, &comment),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/tx/complete-redemption",
    request_body = CompleteRedemptionRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Call ready for wallet signing", body = PreparedCallResponse),
        (status = 400, description = "Malformed id"),
        (status = 403, description = "Sender holds no AdminCap")
    )
)]
pub async fn prepare_complete_redemption(
    State(state): State<AppState>,
    Json(request): Json<CompleteRedemptionRequest>,
) -> Result<Json<PreparedCallResponse>, ApiError> {
    if !valid_object_id(&request.sender) {
        return Err(ApiError::bad_request("invalid sender address"));
    }
    if !valid_object_id(&request.profile_id) {
        return Err(ApiError::bad_request("invalid profile id"));
    }

    let admin_cap_id = match request.admin_cap_id {
        Some(cap) => {
            if !valid_object_id(&cap) {
                return Err(ApiError::bad_request("invalid admin cap id"));
            }
            cap
        }
        None => {
            let reader = TrustSystem::new(&state.sui);
            reader
                .find_admin_cap(&request.sender)
                .await?
                .ok_or_else(|| ApiError::forbidden("sender holds no AdminCap"))?
        }
    };

    let sui = state.sui.config();
    Ok(Json(PreparedCallResponse {
        sender: request.sender,
        call: complete_redemption_call(
            &sui.package_id,
            &sui.registry_id,
            &admin_cap_id,
            &request.profile_id,
        ),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/tx/explain-error",
    request_body = ExplainErrorRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Categorized failure", body = TxFailureView)
    )
)]
pub async fn explain_error(Json(request): Json<ExplainErrorRequest>) -> Json<TxFailureView> {
    Json(classify_failure(&request.message))
}
