// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Profile and owned-object read endpoints.
//!
//! Everything here is a thin view over live chain state; nothing is cached.
//! Ids and addresses are validated before any RPC goes out so malformed
//! input fails fast with a 400 instead of an opaque node error.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::sui::trust_system::TrustSystem;
use crate::sui::types::{valid_object_id, CardView, OwnedObjectsView, ProfileView};

/// Reputation cards held by one wallet.
#[derive(Debug, Serialize, ToSchema)]
pub struct CardsResponse {
    pub address: String,
    pub total: usize,
    pub cards: Vec<CardView>,
}

#[utoipa::path(
    get,
    path = "/v1/profiles/{object_id}",
    params(("object_id" = String, Path, description = "UserProfile object id")),
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile contents", body = ProfileView),
        (status = 400, description = "Malformed object id"),
        (status = 404, description = "No such object on chain")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    if !valid_object_id(&object_id) {
        return Err(ApiError::bad_request("invalid object id"));
    }

    let reader = TrustSystem::new(&state.sui);
    Ok(Json(reader.profile(&object_id).await?))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/profile",
    params(("address" = String, Path, description = "Wallet address")),
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile owned by the wallet", body = ProfileView),
        (status = 400, description = "Malformed address"),
        (status = 404, description = "Wallet has no profile")
    )
)]
pub async fn wallet_profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    if !valid_object_id(&address) {
        return Err(ApiError::bad_request("invalid wallet address"));
    }

    let reader = TrustSystem::new(&state.sui);
    let Some(profile) = reader.profile_for_wallet(&address).await? else {
        return Err(ApiError::not_found("no profile found for this wallet"));
    };
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/objects",
    params(("address" = String, Path, description = "Wallet address")),
    tag = "Profiles",
    responses(
        (status = 200, description = "Owned trust-system objects", body = OwnedObjectsView),
        (status = 400, description = "Malformed address")
    )
)]
pub async fn owned_objects(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<OwnedObjectsView>, ApiError> {
    if !valid_object_id(&address) {
        return Err(ApiError::bad_request("invalid wallet address"));
    }

    let reader = TrustSystem::new(&state.sui);
    Ok(Json(reader.owned_summary(&address).await?))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/cards",
    params(("address" = String, Path, description = "Wallet address")),
    tag = "Profiles",
    responses(
        (status = 200, description = "Reputation cards held by the wallet", body = CardsResponse),
        (status = 400, description = "Malformed address")
    )
)]
pub async fn wallet_cards(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<CardsResponse>, ApiError> {
    if !valid_object_id(&address) {
        return Err(ApiError::bad_request("invalid wallet address"));
    }

    let reader = TrustSystem::new(&state.sui);
    let cards = reader.cards(&address).await?;
    Ok(Json(CardsResponse {
        address,
        total: cards.len(),
        cards,
    }))
}
