// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Health check endpoint handler.
///
/// The SPA's login page polls this to decide whether provider login buttons
/// can work at all; it never checks dependencies.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "SuiSoul gateway is running".to_string(),
    })
}
