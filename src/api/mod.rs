// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    state::AppState,
    sui::transactions::{AbortCategory, MoveCall, MoveCallArg, TxFailureView},
    sui::types::{CardView, OwnedObjectsView, ProfileView, TrustBand},
};

pub mod auth;
pub mod health;
pub mod profiles;
pub mod registry;
pub mod tx;

use health::HealthResponse;
use profiles::CardsResponse;
use registry::{RegistryResponse, UsernameLookupResponse};
use tx::{
    CompleteRedemptionRequest, CreateProfileRequest, ExplainErrorRequest, PreparedCallResponse,
    RateUserRequest,
};

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_url);

    // Relay routes stay at the root; the SPA's redirect URIs are
    // registered with the providers without a version prefix.
    let relay_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/google", get(auth::google_start))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/auth/42", get(auth::forty_two_start))
        .route("/auth/42/callback", get(auth::forty_two_callback));

    let v1_routes = Router::new()
        .route("/registry", get(registry::get_registry))
        .route(
            "/registry/usernames/{username}",
            get(registry::lookup_username),
        )
        .route("/profiles/{object_id}", get(profiles::get_profile))
        .route("/accounts/{address}/profile", get(profiles::wallet_profile))
        .route("/accounts/{address}/objects", get(profiles::owned_objects))
        .route("/accounts/{address}/cards", get(profiles::wallet_cards))
        .route("/tx/create-profile", post(tx::prepare_create_profile))
        .route("/tx/rate-user", post(tx::prepare_rate_user))
        .route(
            "/tx/complete-redemption",
            post(tx::prepare_complete_redemption),
        )
        .route("/tx/explain-error", post(tx::explain_error));

    Router::new()
        .merge(relay_routes)
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
}

/// CORS restricted to the SPA origin, with credentials. `allow_credentials`
/// cannot combine with wildcards, so an unparseable origin falls back to the
/// permissive layer without credentials.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => CorsLayer::permissive(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::google_start,
        auth::google_callback,
        auth::forty_two_start,
        auth::forty_two_callback,
        registry::get_registry,
        registry::lookup_username,
        profiles::get_profile,
        profiles::wallet_profile,
        profiles::owned_objects,
        profiles::wallet_cards,
        tx::prepare_create_profile,
        tx::prepare_rate_user,
        tx::prepare_complete_redemption,
        tx::explain_error
    ),
    components(
        schemas(
            HealthResponse,
            TrustBand,
            ProfileView,
            CardView,
            OwnedObjectsView,
            RegistryResponse,
            UsernameLookupResponse,
            CardsResponse,
            MoveCall,
            MoveCallArg,
            CreateProfileRequest,
            RateUserRequest,
            CompleteRedemptionRequest,
            ExplainErrorRequest,
            PreparedCallResponse,
            TxFailureView,
            AbortCategory
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "OAuth login relay"),
        (name = "Registry", description = "Trust registry reads"),
        (name = "Profiles", description = "Profiles, cards and owned objects"),
        (name = "Transactions", description = "Move call preparation and error translation")
    )
)]
struct ApiDoc;
