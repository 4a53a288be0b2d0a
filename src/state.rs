// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::providers::{GoogleOAuth, IntraOAuth};
use crate::sui::SuiClient;

/// Shared handler state. Providers are `None` when their credentials are
/// absent; the relay answers 400 for those routes instead of redirecting.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub google: Option<Arc<GoogleOAuth>>,
    pub intra: Option<Arc<IntraOAuth>>,
    pub sui: Arc<SuiClient>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        google: Option<GoogleOAuth>,
        intra: Option<IntraOAuth>,
        sui: SuiClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            google: google.map(Arc::new),
            intra: intra.map(Arc::new),
            sui: Arc::new(sui),
        }
    }
}
