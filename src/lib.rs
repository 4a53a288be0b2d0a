// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! SuiSoul Gateway - login relay and chain-read API
//!
//! The HTTP half of the SuiSoul trust dapp: a keyless OAuth relay for the
//! SPA's Google and 42 logins, plus read and prepare endpoints over the
//! on-chain `trust_system` contract. The gateway holds no keys and stores
//! no state; every write is signed by the user's wallet in the browser.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `providers` - OAuth2 authorization-code clients (Google, 42 intra)
//! - `sui` - Sui fullnode JSON-RPC reads and move-call preparation

pub mod api;
pub mod config;
pub mod error;
pub mod providers;
pub mod state;
pub mod sui;
