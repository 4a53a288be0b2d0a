// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Sui chain access: JSON-RPC client, trust_system contract surface, and
//! the typed views served by the API.

pub mod client;
pub mod transactions;
pub mod trust_system;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{SuiClient, SuiError};
