// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Views over trust_system objects and the JSON decoding behind them.
//!
//! Sui JSON-RPC returns Move objects as loosely-shaped JSON: `u64` fields
//! arrive as decimal strings, tables hide their id two levels deep, and the
//! interesting content sits under `content.fields`. The decoders here turn
//! that into the typed views the API serves.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::client::SuiError;

/// Display bucket for a trust score, exactly as the frontend colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrustBand {
    Excellent,
    Good,
    Medium,
    Low,
}

impl TrustBand {
    pub fn from_score(score: u64) -> Self {
        if score >= 80 {
            TrustBand::Excellent
        } else if score >= 60 {
            TrustBand::Good
        } else if score >= 40 {
            TrustBand::Medium
        } else {
            TrustBand::Low
        }
    }
}

/// One UserProfile object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileView {
    /// Profile object id
    pub object_id: String,
    pub username: String,
    pub trust_score: u64,
    pub band: TrustBand,
    /// Wallet address the profile belongs to
    pub owner: String,
}

/// One ReputationCard object held by a rated wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardView {
    /// Card object id
    pub object_id: String,
    /// Score the rater gave (1-5)
    pub score_given: u64,
    pub comment: String,
}

/// Registry singleton content needed by the gateway: the public summary
/// plus the id of the wallet-to-profile table used for lookups.
#[derive(Debug, Clone)]
pub struct RegistryRecord {
    pub admin_address: String,
    pub usernames: Vec<String>,
    pub wallet_table_id: String,
}

/// Owned-object summary for one address, filtered to the three
/// trust_system object types.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnedObjectsView {
    pub address: String,
    /// UserProfile object ids
    pub profiles: Vec<String>,
    /// ReputationCard object ids
    pub reputation_cards: Vec<String>,
    pub has_admin_cap: bool,
}

/// Object ids and addresses share one shape on Sui: `0x` plus up to 64 hex
/// digits.
pub fn valid_object_id(raw: &str) -> bool {
    let Some(hex) = raw.strip_prefix("0x") else {
        return false;
    };
    !hex.is_empty() && hex.len() <= 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Compares two addresses in canonical form: lowercase, zero-padded to 32
/// bytes. Wallets send canonical addresses; callers may not.
pub fn addresses_equal(a: &str, b: &str) -> bool {
    match (canonical_address(a), canonical_address(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn canonical_address(raw: &str) -> Option<String> {
    if !valid_object_id(raw) {
        return None;
    }
    let hex = raw.trim_start_matches("0x").to_ascii_lowercase();
    Some(format!("{hex:0>64}"))
}

/// Move `u64` values cross JSON-RPC as decimal strings; older nodes emitted
/// plain numbers.
pub(crate) fn u64_field(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn str_field<'a>(fields: &'a Value, name: &str) -> Result<&'a str, SuiError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| SuiError::InvalidResponse(format!("object content missing `{name}`")))
}

/// Decodes a UserProfile from `sui_getObject` data (`showContent` enabled).
pub(crate) fn profile_from_object(data: &Value) -> Result<ProfileView, SuiError> {
    let object_id = str_field(data, "objectId")?.to_string();
    let fields = data
        .pointer("/content/fields")
        .ok_or_else(|| SuiError::InvalidResponse("object has no content fields".to_string()))?;

    let username = str_field(fields, "username")?.to_string();
    let owner = str_field(fields, "owner")?.to_string();
    let trust_score = fields
        .get("trust_score")
        .and_then(u64_field)
        .ok_or_else(|| SuiError::InvalidResponse("profile has no trust_score".to_string()))?;

    Ok(ProfileView {
        object_id,
        username,
        trust_score,
        band: TrustBand::from_score(trust_score),
        owner,
    })
}

/// Decodes a ReputationCard from owned-object data.
pub(crate) fn card_from_object(data: &Value) -> Result<CardView, SuiError> {
    let object_id = str_field(data, "objectId")?.to_string();
    let fields = data
        .pointer("/content/fields")
        .ok_or_else(|| SuiError::InvalidResponse("object has no content fields".to_string()))?;

    let score_given = fields
        .get("score_given")
        .and_then(u64_field)
        .ok_or_else(|| SuiError::InvalidResponse("card has no score_given".to_string()))?;
    let comment = str_field(fields, "comment")?.to_string();

    Ok(CardView {
        object_id,
        score_given,
        comment,
    })
}

/// Decodes the registry singleton. The wallet-to-profile `Table` exposes
/// only its id (`fields.wallet_profiles.fields.id.id`); its entries are
/// dynamic fields read separately.
pub(crate) fn registry_from_object(data: &Value) -> Result<RegistryRecord, SuiError> {
    let fields = data
        .pointer("/content/fields")
        .ok_or_else(|| SuiError::InvalidResponse("registry has no content fields".to_string()))?;

    let admin_address = str_field(fields, "admin_address")?.to_string();

    let usernames = fields
        .get("username_list")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let wallet_table_id = fields
        .pointer("/wallet_profiles/fields/id/id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            SuiError::InvalidResponse("registry has no wallet_profiles table".to_string())
        })?
        .to_string();

    Ok(RegistryRecord {
        admin_address,
        usernames,
        wallet_table_id,
    })
}
