// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Entry-point call preparation for `trust_system`.
//!
//! The gateway never signs or executes anything. It validates input and
//! hands back a structured move-call descriptor (`target` plus typed
//! arguments) for the caller's wallet to turn into a transaction block.
//! This module also owns the abort-code table used to translate execution
//! failures reported back by wallets.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::trust_system::{
    FN_COMPLETE_REDEMPTION, FN_CREATE_PROFILE, FN_RATE_USER, MODULE_NAME,
};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const SCORE_MIN: u64 = 1;
pub const SCORE_MAX: u64 = 5;

/// One argument of a prepared move call, tagged with how the wallet must
/// encode it (`tx.object` / `tx.pure.string` / `tx.pure.u64`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MoveCallArg {
    Object(String),
    String(String),
    U64(u64),
}

/// Unsigned entry-point invocation, ready for wallet-side signing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveCall {
    /// `package::module::function`
    pub target: String,
    pub arguments: Vec<MoveCallArg>,
}

pub fn create_profile_call(package_id: &str, registry_id: &str, username: &str) -> MoveCall {
    MoveCall {
        target: call_target(package_id, FN_CREATE_PROFILE),
        arguments: vec![
            MoveCallArg::Object(registry_id.to_string()),
            MoveCallArg::String(username.to_string()),
        ],
    }
}

pub fn rate_user_call(package_id: &str, profile_id: &str, score: u64, comment: &str) -> MoveCall {
    MoveCall {
        target: call_target(package_id, FN_RATE_USER),
        arguments: vec![
            MoveCallArg::Object(profile_id.to_string()),
            MoveCallArg::U64(score),
            MoveCallArg::String(comment.to_string()),
        ],
    }
}

pub fn complete_redemption_call(
    package_id: &str,
    registry_id: &str,
    admin_cap_id: &str,
    profile_id: &str,
) -> MoveCall {
    MoveCall {
        target: call_target(package_id, FN_COMPLETE_REDEMPTION),
        arguments: vec![
            MoveCallArg::Object(registry_id.to_string()),
            MoveCallArg::Object(admin_cap_id.to_string()),
            MoveCallArg::Object(profile_id.to_string()),
        ],
    }
}

fn call_target(package_id: &str, function: &str) -> String {
    format!("{package_id}::{MODULE_NAME}::{function}")
}

/// Returns the trimmed username, enforcing the 3-20 character rule the
/// contract-side uniqueness check assumes.
pub fn validate_username(raw: &str) -> Result<String, String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err("username is required".to_string());
    }
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(format!(
            "username must be at least {USERNAME_MIN_LEN} characters"
        ));
    }
    if len > USERNAME_MAX_LEN {
        return Err(format!(
            "username must be at most {USERNAME_MAX_LEN} characters"
        ));
    }
    Ok(username.to_string())
}

pub fn validate_score(score: u64) -> Result<(), String> {
    if (SCORE_MIN..=SCORE_MAX).contains(&score) {
        Ok(())
    } else {
        Err(format!("score must be between {SCORE_MIN} and {SCORE_MAX}"))
    }
}

pub fn validate_comment(raw: &str) -> Result<String, String> {
    let comment = raw.trim();
    if comment.is_empty() {
        return Err("comment is required".to_string());
    }
    Ok(comment.to_string())
}

/// Known abort codes raised by `trust_system` entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AbortCategory {
    UsernameTaken,
    CannotRateSelf,
    ProfileExists,
    Unknown,
}

impl AbortCategory {
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => AbortCategory::UsernameTaken,
            1 => AbortCategory::CannotRateSelf,
            2 => AbortCategory::ProfileExists,
            _ => AbortCategory::Unknown,
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            AbortCategory::UsernameTaken => "This username is already taken",
            AbortCategory::CannotRateSelf => "You cannot rate your own profile",
            AbortCategory::ProfileExists => "This wallet already has a profile",
            AbortCategory::Unknown => "Transaction failed on chain",
        }
    }
}

/// Classified execution failure handed back to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TxFailureView {
    pub category: AbortCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_code: Option<u64>,
    pub message: String,
}

pub fn classify_failure(raw_message: &str) -> TxFailureView {
    let abort_code = parse_move_abort_code(raw_message);
    let category = abort_code.map_or(AbortCategory::Unknown, AbortCategory::from_code);

    TxFailureView {
        category,
        abort_code,
        message: category.user_message().to_string(),
    }
}

/// Extracts the numeric code from a `MoveAbort(..., N)` failure string.
///
/// The location group contains nested parentheses (`Identifier("...")`,
/// `Some("...")`) and instruction offsets that defeat naive substring
/// matching, so this walks the group to its balanced close and takes the
/// integer after the last top-level comma.
pub fn parse_move_abort_code(message: &str) -> Option<u64> {
    let start = message.find("MoveAbort")?;
    let open = message[start..].find('(')? + start;

    let mut depth = 0usize;
    let mut last_separator = None;
    let mut close = None;
    for (offset, c) in message[open..].char_indices() {
        let pos = open + offset;
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(pos);
                    break;
                }
            }
            ',' if depth == 1 => last_separator = Some(pos),
            _ => {}
        }
    }

    let close = close?;
    message[last_separator? + 1..close].trim().parse().ok()
}
