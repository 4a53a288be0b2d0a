// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Sui fullnode JSON-RPC client.
//!
//! Carries only the read methods the gateway needs: object fetch, owned
//! objects with a struct-type filter, and dynamic-field access for registry
//! table lookups. No transaction is ever signed or executed here.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::SuiConfig;
use crate::error::ApiError;

/// Options sent with every object fetch; matches what the views decode.
const OBJECT_OPTIONS: [(&str, bool); 3] = [
    ("showContent", true),
    ("showOwner", true),
    ("showType", true),
];

pub struct SuiClient {
    config: SuiConfig,
    http: Client,
}

#[derive(Debug, thiserror::Error)]
pub enum SuiError {
    #[error("Sui RPC request failed: {0}")]
    Request(String),

    #[error("Sui RPC returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("Sui RPC response was invalid: {0}")]
    InvalidResponse(String),
}

impl From<SuiError> for ApiError {
    fn from(err: SuiError) -> Self {
        match err {
            SuiError::ObjectNotFound(_) => ApiError::not_found("object not found on chain"),
            other => {
                tracing::warn!(error = %other, "Sui RPC call failed");
                ApiError::bad_gateway("chain RPC unavailable")
            }
        }
    }
}

impl SuiClient {
    pub fn new(config: SuiConfig) -> Result<Self, SuiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| SuiError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SuiConfig {
        &self.config
    }

    /// Fetches one object with content/owner/type shown. Object-level
    /// `notExists`/`deleted` markers become [`SuiError::ObjectNotFound`].
    pub async fn get_object(&self, object_id: &str) -> Result<Value, SuiError> {
        let mut options = serde_json::Map::new();
        for (key, enabled) in OBJECT_OPTIONS {
            options.insert(key.to_string(), Value::Bool(enabled));
        }
        let result = self
            .call("sui_getObject", json!([object_id, options]))
            .await?;

        object_data(result, object_id)
    }

    /// Lists objects owned by `address`, optionally filtered to one struct
    /// type, following `nextCursor` until the node reports the last page.
    pub async fn get_owned_objects(
        &self,
        address: &str,
        struct_type: Option<&str>,
    ) -> Result<Vec<Value>, SuiError> {
        let mut query = json!({
            "options": { "showContent": true, "showType": true }
        });
        if let Some(struct_type) = struct_type {
            query["filter"] = json!({ "StructType": struct_type });
        }

        let mut owned = Vec::new();
        let mut cursor = Value::Null;
        loop {
            let result = self
                .call(
                    "suix_getOwnedObjects",
                    json!([address, query, cursor, null]),
                )
                .await?;

            if let Some(page) = result.get("data").and_then(Value::as_array) {
                for item in page {
                    if let Some(data) = item.get("data") {
                        owned.push(data.clone());
                    }
                }
            }

            if !result
                .get("hasNextPage")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                break;
            }
            cursor = result.get("nextCursor").cloned().unwrap_or(Value::Null);
            if cursor.is_null() {
                break;
            }
        }

        Ok(owned)
    }

    /// Lists the dynamic fields of a parent object (registry table entries),
    /// following pagination like [`Self::get_owned_objects`].
    pub async fn get_dynamic_fields(&self, parent_id: &str) -> Result<Vec<Value>, SuiError> {
        let mut fields = Vec::new();
        let mut cursor = Value::Null;
        loop {
            let result = self
                .call("suix_getDynamicFields", json!([parent_id, cursor, null]))
                .await?;

            if let Some(page) = result.get("data").and_then(Value::as_array) {
                fields.extend(page.iter().cloned());
            }

            if !result
                .get("hasNextPage")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                break;
            }
            cursor = result.get("nextCursor").cloned().unwrap_or(Value::Null);
            if cursor.is_null() {
                break;
            }
        }

        Ok(fields)
    }

    /// Fetches one dynamic-field wrapper object by its listed `name`.
    pub async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        name: &Value,
    ) -> Result<Value, SuiError> {
        let result = self
            .call("suix_getDynamicFieldObject", json!([parent_id, name]))
            .await?;

        object_data(result, parent_id)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, SuiError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SuiError::Request(format!("{method} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SuiError::Request(format!(
                "{method} returned {status}: {body}"
            )));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| SuiError::InvalidResponse(format!("{method} invalid JSON: {e}")))?;

        if let Some(error) = envelope.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error")
                .to_string();
            return Err(SuiError::Rpc { code, message });
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| SuiError::InvalidResponse(format!("{method} response had no result")))
    }
}

/// Object responses carry either `data` or an object-level `error`
/// (`notExists`, `deleted`, `dynamicFieldNotFound`).
fn object_data(result: Value, requested: &str) -> Result<Value, SuiError> {
    if let Some(data) = result.get("data") {
        if !data.is_null() {
            return Ok(data.clone());
        }
    }

    if let Some(error) = result.get("error") {
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return match code {
            "notExists" | "deleted" | "dynamicFieldNotFound" => {
                Err(SuiError::ObjectNotFound(requested.to_string()))
            }
            other => Err(SuiError::InvalidResponse(format!(
                "object fetch failed with `{other}`"
            ))),
        };
    }

    Err(SuiError::InvalidResponse(
        "object response had neither data nor error".to_string(),
    ))
}
