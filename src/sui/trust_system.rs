// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Read surface of the deployed `suisoul::trust_system` module.
//!
//! The contract is a black box addressed by name: this wrapper knows its
//! object types and where the registry keeps its wallet-to-profile table,
//! nothing about its scoring rules.

use serde_json::Value;

use super::client::{SuiClient, SuiError};
use super::types::{
    addresses_equal, card_from_object, profile_from_object, registry_from_object, CardView,
    OwnedObjectsView, ProfileView, RegistryRecord,
};

pub const MODULE_NAME: &str = "trust_system";

pub const FN_CREATE_PROFILE: &str = "create_profile";
pub const FN_RATE_USER: &str = "rate_user";
pub const FN_COMPLETE_REDEMPTION: &str = "complete_redemption_task";

pub fn user_profile_type(package_id: &str) -> String {
    format!("{package_id}::{MODULE_NAME}::UserProfile")
}

pub fn reputation_card_type(package_id: &str) -> String {
    format!("{package_id}::{MODULE_NAME}::ReputationCard")
}

pub fn admin_cap_type(package_id: &str) -> String {
    format!("{package_id}::{MODULE_NAME}::AdminCap")
}

/// Contract reader over a [`SuiClient`].
pub struct TrustSystem<'a> {
    client: &'a SuiClient,
}

impl<'a> TrustSystem<'a> {
    pub fn new(client: &'a SuiClient) -> Self {
        Self { client }
    }

    fn package_id(&self) -> &str {
        &self.client.config().package_id
    }

    pub async fn registry(&self) -> Result<RegistryRecord, SuiError> {
        let data = self
            .client
            .get_object(&self.client.config().registry_id)
            .await?;
        registry_from_object(&data)
    }

    pub async fn profile(&self, object_id: &str) -> Result<ProfileView, SuiError> {
        let data = self.client.get_object(object_id).await?;
        profile_from_object(&data)
    }

    /// Resolves a wallet address to its profile through the registry's
    /// wallet-to-profile table. `None` when the wallet never created one.
    pub async fn profile_for_wallet(
        &self,
        address: &str,
    ) -> Result<Option<ProfileView>, SuiError> {
        let registry = self.registry().await?;
        let Some(profile_id) = self.wallet_profile_id(&registry, address).await? else {
            return Ok(None);
        };
        Ok(Some(self.profile(&profile_id).await?))
    }

    /// Resolves a registered username to its profile. The registry's
    /// username list gates the walk so unknown names cost one object read.
    pub async fn profile_for_username(
        &self,
        username: &str,
    ) -> Result<Option<ProfileView>, SuiError> {
        let registry = self.registry().await?;
        if !registry.usernames.iter().any(|u| u == username) {
            return Ok(None);
        }

        let entries = self
            .client
            .get_dynamic_fields(&registry.wallet_table_id)
            .await?;
        for entry in entries {
            let Some(profile_id) = self.entry_profile_id(&registry, &entry).await? else {
                continue;
            };
            let profile = self.profile(&profile_id).await?;
            if profile.username == username {
                return Ok(Some(profile));
            }
        }

        // Listed but not resolvable through the table; treat as absent.
        Ok(None)
    }

    pub async fn owned_summary(&self, address: &str) -> Result<OwnedObjectsView, SuiError> {
        let profiles = self
            .owned_ids(address, &user_profile_type(self.package_id()))
            .await?;
        let reputation_cards = self
            .owned_ids(address, &reputation_card_type(self.package_id()))
            .await?;
        let has_admin_cap = self.find_admin_cap(address).await?.is_some();

        Ok(OwnedObjectsView {
            address: address.to_string(),
            profiles,
            reputation_cards,
            has_admin_cap,
        })
    }

    pub async fn cards(&self, address: &str) -> Result<Vec<CardView>, SuiError> {
        let objects = self
            .client
            .get_owned_objects(address, Some(&reputation_card_type(self.package_id())))
            .await?;
        objects.iter().map(card_from_object).collect()
    }

    /// First AdminCap owned by `address`, if any. Gates redemption calls.
    pub async fn find_admin_cap(&self, address: &str) -> Result<Option<String>, SuiError> {
        let ids = self
            .owned_ids(address, &admin_cap_type(self.package_id()))
            .await?;
        Ok(ids.into_iter().next())
    }

    async fn wallet_profile_id(
        &self,
        registry: &RegistryRecord,
        address: &str,
    ) -> Result<Option<String>, SuiError> {
        let entries = self
            .client
            .get_dynamic_fields(&registry.wallet_table_id)
            .await?;
        for entry in entries {
            let key = entry
                .pointer("/name/value")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !addresses_equal(key, address) {
                continue;
            }
            return self.entry_profile_id(registry, &entry).await;
        }
        Ok(None)
    }

    /// Reads one table entry's wrapper object; its content holds the mapped
    /// profile id under `fields.value`.
    async fn entry_profile_id(
        &self,
        registry: &RegistryRecord,
        entry: &Value,
    ) -> Result<Option<String>, SuiError> {
        let Some(name) = entry.get("name") else {
            return Ok(None);
        };
        let wrapper = self
            .client
            .get_dynamic_field_object(&registry.wallet_table_id, name)
            .await?;
        Ok(wrapper
            .pointer("/content/fields/value")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn owned_ids(
        &self,
        address: &str,
        struct_type: &str,
    ) -> Result<Vec<String>, SuiError> {
        let objects = self
            .client
            .get_owned_objects(address, Some(struct_type))
            .await?;
        Ok(objects
            .iter()
            .filter_map(|data| data.get("objectId").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}
