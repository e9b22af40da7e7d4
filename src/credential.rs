// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Profiles and the credentials derived from them.

use std::fmt::Debug;
use std::fmt::Formatter;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Origin of the account's S3-compatible endpoint.
pub fn account_origin(account_id: &str) -> String {
    format!("https://{account_id}.r2.cloudflarestorage.com")
}

/// Config for one named account profile.
///
/// Deserializes from the user's config file; unset fields stay empty and
/// are rejected when the profile is resolved.
#[derive(Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[non_exhaustive]
pub struct Profile {
    /// Account identifier the bucket lives under.
    pub account_id: String,
    /// API token granting object read/write on the account.
    pub api_token: String,
}

impl Profile {
    /// Create a profile from its two parts.
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
        }
    }
}

impl Debug for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

/// Signing credentials for the S3-compatible endpoint.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id, the introspected id of the API token.
    pub access_key: String,
    /// Secret key, the lowercase hex SHA-256 digest of the raw API token.
    pub secret_key: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

/// Identity of a verified API token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    /// Unique id of the token. Distinct from the token's secret value.
    pub id: String,
}

/// Token introspection endpoint.
///
/// Resolving a profile needs the token's id, which only the provider can
/// supply; implementations call the provider's verify endpoint and decode
/// its JSON answer into a [`TokenInfo`].
#[async_trait]
pub trait TokenVerifier: Send + Sync + Debug + 'static {
    /// Verify the given API token and return its identity.
    async fn verify_token(&self, api_token: &str) -> Result<TokenInfo>;
}

impl Credentials {
    /// Derive signing credentials from a profile.
    ///
    /// The access key is the token id obtained from `verifier`; the secret
    /// key is computed locally as the hex SHA-256 digest of the raw token.
    /// Deterministic for a given token and introspection answer; any
    /// introspection failure propagates unretried.
    pub async fn of_profile(profile: &Profile, verifier: &dyn TokenVerifier) -> Result<Self> {
        if profile.account_id.is_empty() {
            return Err(Error::new(ErrorKind::ConfigInvalid, "account_id is empty")
                .with_operation("Credentials::of_profile"));
        }
        if profile.api_token.is_empty() {
            return Err(Error::new(ErrorKind::ConfigInvalid, "api_token is empty")
                .with_operation("Credentials::of_profile"));
        }

        let token = verifier.verify_token(&profile.api_token).await?;
        debug!("token verified, id={}", token.id);

        let secret_key = hex::encode(Sha256::digest(profile.api_token.as_bytes()));

        Ok(Credentials {
            access_key: token.id,
            secret_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Default)]
    struct StaticVerifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenVerifier for StaticVerifier {
        async fn verify_token(&self, api_token: &str) -> Result<TokenInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TokenInfo {
                id: format!("id-of-{}", api_token.len()),
            })
        }
    }

    #[tokio::test]
    async fn test_of_profile() {
        let verifier = StaticVerifier::default();
        let profile = Profile::new("a1b2c3", "abc");

        let credentials = Credentials::of_profile(&profile, &verifier)
            .await
            .expect("must resolve");

        assert_eq!(credentials.access_key, "id-of-3");
        // SHA-256 of "abc".
        assert_eq!(
            credentials.secret_key,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_of_profile_rejects_incomplete_profile() {
        let verifier = StaticVerifier::default();

        let cases = vec![
            ("missing account", Profile::new("", "token")),
            ("missing token", Profile::new("a1b2c3", "")),
        ];
        for (name, profile) in cases {
            let err = Credentials::of_profile(&profile, &verifier)
                .await
                .expect_err(name);
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "{name}");
        }

        // Neither case may reach the verifier.
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_account_origin() {
        assert_eq!(
            account_origin("a1b2c3"),
            "https://a1b2c3.r2.cloudflarestorage.com"
        );
    }

    #[test]
    fn test_profile_config_defaults() {
        let profile: Profile = serde_json::from_str("{}").expect("must deserialize");
        assert_eq!(profile, Profile::default());

        let profile: Profile =
            serde_json::from_str(r#"{"account_id":"a1b2c3","api_token":"secret-token"}"#)
                .expect("must deserialize");
        assert_eq!(profile, Profile::new("a1b2c3", "secret-token"));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let profile = Profile::new("a1b2c3", "secret-token");
        let s = format!("{profile:?}");
        assert!(s.contains("a1b2c3"));
        assert!(!s.contains("secret-token"));

        let credentials = Credentials {
            access_key: "key-id".to_string(),
            secret_key: "deadbeef".to_string(),
        };
        let s = format!("{credentials:?}");
        assert!(s.contains("key-id"));
        assert!(!s.contains("deadbeef"));
    }
}
