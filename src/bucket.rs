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

//! The bucket operation surface.

use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use http::StatusCode;
use log::debug;
use log::warn;

use crate::api::constants;
use crate::api::CallContext;
use crate::api::OpCreateMultipartUpload;
use crate::api::OpDeleteObject;
use crate::api::OpDeleteObjects;
use crate::api::OpGetObject;
use crate::api::OpHeadObject;
use crate::api::OpListObjectsV2;
use crate::api::OpPutObject;
use crate::api::SignedRestApi;
use crate::credential::account_origin;
use crate::credential::Credentials;
use crate::credential::Profile;
use crate::credential::TokenVerifier;
use crate::http_util::RequestBody;
use crate::multipart::MultipartUpload;
use crate::object::GetResult;
use crate::object::Listing;
use crate::object::StorageObject;
use crate::object::StorageObjectBody;
use crate::options::ContentHeaders;
use crate::options::DeleteKeys;
use crate::options::GetOptions;
use crate::options::ListOptions;
use crate::options::MultipartOptions;
use crate::options::OnlyIf;
use crate::options::PutOptions;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Content coding requested on reads. Anything else makes the provider
/// skip content-length and etag on the answer.
const ACCEPT_IDENTITY: &str = "identity";

/// One bucket on the provider, bound to a signed REST collaborator.
///
/// Cheap to clone; clones share the collaborator handle and connection
/// parameters. Every operation is a single HTTP exchange with no internal
/// retries. The one exception is the corrective head [`Bucket::get`]
/// performs when a conditional read answers 304 or 412.
#[derive(Debug, Clone)]
pub struct Bucket {
    core: Arc<BucketCore>,
}

pub(crate) struct BucketCore {
    pub api: Arc<dyn SignedRestApi>,

    pub bucket: String,
    pub origin: String,
    pub region: String,
    pub ctx: CallContext,
}

impl Debug for BucketCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketCore")
            .field("bucket", &self.bucket)
            .field("origin", &self.origin)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl BucketCore {
    /// Head the given key, answering `None` on not-found.
    pub(crate) async fn head_object(&self, key: &str) -> Result<Option<StorageObject>> {
        let args = OpHeadObject {
            bucket: self.bucket.clone(),
            origin: self.origin.clone(),
            region: self.region.clone(),
            key: key.to_string(),
            accept_encoding: ACCEPT_IDENTITY.to_string(),
        };

        let Some(resp) = self.api.head_object(args, &self.ctx).await? else {
            return Ok(None);
        };
        debug!("head {}: {}", key, resp.status());

        StorageObject::from_response_headers(key, resp.headers()).map(Some)
    }

    /// Head the given key right after a write the provider accepted.
    pub(crate) async fn verified_head(
        &self,
        key: &str,
        operation: &'static str,
    ) -> Result<StorageObject> {
        match self.head_object(key).await? {
            Some(v) => Ok(v),
            None => {
                warn!("{operation}: {key} is missing right after a successful write");
                Err(Error::new(
                    ErrorKind::ConsistencyViolated,
                    "object is missing right after a successful write",
                )
                .with_operation(operation)
                .with_context("key", key))
            }
        }
    }
}

impl Bucket {
    /// Bind a bucket reachable at the given endpoint origin.
    pub fn new(
        api: Arc<dyn SignedRestApi>,
        origin: impl Into<String>,
        credentials: Credentials,
        bucket: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Bucket {
            core: Arc::new(BucketCore {
                api,
                bucket: bucket.into(),
                origin: origin.into(),
                region: constants::REGION_AUTO.to_string(),
                ctx: CallContext {
                    credentials,
                    user_agent: user_agent.into(),
                },
            }),
        }
    }

    /// Bind a bucket under the given account, deriving the endpoint origin
    /// from the account id.
    pub fn of_account(
        api: Arc<dyn SignedRestApi>,
        account_id: &str,
        credentials: Credentials,
        bucket: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self::new(api, account_origin(account_id), credentials, bucket, user_agent)
    }

    /// Bind a bucket for the given profile, resolving its credentials
    /// through `verifier` first.
    pub async fn of_profile(
        api: Arc<dyn SignedRestApi>,
        profile: &Profile,
        verifier: &dyn TokenVerifier,
        bucket: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials::of_profile(profile, verifier).await?;
        Ok(Self::of_account(
            api,
            &profile.account_id,
            credentials,
            bucket,
            user_agent,
        ))
    }

    /// Name of the bucket.
    pub fn name(&self) -> &str {
        &self.core.bucket
    }

    /// Endpoint origin the bucket is reached at.
    pub fn origin(&self) -> &str {
        &self.core.origin
    }

    /// Fetch an object's metadata without its bytes.
    ///
    /// Answers `None` when no such key exists.
    pub async fn head(&self, key: &str) -> Result<Option<StorageObject>> {
        self.core.head_object(key).await
    }

    /// Fetch an object.
    ///
    /// A found answer with a body comes back as [`GetResult::Body`]. When
    /// a conditional in `options` is not satisfied, the provider's 304 or
    /// 412 answer carries no content-length, etag, or last-modified, so
    /// the metadata is re-fetched with one head call and answered as
    /// [`GetResult::Object`]. Answers `None` when no such key exists.
    pub async fn get(&self, key: &str, options: GetOptions) -> Result<Option<GetResult>> {
        let conditional = options
            .only_if
            .map(OnlyIf::into_headers)
            .unwrap_or_default()
            .clean_etags();
        let args = OpGetObject {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: key.to_string(),
            conditional,
            range: options.range.map(|v| v.to_header()),
            accept_encoding: ACCEPT_IDENTITY.to_string(),
        };

        let Some(resp) = self.core.api.get_object(args, &self.core.ctx).await? else {
            return Ok(None);
        };

        let status = resp.status();
        debug!("get {key}: {status}");
        if status == StatusCode::NOT_MODIFIED || status == StatusCode::PRECONDITION_FAILED {
            // No usable metadata headers on these answers; the only way
            // back to an object is another head.
            return Ok(self.head(key).await?.map(GetResult::Object));
        }

        let (parts, body) = resp.into_parts();
        let object = StorageObject::from_response_headers(key, &parts.headers)?;
        Ok(Some(GetResult::Body(Box::new(StorageObjectBody::new(
            object, body,
        )))))
    }

    /// Write an object.
    ///
    /// `value` may be flat bytes, text, or a stream; streams are buffered
    /// in full before transfer. Conditional etags are forwarded exactly as
    /// given. The returned object comes from a follow-up head, whose
    /// absence is an [`ErrorKind::ConsistencyViolated`] error.
    pub async fn put(
        &self,
        key: &str,
        value: impl Into<RequestBody>,
        options: PutOptions,
    ) -> Result<StorageObject> {
        let content =
            ContentHeaders::of(options.http_metadata, options.custom_metadata, options.md5)?;
        let conditional = options.only_if.map(OnlyIf::into_headers).unwrap_or_default();
        let body = value.into().into_bytes().await?;

        let args = OpPutObject {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: key.to_string(),
            body,
            content,
            conditional,
        };
        self.core.api.put_object(args, &self.core.ctx).await?;
        debug!("put {key}: accepted, verifying");

        self.core.verified_head(key, "Bucket::put").await
    }

    /// Delete one key or a batch of keys.
    ///
    /// An empty batch performs no call at all. A single key goes through
    /// the single-object call, anything more through one quiet batch call.
    pub async fn delete(&self, keys: impl Into<DeleteKeys>) -> Result<()> {
        let mut keys = keys.into().into_keys();
        match keys.len() {
            0 => Ok(()),
            1 => {
                let args = OpDeleteObject {
                    bucket: self.core.bucket.clone(),
                    origin: self.core.origin.clone(),
                    region: self.core.region.clone(),
                    key: keys.remove(0),
                };
                self.core.api.delete_object(args, &self.core.ctx).await
            }
            n => {
                debug!("delete: batching {n} keys");
                let args = OpDeleteObjects {
                    bucket: self.core.bucket.clone(),
                    origin: self.core.origin.clone(),
                    region: self.core.region.clone(),
                    keys,
                    quiet: true,
                };
                self.core.api.delete_objects(args, &self.core.ctx).await
            }
        }
    }

    /// List objects of the bucket, one page per call.
    ///
    /// Asking for extra listing fields via [`ListOptions::include`] is not
    /// supported here and fails before any network traffic. Objects of the
    /// answer carry only what a listing record reports, see
    /// [`StorageObject::etag`] for the caveats.
    pub async fn list(&self, options: ListOptions) -> Result<Listing> {
        if !options.include.is_empty() {
            return Err(
                Error::new(ErrorKind::Unsupported, "list cannot include extra object fields")
                    .with_operation("Bucket::list")
                    .with_context("include", format!("{:?}", options.include)),
            );
        }

        let args = OpListObjectsV2 {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            max_keys: options.limit,
            continuation_token: options.cursor,
            delimiter: options.delimiter,
            prefix: options.prefix,
            start_after: options.start_after,
        };
        let result = self.core.api.list_objects_v2(args, &self.core.ctx).await?;

        let objects = result
            .contents
            .iter()
            .map(StorageObject::from_list_item)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "list: {} objects, truncated={}",
            objects.len(),
            result.is_truncated.unwrap_or(false)
        );

        Ok(Listing {
            truncated: result.is_truncated.unwrap_or(false),
            cursor: result.next_continuation_token,
            delimited_prefixes: result
                .common_prefixes
                .into_iter()
                .map(|v| v.prefix)
                .collect(),
            objects,
        })
    }

    /// Start a multipart upload for the given key.
    ///
    /// Content metadata is rendered the same way [`Bucket::put`] renders
    /// it and lands on the final assembled object.
    pub async fn create_multipart_upload(
        &self,
        key: &str,
        options: MultipartOptions,
    ) -> Result<MultipartUpload> {
        let content = ContentHeaders::of(options.http_metadata, options.custom_metadata, None)?;

        let args = OpCreateMultipartUpload {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: key.to_string(),
            content,
        };
        let result = self
            .core
            .api
            .create_multipart_upload(args, &self.core.ctx)
            .await?;
        debug!("created multipart upload {} for {key}", result.upload_id);

        Ok(MultipartUpload::new(self.core.clone(), key, &result.upload_id))
    }

    /// Rebind a session for an upload started earlier.
    ///
    /// Purely local: nothing checks the pair here, so an unknown or
    /// already finished `upload_id` only surfaces on the session's next
    /// operation.
    pub fn resume_multipart_upload(&self, key: &str, upload_id: &str) -> MultipartUpload {
        MultipartUpload::new(self.core.clone(), key, upload_id)
    }
}
