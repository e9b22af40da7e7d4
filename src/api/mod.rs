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

//! The signed REST surface a [`Bucket`][crate::Bucket] talks through.
//!
//! [`SignedRestApi`] is the seam between this crate and the wire: the
//! bucket renders every operation into an [`ops`] argument bag and hands
//! it to the collaborator together with a [`CallContext`]; the
//! collaborator signs, sends, and returns either a decoded [`wire`]
//! record or the raw response. Transports, signing schemes, and retry
//! policies all live behind this trait.

use std::fmt::Debug;

use async_trait::async_trait;
use http::Response;

use crate::credential::Credentials;
use crate::http_util::ResponseBody;
use crate::Result;

mod error;
pub use error::parse_error;
pub use error::RestError;

mod ops;
pub use ops::*;

mod wire;
pub use wire::*;

/// Header names and prefixes specific to the provider.
pub mod constants {
    /// Prefix under which custom object metadata travels as headers.
    pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

    /// Header carrying the object's cache expiry timestamp.
    pub const CACHE_EXPIRY: &str = "cache-expiry";

    /// The only region the provider's endpoints accept.
    pub const REGION_AUTO: &str = "auto";
}

/// Per-call context forwarded to every collaborator invocation.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Credentials the call must be signed with.
    pub credentials: Credentials,
    /// Value for the `user-agent` request header.
    pub user_agent: String,
}

/// A signed S3-compatible REST endpoint.
///
/// Implementations own request signing, transport, and status handling:
/// any response status a method's contract does not list below must be
/// turned into an error, typically via [`parse_error`]. No method here
/// retries; callers decide what is worth another attempt based on
/// [`Error::is_temporary`][crate::Error::is_temporary].
#[async_trait]
pub trait SignedRestApi: Send + Sync + Debug + 'static {
    /// Fetch object metadata.
    ///
    /// Returns `None` on 404, the raw response on success.
    async fn head_object(
        &self,
        args: OpHeadObject,
        ctx: &CallContext,
    ) -> Result<Option<Response<ResponseBody>>>;

    /// Fetch an object, honoring conditionals and range.
    ///
    /// Returns `None` on 404. 304 and 412 responses are passed through
    /// unchanged, body and all, so the caller can apply its fallback.
    async fn get_object(
        &self,
        args: OpGetObject,
        ctx: &CallContext,
    ) -> Result<Option<Response<ResponseBody>>>;

    /// Write a whole object.
    async fn put_object(&self, args: OpPutObject, ctx: &CallContext) -> Result<()>;

    /// Delete a single object. Succeeds whether or not the key existed.
    async fn delete_object(&self, args: OpDeleteObject, ctx: &CallContext) -> Result<()>;

    /// Delete a batch of objects in one call, failing if any entry of the
    /// result document reports an error.
    async fn delete_objects(&self, args: OpDeleteObjects, ctx: &CallContext) -> Result<()>;

    /// List objects under the configured bucket.
    async fn list_objects_v2(
        &self,
        args: OpListObjectsV2,
        ctx: &CallContext,
    ) -> Result<ListBucketResult>;

    /// Initiate a multipart upload.
    async fn create_multipart_upload(
        &self,
        args: OpCreateMultipartUpload,
        ctx: &CallContext,
    ) -> Result<InitiateMultipartUploadResult>;

    /// Upload one part of a multipart upload.
    ///
    /// Returns the etag literal the provider issued for the part.
    async fn upload_part(&self, args: OpUploadPart, ctx: &CallContext) -> Result<String>;

    /// Abort a multipart upload, discarding uploaded parts.
    async fn abort_multipart_upload(
        &self,
        args: OpAbortMultipartUpload,
        ctx: &CallContext,
    ) -> Result<()>;

    /// Stitch uploaded parts into the final object.
    async fn complete_multipart_upload(
        &self,
        args: OpCompleteMultipartUpload,
        ctx: &CallContext,
    ) -> Result<CompleteMultipartUploadResult>;
}
