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

//! Multipart upload sessions.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use log::debug;

use crate::api::CompleteMultipartUploadRequestPart;
use crate::api::OpAbortMultipartUpload;
use crate::api::OpCompleteMultipartUpload;
use crate::api::OpUploadPart;
use crate::bucket::BucketCore;
use crate::http_util::RequestBody;
use crate::object::StorageObject;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// A multipart upload session, bound to one `(key, upload_id)` pair.
///
/// Sessions come from
/// [`Bucket::create_multipart_upload`][crate::Bucket::create_multipart_upload]
/// and [`Bucket::resume_multipart_upload`][crate::Bucket::resume_multipart_upload].
/// Parts upload through `&self`, so any number of them can be in flight at
/// once; [`MultipartUpload::complete`] and [`MultipartUpload::abort`] take
/// `&mut self` and move the session into a terminal state when they
/// succeed. Once terminal, every operation fails with
/// [`ErrorKind::UploadFinished`] before reaching the network.
#[derive(Debug)]
pub struct MultipartUpload {
    core: Arc<BucketCore>,

    key: String,
    upload_id: String,
    state: UploadState,
}

/// Lifecycle state of a [`MultipartUpload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    /// Parts can be uploaded; complete and abort are both available.
    Active,
    /// The parts were stitched into the final object. Terminal.
    Completed,
    /// The upload was abandoned and its parts discarded. Terminal.
    Aborted,
}

impl Display for UploadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UploadState::Active => write!(f, "active"),
            UploadState::Completed => write!(f, "completed"),
            UploadState::Aborted => write!(f, "aborted"),
        }
    }
}

/// One uploaded part, as [`MultipartUpload::complete`] expects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPart {
    /// Caller-chosen number of the part, starting at 1.
    pub part_number: u32,
    /// Etag literal the provider issued for the part.
    pub etag: String,
}

impl MultipartUpload {
    pub(crate) fn new(core: Arc<BucketCore>, key: &str, upload_id: &str) -> Self {
        MultipartUpload {
            core,
            key: key.to_string(),
            upload_id: upload_id.to_string(),
            state: UploadState::Active,
        }
    }

    /// Key of the object this upload assembles.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Provider-issued id of this upload.
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Current lifecycle state of the session.
    pub fn state(&self) -> UploadState {
        self.state
    }

    fn check_active(&self, operation: &'static str) -> Result<()> {
        if self.state == UploadState::Active {
            return Ok(());
        }

        Err(
            Error::new(ErrorKind::UploadFinished, "the upload session is already finished")
                .with_operation(operation)
                .with_context("key", &self.key)
                .with_context("upload_id", &self.upload_id)
                .with_context("state", self.state),
        )
    }

    /// Upload one part of the object.
    ///
    /// Part numbers start at 1 and are entirely the caller's to manage:
    /// nothing here enforces contiguity or uniqueness, the provider
    /// validates completeness at [`MultipartUpload::complete`]. Stream
    /// values are buffered in full before transfer. Returns the pair to
    /// hand back to `complete`.
    pub async fn upload_part(
        &self,
        part_number: u32,
        value: impl Into<RequestBody>,
    ) -> Result<UploadedPart> {
        self.check_active("MultipartUpload::upload_part")?;

        let body = value.into().into_bytes().await?;
        let args = OpUploadPart {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: self.key.clone(),
            upload_id: self.upload_id.clone(),
            part_number,
            body,
        };

        let etag = self.core.api.upload_part(args, &self.core.ctx).await?;
        debug!("uploaded part {} of {} as {}", part_number, self.key, etag);

        Ok(UploadedPart { part_number, etag })
    }

    /// Abort the upload, discarding every part uploaded so far.
    ///
    /// Succeeding moves the session to [`UploadState::Aborted`]. A failed
    /// abort leaves it active, so a retry reaches the provider again and
    /// surfaces whatever it answers.
    pub async fn abort(&mut self) -> Result<()> {
        self.check_active("MultipartUpload::abort")?;

        let args = OpAbortMultipartUpload {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: self.key.clone(),
            upload_id: self.upload_id.clone(),
        };

        self.core.api.abort_multipart_upload(args, &self.core.ctx).await?;
        self.state = UploadState::Aborted;
        debug!("aborted upload {} of {}", self.upload_id, self.key);

        Ok(())
    }

    /// Stitch the uploaded parts into the final object.
    ///
    /// `parts` is forwarded to the provider in the given order, with the
    /// caller's part numbers. Succeeding moves the session to
    /// [`UploadState::Completed`]; the returned object comes from a
    /// follow-up head, whose absence is an
    /// [`ErrorKind::ConsistencyViolated`] error.
    pub async fn complete(&mut self, parts: Vec<UploadedPart>) -> Result<StorageObject> {
        self.check_active("MultipartUpload::complete")?;

        let parts = parts
            .into_iter()
            .map(|v| CompleteMultipartUploadRequestPart {
                part_number: v.part_number,
                etag: v.etag,
            })
            .collect();
        let args = OpCompleteMultipartUpload {
            bucket: self.core.bucket.clone(),
            origin: self.core.origin.clone(),
            region: self.core.region.clone(),
            key: self.key.clone(),
            upload_id: self.upload_id.clone(),
            parts,
        };

        let result = self.core.api.complete_multipart_upload(args, &self.core.ctx).await?;
        // The provider can answer 200 and still fail, shipping an error
        // document where the result should be.
        if !result.code.is_empty() {
            return Err(Error::new(
                ErrorKind::Unexpected,
                format!("complete answered {}: {}", result.code, result.message),
            )
            .with_operation("MultipartUpload::complete")
            .with_context("key", &self.key)
            .with_context("upload_id", &self.upload_id)
            .with_context("request_id", result.request_id));
        }

        self.state = UploadState::Completed;
        debug!("completed upload {} of {} as {}", self.upload_id, self.key, result.etag);

        self.core.verified_head(&self.key, "MultipartUpload::complete").await
    }
}
