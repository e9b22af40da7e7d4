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

//! Argument bags for the collaborator calls.
//!
//! Every operation receives one flat `Op*` struct carrying the routing
//! fields (`bucket`, `origin`, `region`) next to the operation-specific
//! parameters, already rendered into their wire shapes.

use bytes::Bytes;

use super::wire::CompleteMultipartUploadRequestPart;
use crate::options::ConditionalHeaders;
use crate::options::ContentHeaders;

/// Args of the HeadObject call.
#[derive(Debug, Clone, Default)]
pub struct OpHeadObject {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Content coding the response body must be delivered in.
    pub accept_encoding: String,
}

/// Args of the GetObject call.
#[derive(Debug, Clone, Default)]
pub struct OpGetObject {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Conditional request headers, with etags already quoted.
    pub conditional: ConditionalHeaders,
    /// Rendered `Range` header value, like `bytes=0-1023`.
    pub range: Option<String>,
    /// Content coding the response body must be delivered in.
    pub accept_encoding: String,
}

/// Args of the PutObject call.
#[derive(Debug, Clone, Default)]
pub struct OpPutObject {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Bytes to write.
    pub body: Bytes,
    /// Content headers stored alongside the object.
    pub content: ContentHeaders,
    /// Conditional request headers, forwarded as given.
    pub conditional: ConditionalHeaders,
}

/// Args of the DeleteObject call.
#[derive(Debug, Clone, Default)]
pub struct OpDeleteObject {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
}

/// Args of the DeleteObjects call.
#[derive(Debug, Clone, Default)]
pub struct OpDeleteObjects {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Keys to delete in one call.
    pub keys: Vec<String>,
    /// Ask the provider to only report failures in its result document.
    pub quiet: bool,
}

/// Args of the ListObjectsV2 call.
#[derive(Debug, Clone, Default)]
pub struct OpListObjectsV2 {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Maximum number of results per page.
    pub max_keys: Option<usize>,
    /// Cursor of a previous truncated listing to resume from.
    pub continuation_token: Option<String>,
    /// Key delimiter for grouping, usually `/`.
    pub delimiter: Option<String>,
    /// Only list keys starting with this prefix.
    pub prefix: Option<String>,
    /// Only list keys sorting strictly after this one.
    pub start_after: Option<String>,
}

/// Args of the CreateMultipartUpload call.
#[derive(Debug, Clone, Default)]
pub struct OpCreateMultipartUpload {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Content headers stored on the final assembled object.
    pub content: ContentHeaders,
}

/// Args of the UploadPart call.
#[derive(Debug, Clone, Default)]
pub struct OpUploadPart {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Id of the multipart upload.
    pub upload_id: String,
    /// Caller-chosen number of the part, starting at 1.
    pub part_number: u32,
    /// Bytes of the part.
    pub body: Bytes,
}

/// Args of the AbortMultipartUpload call.
#[derive(Debug, Clone, Default)]
pub struct OpAbortMultipartUpload {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Id of the multipart upload.
    pub upload_id: String,
}

/// Args of the CompleteMultipartUpload call.
#[derive(Debug, Clone, Default)]
pub struct OpCompleteMultipartUpload {
    /// Bucket the call targets.
    pub bucket: String,
    /// Endpoint origin the request is sent to.
    pub origin: String,
    /// Region the request is signed for.
    pub region: String,
    /// Key of the object.
    pub key: String,
    /// Id of the multipart upload.
    pub upload_id: String,
    /// Uploaded parts to stitch, in caller order.
    pub parts: Vec<CompleteMultipartUploadRequestPart>,
}
