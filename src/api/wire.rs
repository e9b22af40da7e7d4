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

//! XML documents exchanged with the provider.
//!
//! Field names map to PascalCase elements via serde renames; requests are
//! serialized with `quick_xml::se::to_string` and results decoded with
//! `quick_xml::de::from_reader`.

use serde::Deserialize;
use serde::Serialize;

/// Result of ListObjectsV2.
///
/// `is_truncated` and `next_continuation_token` are kept as `Option` so that
/// a provider omitting them on the last page still decodes, and
/// `serde(default)` keeps going when repeated elements are absent entirely.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBucketResult {
    /// Whether more results exist beyond this page.
    pub is_truncated: Option<bool>,
    /// Cursor for the next page of a truncated listing.
    pub next_continuation_token: Option<String>,
    /// Prefixes grouped by the delimiter, if one was sent.
    pub common_prefixes: Vec<CommonPrefix>,
    /// Objects of this page.
    pub contents: Vec<ListBucketResultItem>,
}

/// A single `Contents` entry of [`ListBucketResult`].
#[derive(Default, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBucketResultItem {
    /// Key of the object.
    pub key: String,
    /// Size of the object in bytes.
    pub size: u64,
    /// Upload instant, RFC 3339 with milliseconds.
    pub last_modified: String,
    /// Quoted etag of the object.
    #[serde(rename = "ETag")]
    pub etag: Option<String>,
}

/// A `CommonPrefixes` entry of a delimited listing.
#[derive(Default, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonPrefix {
    /// The grouped key prefix, delimiter included.
    pub prefix: String,
}

/// Result of CreateMultipartUpload.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InitiateMultipartUploadResult {
    /// Provider-issued id of the new upload.
    pub upload_id: String,
}

/// Request of CompleteMultipartUpload.
#[derive(Default, Debug, Serialize)]
#[serde(default, rename = "CompleteMultipartUpload", rename_all = "PascalCase")]
pub struct CompleteMultipartUploadRequest {
    /// Parts to stitch, in the order they were given.
    pub part: Vec<CompleteMultipartUploadRequestPart>,
}

/// A `Part` entry of [`CompleteMultipartUploadRequest`].
///
/// The etag is the quoted literal returned by UploadPart and must be sent
/// back verbatim, quotes included.
#[derive(Clone, Default, Debug, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CompleteMultipartUploadRequestPart {
    /// Caller-chosen number of the part, starting at 1.
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    /// Quoted etag issued when the part was uploaded.
    #[serde(rename = "ETag")]
    pub etag: String,
}

/// Result of CompleteMultipartUpload.
///
/// The provider may answer `200 OK` and still fail, carrying an `Error`
/// document instead: `code`/`message`/`request_id` are populated in that
/// case and empty on success.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CompleteMultipartUploadResult {
    /// Bucket holding the assembled object.
    pub bucket: String,
    /// Key of the assembled object.
    pub key: String,
    /// URL of the assembled object.
    pub location: String,
    /// Quoted etag of the assembled object.
    #[serde(rename = "ETag")]
    pub etag: String,
    /// Provider error code, empty on success.
    pub code: String,
    /// Provider error message, empty on success.
    pub message: String,
    /// Id of the failed request, empty on success.
    pub request_id: String,
}

/// Request of DeleteObjects.
#[derive(Default, Debug, Serialize)]
#[serde(default, rename = "Delete", rename_all = "PascalCase")]
pub struct DeleteRequest {
    /// Ask the provider to only report failures back.
    pub quiet: bool,
    /// Keys to delete.
    pub object: Vec<DeleteRequestObject>,
}

/// An `Object` entry of [`DeleteRequest`].
#[derive(Default, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequestObject {
    /// Key of the object to delete.
    pub key: String,
}

/// Result of DeleteObjects.
///
/// A quiet delete only reports failures, so `deleted` is normally empty.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename = "DeleteResult", rename_all = "PascalCase")]
pub struct DeleteResult {
    /// Keys the provider confirmed deleted.
    pub deleted: Vec<DeleteResultDeleted>,
    /// Keys the provider failed to delete.
    pub error: Vec<DeleteResultError>,
}

/// A `Deleted` entry of [`DeleteResult`].
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteResultDeleted {
    /// Key of the deleted object.
    pub key: String,
}

/// An `Error` entry of [`DeleteResult`].
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteResultError {
    /// Provider error code, like `AccessDenied`.
    pub code: String,
    /// Key the failure is about.
    pub key: String,
    /// Human readable description of the failure.
    pub message: String,
}
