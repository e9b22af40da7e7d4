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

//! Options for [`Bucket`][crate::Bucket] operations.
//!
//! Conditionals and content metadata are accepted in two shapes, a
//! structured form and a raw header map; [`OnlyIf`] and
//! [`HttpMetadataParam`] carry the choice, and a single normalization
//! function per concept renders either shape into the canonical header
//! record the collaborator receives.

use std::collections::HashMap;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use chrono::DateTime;
use chrono::Utc;
use http::header::CACHE_CONTROL;
use http::header::CONTENT_DISPOSITION;
use http::header::CONTENT_ENCODING;
use http::header::CONTENT_LANGUAGE;
use http::header::CONTENT_TYPE;
use http::header::EXPIRES;
use http::header::IF_MATCH;
use http::header::IF_MODIFIED_SINCE;
use http::header::IF_NONE_MATCH;
use http::header::IF_UNMODIFIED_SINCE;
use http::HeaderMap;
use http::HeaderName;

use crate::api::constants::X_AMZ_META_PREFIX;
use crate::http_util::clean_etag;
use crate::http_util::format_datetime_into_iso8601;
use crate::http_util::parse_prefixed_headers;
use crate::http_util::BytesRange;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Options for [`Bucket::get`][crate::Bucket::get].
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Only perform the read when the object's current state satisfies
    /// the given conditional.
    pub only_if: Option<OnlyIf>,
    /// Read only the given byte range of the object.
    pub range: Option<BytesRange>,
}

/// Options for [`Bucket::put`][crate::Bucket::put].
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Content metadata stored alongside the object and echoed on reads.
    pub http_metadata: Option<HttpMetadataParam>,
    /// Custom key-value metadata stored alongside the object.
    ///
    /// When set, this wins over any pairs derived from a header-shaped
    /// `http_metadata`.
    pub custom_metadata: Option<HashMap<String, String>>,
    /// MD5 digest of the value, for provider-side integrity checking.
    ///
    /// When set, this wins over a `content-md5` derived from a
    /// header-shaped `http_metadata`.
    pub md5: Option<ContentMd5>,
    /// Only perform the write when the object's current state satisfies
    /// the given conditional. Etags are forwarded untouched.
    pub only_if: Option<OnlyIf>,
}

/// Options for [`Bucket::list`][crate::Bucket::list].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum number of results per page.
    pub limit: Option<usize>,
    /// Opaque cursor of a previous truncated listing to resume from.
    pub cursor: Option<String>,
    /// Key delimiter for grouping, usually `/`.
    pub delimiter: Option<String>,
    /// Only list keys starting with this prefix.
    pub prefix: Option<String>,
    /// Only list keys sorting strictly after this one.
    pub start_after: Option<String>,
    /// Extra per-object fields to include in the listing.
    ///
    /// Not supported by this surface: a non-empty value fails the call
    /// before any network traffic.
    pub include: Vec<ListInclude>,
}

/// Options for [`Bucket::create_multipart_upload`][crate::Bucket::create_multipart_upload].
#[derive(Debug, Clone, Default)]
pub struct MultipartOptions {
    /// Content metadata stored on the final assembled object.
    pub http_metadata: Option<HttpMetadataParam>,
    /// Custom key-value metadata stored on the final assembled object.
    pub custom_metadata: Option<HashMap<String, String>>,
}

/// Extra listing fields callers may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInclude {
    /// Carry each object's content metadata in the listing.
    HttpMetadata,
    /// Carry each object's custom metadata in the listing.
    CustomMetadata,
}

/// The shapes [`Bucket::delete`][crate::Bucket::delete] accepts keys in.
///
/// Only the key count matters to the call pattern, not the shape: a
/// one-element batch behaves exactly like a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteKeys {
    /// A single key.
    One(String),
    /// A batch of keys.
    Many(Vec<String>),
}

impl DeleteKeys {
    /// Flatten self into a plain list of keys.
    pub fn into_keys(self) -> Vec<String> {
        match self {
            DeleteKeys::One(v) => vec![v],
            DeleteKeys::Many(vs) => vs,
        }
    }
}

impl From<&str> for DeleteKeys {
    fn from(v: &str) -> Self {
        DeleteKeys::One(v.to_string())
    }
}

impl From<String> for DeleteKeys {
    fn from(v: String) -> Self {
        DeleteKeys::One(v)
    }
}

impl From<Vec<String>> for DeleteKeys {
    fn from(v: Vec<String>) -> Self {
        DeleteKeys::Many(v)
    }
}

impl From<Vec<&str>> for DeleteKeys {
    fn from(v: Vec<&str>) -> Self {
        DeleteKeys::Many(v.into_iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DeleteKeys {
    fn from(v: [&str; N]) -> Self {
        DeleteKeys::Many(v.into_iter().map(|v| v.to_string()).collect())
    }
}

/// Content metadata of an object, in its structured shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpMetadata {
    /// Value of the `content-type` header.
    pub content_type: Option<String>,
    /// Value of the `content-language` header.
    pub content_language: Option<String>,
    /// Value of the `content-disposition` header.
    pub content_disposition: Option<String>,
    /// Value of the `content-encoding` header.
    pub content_encoding: Option<String>,
    /// Value of the `cache-control` header.
    pub cache_control: Option<String>,
    /// Expiry instant of the object in caches.
    pub cache_expiry: Option<DateTime<Utc>>,
}

/// A conditional in its structured shape.
///
/// Etag fields accept the bare digest or any of the quoted wire forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditional {
    /// Succeed only when the object's etag matches this one.
    pub if_match: Option<String>,
    /// Succeed only when the object's etag does not match this one.
    pub if_none_match: Option<String>,
    /// Succeed only when the object was uploaded after this instant.
    pub if_modified_since: Option<DateTime<Utc>>,
    /// Succeed only when the object was uploaded before this instant.
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

/// The two shapes a conditional is accepted in.
#[derive(Debug, Clone)]
pub enum OnlyIf {
    /// The structured form.
    Conditional(Conditional),
    /// The raw `if-*` request headers, copied as given.
    Headers(HeaderMap),
}

impl From<Conditional> for OnlyIf {
    fn from(v: Conditional) -> Self {
        OnlyIf::Conditional(v)
    }
}

impl From<HeaderMap> for OnlyIf {
    fn from(v: HeaderMap) -> Self {
        OnlyIf::Headers(v)
    }
}

impl OnlyIf {
    /// Render self into the canonical conditional header record.
    ///
    /// Structured timestamps keep the source asymmetry on purpose:
    /// `if_modified_since` serializes to ISO-8601 with milliseconds while
    /// `if_unmodified_since` uses the plain string rendering.
    pub fn into_headers(self) -> ConditionalHeaders {
        match self {
            OnlyIf::Conditional(v) => ConditionalHeaders {
                if_match: v.if_match,
                if_none_match: v.if_none_match,
                if_modified_since: v.if_modified_since.map(format_datetime_into_iso8601),
                if_unmodified_since: v.if_unmodified_since.map(|v| v.to_string()),
            },
            OnlyIf::Headers(headers) => ConditionalHeaders {
                if_match: header_value(&headers, IF_MATCH),
                if_none_match: header_value(&headers, IF_NONE_MATCH),
                if_modified_since: header_value(&headers, IF_MODIFIED_SINCE),
                if_unmodified_since: header_value(&headers, IF_UNMODIFIED_SINCE),
            },
        }
    }
}

/// Conditional request headers in their outgoing wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalHeaders {
    /// Value for the `if-match` header.
    pub if_match: Option<String>,
    /// Value for the `if-none-match` header.
    pub if_none_match: Option<String>,
    /// Value for the `if-modified-since` header.
    pub if_modified_since: Option<String>,
    /// Value for the `if-unmodified-since` header.
    pub if_unmodified_since: Option<String>,
}

impl ConditionalHeaders {
    /// Quote bare etags for the read path.
    ///
    /// The provider only honors the quoted etag forms on `if-match` and
    /// `if-none-match`; [`clean_etag`] wraps bare digests and leaves
    /// everything else alone. The write path skips this on purpose and
    /// forwards caller values as given.
    pub fn clean_etags(self) -> Self {
        ConditionalHeaders {
            if_match: self.if_match.map(|v| clean_etag(&v)),
            if_none_match: self.if_none_match.map(|v| clean_etag(&v)),
            if_modified_since: self.if_modified_since,
            if_unmodified_since: self.if_unmodified_since,
        }
    }
}

/// The two shapes content metadata is accepted in.
#[derive(Debug, Clone)]
pub enum HttpMetadataParam {
    /// The structured form.
    Structured(HttpMetadata),
    /// Raw headers; the content headers and any `x-amz-meta-` pairs are
    /// picked out, everything else is ignored.
    Headers(HeaderMap),
}

impl From<HttpMetadata> for HttpMetadataParam {
    fn from(v: HttpMetadata) -> Self {
        HttpMetadataParam::Structured(v)
    }
}

impl From<HeaderMap> for HttpMetadataParam {
    fn from(v: HeaderMap) -> Self {
        HttpMetadataParam::Headers(v)
    }
}

/// An MD5 digest in either of its accepted input forms.
///
/// Both render into the same `content-md5` header value, the base64
/// encoding of the 128-bit digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMd5 {
    /// The digest as a 32-char hex string; decoded before encoding.
    Hex(String),
    /// The raw 16 digest bytes, encoded as-is.
    Bytes(Bytes),
}

impl ContentMd5 {
    /// Render self as a `content-md5` header value.
    pub fn into_header(self) -> Result<String> {
        let digest = match self {
            ContentMd5::Hex(v) => {
                let bs = hex::decode(&v).map_err(|e| {
                    Error::new(ErrorKind::ConfigInvalid, "md5 is not a valid hex string")
                        .with_context("md5", &v)
                        .set_source(e)
                })?;
                if bs.len() != 16 {
                    return Err(Error::new(
                        ErrorKind::ConfigInvalid,
                        "md5 must be a 128-bit digest",
                    )
                    .with_context("md5", v));
                }
                Bytes::from(bs)
            }
            ContentMd5::Bytes(bs) => bs,
        };
        Ok(BASE64_STANDARD.encode(&digest))
    }
}

/// Content headers in their outgoing wire shape, shared by the put and
/// initiate-multipart calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentHeaders {
    /// Value for the `cache-control` header.
    pub cache_control: Option<String>,
    /// Value for the `content-disposition` header.
    pub content_disposition: Option<String>,
    /// Value for the `content-encoding` header.
    pub content_encoding: Option<String>,
    /// Value for the `content-language` header.
    pub content_language: Option<String>,
    /// Value for the `expires` header.
    pub expires: Option<String>,
    /// Value for the `content-md5` header.
    pub content_md5: Option<String>,
    /// Value for the `content-type` header.
    pub content_type: Option<String>,
    /// Custom metadata pairs, sent prefixed with `x-amz-meta-`.
    pub custom_metadata: HashMap<String, String>,
}

impl ContentHeaders {
    /// Normalize caller-supplied content options into their wire shape.
    ///
    /// Precedence mirrors the order the inputs are applied in: the
    /// metadata param seeds every field, then an explicit custom-metadata
    /// map replaces any header-derived pairs, then an explicit md5
    /// replaces any header-derived `content-md5`.
    pub fn of(
        http_metadata: Option<HttpMetadataParam>,
        custom_metadata: Option<HashMap<String, String>>,
        md5: Option<ContentMd5>,
    ) -> Result<Self> {
        let mut content = match http_metadata {
            None => ContentHeaders::default(),
            Some(HttpMetadataParam::Headers(headers)) => ContentHeaders {
                cache_control: header_value(&headers, CACHE_CONTROL),
                content_disposition: header_value(&headers, CONTENT_DISPOSITION),
                content_encoding: header_value(&headers, CONTENT_ENCODING),
                content_language: header_value(&headers, CONTENT_LANGUAGE),
                expires: header_value(&headers, EXPIRES),
                content_md5: header_value(&headers, HeaderName::from_static("content-md5")),
                content_type: header_value(&headers, CONTENT_TYPE),
                custom_metadata: parse_prefixed_headers(&headers, X_AMZ_META_PREFIX),
            },
            Some(HttpMetadataParam::Structured(m)) => ContentHeaders {
                cache_control: m.cache_control,
                content_disposition: m.content_disposition,
                content_encoding: m.content_encoding,
                content_language: m.content_language,
                expires: m.cache_expiry.map(format_datetime_into_iso8601),
                content_md5: None,
                content_type: m.content_type,
                custom_metadata: HashMap::new(),
            },
        };

        if let Some(v) = custom_metadata {
            content.custom_metadata = v;
        }
        if let Some(v) = md5 {
            content.content_md5 = Some(v.into_header()?);
        }

        Ok(content)
    }
}

/// Read a header as an owned string, treating empty values as absent.
fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
