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

//! The object model every bucket operation answers with.
//!
//! A [`StorageObject`] is built from either of the two response shapes
//! the provider produces: the sparse record of a listing, or the headers
//! of a head/get response. Both paths land on the same type; the listing
//! path leaves the header-only fields as documented placeholders.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::DateTime;
use chrono::Utc;
use futures::stream::BoxStream;
use http::header::CACHE_CONTROL;
use http::header::CONTENT_DISPOSITION;
use http::header::CONTENT_ENCODING;
use http::header::CONTENT_LANGUAGE;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use serde::de::DeserializeOwned;

use crate::api::constants;
use crate::api::ListBucketResultItem;
use crate::http_util::parse_content_length;
use crate::http_util::parse_content_range;
use crate::http_util::parse_datetime_from_rfc2822_or_rfc3339;
use crate::http_util::parse_datetime_from_rfc3339;
use crate::http_util::parse_etag;
use crate::http_util::parse_header_etag;
use crate::http_util::parse_header_to_str;
use crate::http_util::parse_last_modified;
use crate::http_util::parse_prefixed_headers;
use crate::http_util::parse_quoted_etag;
use crate::http_util::BytesRange;
use crate::http_util::ResponseBody;
use crate::options::HttpMetadata;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Metadata of one object in the bucket.
///
/// # Construction paths
///
/// Depending on which call produced it, not every field is authoritative:
///
/// - [`StorageObject::from_response_headers`] (head, get, and the
///   verification reads after put/complete) carries everything the
///   provider reports, including content and custom metadata.
/// - [`StorageObject::from_list_item`] only knows what a listing record
///   carries: key, size, etag, and upload time. Its `http_metadata`,
///   `custom_metadata`, and `checksums` are empty placeholders and
///   `range` is never set; do not rely on them after a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    key: String,
    version: String,
    size: Option<u64>,
    etag: String,
    http_etag: String,
    uploaded: DateTime<Utc>,
    http_metadata: HttpMetadata,
    custom_metadata: HashMap<String, String>,
    range: Option<BytesRange>,
    checksums: Checksums,
}

impl StorageObject {
    /// Build an object from one record of a listing.
    ///
    /// List records only ever carry the plain quoted etag shape; anything
    /// else fails as a malformed response.
    pub fn from_list_item(item: &ListBucketResultItem) -> Result<Self> {
        let http_etag = item.etag.as_deref().ok_or_else(|| {
            Error::new(ErrorKind::ResponseInvalid, "expected etag in list record")
                .with_context("key", &item.key)
        })?;
        let etag = parse_quoted_etag(http_etag)?.to_string();
        let uploaded = parse_datetime_from_rfc3339(&item.last_modified)
            .map_err(|err| err.with_context("key", &item.key))?;

        Ok(StorageObject {
            key: item.key.clone(),
            // Placeholder: this protocol reports no real version id.
            version: etag.clone(),
            size: Some(item.size),
            etag,
            http_etag: http_etag.to_string(),
            uploaded,
            http_metadata: HttpMetadata::default(),
            custom_metadata: HashMap::new(),
            range: None,
            checksums: Checksums::default(),
        })
    }

    /// Build an object from the headers of a head or get response.
    ///
    /// `etag` and `last-modified` are mandatory; `size` comes from
    /// `content-range` when it reports a total, else `content-length`,
    /// and may stay unknown on partial responses without either.
    pub fn from_response_headers(key: &str, headers: &HeaderMap) -> Result<Self> {
        let content_range = parse_content_range(headers)?;
        let range = content_range.map(|v| v.range());
        let size = match content_range.and_then(|v| v.size()) {
            Some(v) => Some(v),
            None => parse_content_length(headers)?,
        };

        let http_etag = parse_etag(headers)?.ok_or_else(|| {
            Error::new(ErrorKind::ResponseInvalid, "expected etag header")
                .with_context("key", key)
        })?;
        let etag = parse_header_etag(http_etag)?.to_string();

        let uploaded = parse_last_modified(headers)?.ok_or_else(|| {
            Error::new(ErrorKind::ResponseInvalid, "expected last-modified header")
                .with_context("key", key)
        })?;

        let cache_expiry = match parse_header_to_str(headers, constants::CACHE_EXPIRY)?
            .filter(|v| !v.is_empty())
        {
            Some(v) => Some(parse_datetime_from_rfc2822_or_rfc3339(v)?),
            None => None,
        };
        let http_metadata = HttpMetadata {
            content_type: copy_header(headers, CONTENT_TYPE)?,
            content_language: copy_header(headers, CONTENT_LANGUAGE)?,
            content_disposition: copy_header(headers, CONTENT_DISPOSITION)?,
            content_encoding: copy_header(headers, CONTENT_ENCODING)?,
            cache_control: copy_header(headers, CACHE_CONTROL)?,
            cache_expiry,
        };

        Ok(StorageObject {
            key: key.to_string(),
            version: etag.clone(),
            size,
            etag,
            http_etag: http_etag.to_string(),
            uploaded,
            http_metadata,
            custom_metadata: parse_prefixed_headers(headers, constants::X_AMZ_META_PREFIX),
            range,
            checksums: Checksums::default(),
        })
    }

    /// Key of the object.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Version of the object.
    ///
    /// Placeholder: this protocol never reports a version id, so the
    /// value mirrors [`StorageObject::etag`].
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Size of the whole object in bytes.
    ///
    /// A headers-sourced object may not know its size when the response
    /// had neither `content-range` with a total nor `content-length`;
    /// asking then is an error.
    pub fn size(&self) -> Result<u64> {
        self.size.ok_or_else(|| {
            Error::new(ErrorKind::ResponseInvalid, "size was not present in the response")
                .with_operation("StorageObject::size")
                .with_context("key", &self.key)
        })
    }

    /// The bare 32-hex content digest, quoting and affixes stripped.
    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// The raw etag wire literal, quotes and any `W/` prefix or
    /// multipart suffix included.
    pub fn http_etag(&self) -> &str {
        &self.http_etag
    }

    /// Instant the object was uploaded.
    pub fn uploaded(&self) -> DateTime<Utc> {
        self.uploaded
    }

    /// Content metadata stored with the object.
    pub fn http_metadata(&self) -> &HttpMetadata {
        &self.http_metadata
    }

    /// Custom metadata stored with the object, header prefix stripped.
    pub fn custom_metadata(&self) -> &HashMap<String, String> {
        &self.custom_metadata
    }

    /// The byte range this object covers, set only when the response was
    /// partial.
    pub fn range(&self) -> Option<BytesRange> {
        self.range
    }

    /// Content checksums of the object.
    ///
    /// Placeholder: this protocol reports none, so every field is `None`.
    pub fn checksums(&self) -> &Checksums {
        &self.checksums
    }

    /// Write the object's content metadata into the given headers.
    ///
    /// Not supported by this surface on either construction path; always
    /// fails.
    pub fn write_http_metadata(&self, _headers: &mut HeaderMap) -> Result<()> {
        Err(Error::new(
            ErrorKind::Unsupported,
            "write_http_metadata is not supported",
        )
        .with_operation("StorageObject::write_http_metadata")
        .with_context("key", &self.key))
    }
}

/// Read a header as an owned string, treating empty values as absent.
fn copy_header(headers: &HeaderMap, name: http::HeaderName) -> Result<Option<String>> {
    Ok(parse_header_to_str(headers, name)?
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string()))
}

/// Content checksums of an object.
///
/// Kept explicit so callers see exactly which algorithms could be
/// reported; this protocol reports none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checksums {
    /// Hex MD5 digest, when reported.
    pub md5: Option<String>,
    /// Hex SHA-1 digest, when reported.
    pub sha1: Option<String>,
    /// Hex SHA-256 digest, when reported.
    pub sha256: Option<String>,
    /// Hex SHA-384 digest, when reported.
    pub sha384: Option<String>,
    /// Hex SHA-512 digest, when reported.
    pub sha512: Option<String>,
}

/// A [`StorageObject`] plus the response body it arrived with.
///
/// The body is a single-consumption stream: whichever read path runs
/// first takes it, and every later read fails. [`StorageObjectBody::body_used`]
/// reports whether that has happened.
#[derive(Debug)]
pub struct StorageObjectBody {
    object: StorageObject,
    body: ResponseBody,
}

impl StorageObjectBody {
    /// Pair an object with its response body.
    pub fn new(object: StorageObject, body: ResponseBody) -> Self {
        StorageObjectBody { object, body }
    }

    /// The object's metadata.
    pub fn object(&self) -> &StorageObject {
        &self.object
    }

    /// Consume self into the metadata, dropping any unread body.
    pub fn into_object(self) -> StorageObject {
        self.object
    }

    /// Whether the body has already been consumed.
    pub fn body_used(&self) -> bool {
        self.body.is_consumed()
    }

    /// Take the body as a byte stream, consuming it.
    pub fn stream(&mut self) -> Result<BoxStream<'static, Result<Bytes>>> {
        self.body.take_stream()
    }

    /// Read the whole body into memory, consuming it.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        self.body.to_bytes().await
    }

    /// Read the whole body as UTF-8 text, consuming it.
    pub async fn text(&mut self) -> Result<String> {
        let bs = self.bytes().await?;
        String::from_utf8(bs.into()).map_err(|e| {
            Error::new(ErrorKind::ResponseInvalid, "body is not valid utf-8")
                .with_context("key", self.object.key())
                .set_source(e)
        })
    }

    /// Read and decode the whole body as JSON, consuming it.
    pub async fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let bs = self.bytes().await?;
        serde_json::from_slice(&bs).map_err(|e| {
            Error::new(ErrorKind::ResponseInvalid, "body is not valid json")
                .with_context("key", self.object.key())
                .set_source(e)
        })
    }
}

/// Result of a [`Bucket::get`][crate::Bucket::get] that found the object.
#[derive(Debug)]
pub enum GetResult {
    /// The provider answered the read with metadata and bytes.
    Body(Box<StorageObjectBody>),
    /// A conditional was not satisfied; the metadata was re-fetched and
    /// there is no body to read.
    Object(StorageObject),
}

impl GetResult {
    /// The object's metadata, whichever shape the result took.
    pub fn object(&self) -> &StorageObject {
        match self {
            GetResult::Body(v) => v.object(),
            GetResult::Object(v) => v,
        }
    }

    /// Consume self into the metadata, dropping any unread body.
    pub fn into_object(self) -> StorageObject {
        match self {
            GetResult::Body(v) => v.into_object(),
            GetResult::Object(v) => v,
        }
    }

    /// Consume self into the body-bearing form, when the read produced
    /// one.
    pub fn into_body(self) -> Option<StorageObjectBody> {
        match self {
            GetResult::Body(v) => Some(*v),
            GetResult::Object(_) => None,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Default)]
pub struct Listing {
    /// Whether more results exist beyond this page.
    pub truncated: bool,
    /// Cursor resuming the listing after this page, when truncated.
    pub cursor: Option<String>,
    /// Key groups folded by the delimiter, when one was given.
    pub delimited_prefixes: Vec<String>,
    /// Objects of this page, in listing order.
    pub objects: Vec<StorageObject>,
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    use super::*;

    const DIGEST: &str = "0f343b0931126a20f133d67c2b018a3b";

    fn list_item(etag: Option<&str>) -> ListBucketResultItem {
        ListBucketResultItem {
            key: "photos/2006".to_string(),
            size: 56,
            last_modified: "2016-04-30T23:51:29.000Z".to_string(),
            etag: etag.map(|v| v.to_string()),
        }
    }

    fn response_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("etag", HeaderValue::from_str(&format!("\"{DIGEST}\"")).unwrap());
        headers.insert(
            "last-modified",
            HeaderValue::from_static("Mon, 19 Sep 2022 12:00:00 GMT"),
        );
        headers
    }

    #[test]
    fn test_from_list_item() {
        let object = StorageObject::from_list_item(&list_item(Some(&format!("\"{DIGEST}\""))))
            .expect("must build");

        assert_eq!(object.key(), "photos/2006");
        assert_eq!(object.size().unwrap(), 56);
        assert_eq!(object.etag(), DIGEST);
        assert_eq!(object.http_etag(), format!("\"{DIGEST}\""));
        assert_eq!(object.uploaded().to_rfc3339(), "2016-04-30T23:51:29+00:00");

        // Placeholders of the listing path.
        assert_eq!(object.version(), DIGEST);
        assert_eq!(object.range(), None);
        assert_eq!(object.http_metadata(), &HttpMetadata::default());
        assert!(object.custom_metadata().is_empty());
        assert_eq!(object.checksums(), &Checksums::default());
    }

    #[test]
    fn test_from_list_item_rejects_non_plain_etags() {
        // The listing path is strict: only the plain quoted digest shape.
        let cases = vec![
            ("unquoted", DIGEST.to_string()),
            ("weak", format!("W/\"{DIGEST}\"")),
            ("multipart suffix", format!("\"{DIGEST}-2\"")),
        ];

        for (name, etag) in cases {
            let err = StorageObject::from_list_item(&list_item(Some(&etag))).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ResponseInvalid, "{name}");
        }

        let err = StorageObject::from_list_item(&list_item(None)).unwrap_err();
        assert!(err.to_string().contains("etag"));
    }

    #[test]
    fn test_from_response_headers() {
        let mut headers = response_headers();
        headers.insert("content-length", HeaderValue::from_static("42"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("cache-control", HeaderValue::from_static("max-age=60"));
        headers.insert(
            "cache-expiry",
            HeaderValue::from_static("Wed, 21 Sep 2022 12:00:00 GMT"),
        );
        headers.insert("x-amz-meta-owner", HeaderValue::from_static("tests"));

        let object = StorageObject::from_response_headers("hello.txt", &headers).unwrap();

        assert_eq!(object.key(), "hello.txt");
        assert_eq!(object.size().unwrap(), 42);
        assert_eq!(object.etag(), DIGEST);
        assert_eq!(object.range(), None);
        assert_eq!(object.uploaded().to_rfc3339(), "2022-09-19T12:00:00+00:00");
        assert_eq!(object.http_metadata().content_type.as_deref(), Some("text/plain"));
        assert_eq!(object.http_metadata().cache_control.as_deref(), Some("max-age=60"));
        assert_eq!(
            object.http_metadata().cache_expiry.unwrap().to_rfc3339(),
            "2022-09-21T12:00:00+00:00"
        );
        assert_eq!(object.http_metadata().content_encoding, None);
        assert_eq!(object.custom_metadata()["owner"], "tests");
    }

    #[test]
    fn test_from_response_headers_with_content_range() {
        let mut headers = response_headers();
        headers.insert("content-range", HeaderValue::from_static("bytes 0-99/1000"));
        headers.insert("content-length", HeaderValue::from_static("100"));

        let object = StorageObject::from_response_headers("hello.txt", &headers).unwrap();

        // The total reported by content-range wins over content-length.
        assert_eq!(object.size().unwrap(), 1000);
        assert_eq!(object.range(), Some(BytesRange::new(0, Some(100))));
    }

    #[test]
    fn test_from_response_headers_unknown_size() {
        let mut headers = response_headers();
        headers.insert("content-range", HeaderValue::from_static("bytes 0-99/*"));

        let object = StorageObject::from_response_headers("hello.txt", &headers).unwrap();
        assert_eq!(object.range(), Some(BytesRange::new(0, Some(100))));

        // Neither a known total nor content-length: size errs on access.
        let err = object.size().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn test_from_response_headers_accepts_lenient_etags() {
        for etag in [format!("W/\"{DIGEST}\""), format!("\"{DIGEST}-2\"")] {
            let mut headers = response_headers();
            headers.insert("etag", HeaderValue::from_str(&etag).unwrap());

            let object = StorageObject::from_response_headers("hello.txt", &headers).unwrap();
            assert_eq!(object.etag(), DIGEST, "{etag}");
            assert_eq!(object.http_etag(), etag);
        }
    }

    #[test]
    fn test_from_response_headers_missing_mandatory() {
        let mut headers = response_headers();
        headers.remove("etag");
        let err = StorageObject::from_response_headers("hello.txt", &headers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
        assert!(err.to_string().contains("etag"));

        let mut headers = response_headers();
        headers.remove("last-modified");
        let err = StorageObject::from_response_headers("hello.txt", &headers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
        assert!(err.to_string().contains("last-modified"));
    }

    #[test]
    fn test_write_http_metadata_unsupported() {
        let object = StorageObject::from_response_headers("hello.txt", &response_headers()).unwrap();
        let err = object.write_http_metadata(&mut HeaderMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn test_body_reads_consume_once() {
        let object = StorageObject::from_response_headers("hello.txt", &response_headers()).unwrap();
        let mut body = StorageObjectBody::new(object, ResponseBody::from_bytes("hello, world"));

        assert!(!body.body_used());
        assert_eq!(body.text().await.unwrap(), "hello, world");
        assert!(body.body_used());

        let err = body.bytes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(body.stream().is_err());
    }

    #[tokio::test]
    async fn test_body_json() {
        let object = StorageObject::from_response_headers("data.json", &response_headers()).unwrap();
        let mut body =
            StorageObjectBody::new(object, ResponseBody::from_bytes(r#"{"hello":"world"}"#));

        let v: serde_json::Value = body.json().await.unwrap();
        assert_eq!(v["hello"], "world");

        let object = StorageObject::from_response_headers("data.json", &response_headers()).unwrap();
        let mut body = StorageObjectBody::new(object, ResponseBody::from_bytes("not json"));
        let err = body.json::<serde_json::Value>().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }
}
