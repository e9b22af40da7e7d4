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

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use http::header::CONTENT_LENGTH;
use http::header::CONTENT_RANGE;
use http::header::ETAG;
use http::header::LAST_MODIFIED;
use http::HeaderMap;
use http::HeaderName;

use crate::http_util::parse_datetime_from_rfc2822;
use crate::http_util::BytesContentRange;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Parse a header value into a string slice.
pub fn parse_header_to_str<K>(headers: &HeaderMap, name: K) -> Result<Option<&str>>
where
    HeaderName: TryFrom<K>,
{
    let name = HeaderName::try_from(name).map_err(|_| {
        Error::new(
            ErrorKind::ResponseInvalid,
            "header name must be valid http header name but not",
        )
        .with_operation("http_util::parse_header_to_str")
    })?;

    let value = match headers.get(&name) {
        Some(v) => v,
        None => return Ok(None),
    };

    Ok(Some(value.to_str().map_err(|e| {
        Error::new(ErrorKind::ResponseInvalid, "header value is not a valid string")
            .with_context("header", name.as_str())
            .set_source(e)
    })?))
}

/// Parse content length from the header map.
pub fn parse_content_length(headers: &HeaderMap) -> Result<Option<u64>> {
    match parse_header_to_str(headers, CONTENT_LENGTH)? {
        None => Ok(None),
        Some(v) => Ok(Some(v.parse::<u64>().map_err(|e| {
            Error::new(ErrorKind::ResponseInvalid, "content-length is not a valid number")
                .with_context("content-length", v)
                .set_source(e)
        })?)),
    }
}

/// Parse the raw etag literal from the header map.
pub fn parse_etag(headers: &HeaderMap) -> Result<Option<&str>> {
    parse_header_to_str(headers, ETAG)
}

/// Parse last modified from the header map.
pub fn parse_last_modified(headers: &HeaderMap) -> Result<Option<DateTime<Utc>>> {
    match parse_header_to_str(headers, LAST_MODIFIED)? {
        None => Ok(None),
        Some(v) => parse_datetime_from_rfc2822(v)
            .map(Some)
            .map_err(|err| err.with_context("header", LAST_MODIFIED.as_str())),
    }
}

/// Parse content range from the header map.
pub fn parse_content_range(headers: &HeaderMap) -> Result<Option<BytesContentRange>> {
    match parse_header_to_str(headers, CONTENT_RANGE)? {
        None => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

/// Collect all headers carrying the given name prefix, with the prefix
/// stripped from the returned keys. Values that are not valid strings are
/// skipped.
pub fn parse_prefixed_headers(headers: &HeaderMap, prefix: &str) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            name.as_str().strip_prefix(prefix).and_then(|stripped| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (stripped.to_string(), v.to_string()))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_parse_content_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_content_length(&headers).unwrap(), None);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        assert_eq!(parse_content_length(&headers).unwrap(), Some(1024));

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("abc"));
        let err = parse_content_length(&headers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }

    #[test]
    fn test_parse_last_modified() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_last_modified(&headers).unwrap(), None);

        headers.insert(
            LAST_MODIFIED,
            HeaderValue::from_static("Mon, 19 Sep 2022 12:00:00 GMT"),
        );
        let v = parse_last_modified(&headers).unwrap().unwrap();
        assert_eq!(v.to_rfc3339(), "2022-09-19T12:00:00+00:00");
    }

    #[test]
    fn test_parse_content_range() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_content_range(&headers).unwrap(), None);

        headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-99/1000"));
        let v = parse_content_range(&headers).unwrap().unwrap();
        assert_eq!(v.offset(), 0);
        assert_eq!(v.len(), 100);
        assert_eq!(v.size(), Some(1000));
    }

    #[test]
    fn test_parse_prefixed_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-meta-foo", HeaderValue::from_static("bar"));
        headers.insert("x-amz-meta-hello", HeaderValue::from_static("world"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let got = parse_prefixed_headers(&headers, "x-amz-meta-");
        assert_eq!(got.len(), 2);
        assert_eq!(got["foo"], "bar");
        assert_eq!(got["hello"], "world");

        assert!(parse_prefixed_headers(&headers, "x-nothing-").is_empty());
    }
}
