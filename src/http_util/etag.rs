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

//! ETag handling for the wire shapes this protocol emits:
//!
//! - `"<32-hex>"`: a plain object etag
//! - `W/"<32-hex>"`: a weak etag
//! - `"<32-hex>-<suffix>"`: a multipart object etag

use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Quote a bare etag for use in conditional headers.
///
/// The provider only honors `if-match`/`if-none-match` values in the quoted
/// wire form. A bare lowercase-hex token gains quotes; anything else
/// (already quoted, weak, suffixed, `*`) passes through unchanged, which
/// makes this idempotent.
pub fn clean_etag(etag: &str) -> String {
    if !etag.is_empty() && etag.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        format!("\"{etag}\"")
    } else {
        etag.to_string()
    }
}

/// Extract the digest from a strictly quoted etag: `"<32-hex>"`.
///
/// This is the only shape list results carry; everything else is a
/// malformed response.
pub fn parse_quoted_etag(http_etag: &str) -> Result<&str> {
    let digest = http_etag
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| invalid_etag(http_etag))?;

    if !is_md5_digest(digest) {
        return Err(invalid_etag(http_etag));
    }

    Ok(digest)
}

/// Extract the digest from an etag header value.
///
/// Accepts the weak prefix `W/` and a multipart suffix like `-2`; the
/// returned digest is always the bare 32-hex core.
pub fn parse_header_etag(http_etag: &str) -> Result<&str> {
    let v = http_etag.strip_prefix("W/").unwrap_or(http_etag);
    let v = v
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| invalid_etag(http_etag))?;

    let (digest, suffix) = match v.split_once('-') {
        Some((digest, suffix)) => (digest, Some(suffix)),
        None => (v, None),
    };

    if !is_md5_digest(digest) {
        return Err(invalid_etag(http_etag));
    }
    if let Some(suffix) = suffix {
        let valid = !suffix.is_empty()
            && suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
        if !valid {
            return Err(invalid_etag(http_etag));
        }
    }

    Ok(digest)
}

fn is_md5_digest(s: &str) -> bool {
    s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn invalid_etag(value: &str) -> Error {
    Error::new(ErrorKind::ResponseInvalid, "etag is not in a known form")
        .with_context("etag", value)
}
