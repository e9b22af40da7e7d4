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

use bytes::Buf;
use http::StatusCode;
use quick_xml::de;
use serde::Deserialize;

use crate::Error;
use crate::ErrorKind;

/// RestError is the XML error document returned by the provider.
#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct RestError {
    /// Provider error code, like `NoSuchKey`.
    pub code: String,
    /// Human readable description of the failure.
    pub message: String,
    /// Resource the failure is about.
    pub resource: String,
    /// Id of the failed request.
    pub request_id: String,
}

/// Parse an unexpected provider response into an [`Error`].
///
/// Collaborators should call this for any status they do not handle
/// themselves; the returned error carries the decoded error document as
/// message when the body holds one, and the raw body otherwise.
pub fn parse_error(status: StatusCode, body: &[u8]) -> Error {
    let (kind, retryable) = match status.as_u16() {
        403 => (ErrorKind::PermissionDenied, false),
        404 => (ErrorKind::NotFound, false),
        304 | 412 => (ErrorKind::ConditionNotMatch, false),
        409 => (ErrorKind::AlreadyExists, false),
        429 | 503 => (ErrorKind::RateLimited, true),
        // R2 is known to return 499 with "Client Disconnect" under load,
        // worth another attempt.
        499 => (ErrorKind::Unexpected, true),
        500 | 502 | 504 => (ErrorKind::Unexpected, true),
        _ => (ErrorKind::Unexpected, false),
    };

    let message = de::from_reader::<_, RestError>(body.reader())
        .map(|rest_err| format!("{rest_err:?}"))
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());

    let mut err = Error::new(kind, message).with_context("status", status.as_str());

    if retryable {
        err = err.set_temporary();
    }

    err
}
