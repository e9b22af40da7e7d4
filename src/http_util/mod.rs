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

//! http_util carries the wire-literal codecs of the protocol: byte
//! ranges, content ranges, etags, header parsing, and the body types
//! crossing the [`crate::api::SignedRestApi`] boundary.

mod body;
pub use body::RequestBody;
pub use body::ResponseBody;

mod bytes_range;
pub use bytes_range::BytesRange;

mod bytes_content_range;
pub use bytes_content_range::BytesContentRange;

mod datetime;
pub use datetime::format_datetime_into_iso8601;
pub use datetime::parse_datetime_from_rfc2822;
pub use datetime::parse_datetime_from_rfc2822_or_rfc3339;
pub use datetime::parse_datetime_from_rfc3339;

mod etag;
pub use etag::clean_etag;
pub use etag::parse_header_etag;
pub use etag::parse_quoted_etag;

mod header;
pub use header::parse_content_length;
pub use header::parse_content_range;
pub use header::parse_etag;
pub use header::parse_header_to_str;
pub use header::parse_last_modified;
pub use header::parse_prefixed_headers;
