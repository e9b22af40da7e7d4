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

//! r2-bucket is a typed client for one Cloudflare R2 bucket, speaking the
//! S3-compatible REST protocol through a pluggable signed transport.
//!
//! Every [`Bucket`] operation is a single HTTP exchange against the
//! [`api::SignedRestApi`] collaborator: the crate renders caller intent
//! (conditionals, byte ranges, content metadata) into protocol headers
//! and adapts the provider's two answer shapes, listing records and
//! response header sets, into one [`StorageObject`] model. Multipart
//! uploads run as explicit [`MultipartUpload`] sessions.
//!
//! Transport, request signing, and retry policy all live behind the
//! collaborator trait; the crate itself keeps no cache and retries
//! nothing.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use r2_bucket::api::SignedRestApi;
//! use r2_bucket::Bucket;
//! use r2_bucket::Credentials;
//! use r2_bucket::GetOptions;
//! use r2_bucket::Result;
//!
//! async fn demo(transport: Arc<dyn SignedRestApi>, credentials: Credentials) -> Result<()> {
//!     let bucket = Bucket::of_account(
//!         transport,
//!         "4af9489e0016ba02f543d230b90b8596",
//!         credentials,
//!         "my-bucket",
//!         "my-tool/1.0",
//!     );
//!
//!     // Write data.
//!     bucket.put("hello.txt", "Hello, World!", Default::default()).await?;
//!
//!     // Read it back.
//!     if let Some(found) = bucket.get("hello.txt", GetOptions::default()).await? {
//!         if let Some(mut body) = found.into_body() {
//!             println!("{}", body.text().await?);
//!         }
//!     }
//!
//!     // Delete it.
//!     bucket.delete("hello.txt").await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unused_qualifications)]

// Private modules with public types, accessed via `r2_bucket::Xxxx`.
mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod credential;
pub use credential::account_origin;
pub use credential::Credentials;
pub use credential::Profile;
pub use credential::TokenInfo;
pub use credential::TokenVerifier;

mod options;
pub use options::Conditional;
pub use options::ConditionalHeaders;
pub use options::ContentHeaders;
pub use options::ContentMd5;
pub use options::DeleteKeys;
pub use options::GetOptions;
pub use options::HttpMetadata;
pub use options::HttpMetadataParam;
pub use options::ListInclude;
pub use options::ListOptions;
pub use options::MultipartOptions;
pub use options::OnlyIf;
pub use options::PutOptions;

mod object;
pub use object::Checksums;
pub use object::GetResult;
pub use object::Listing;
pub use object::StorageObject;
pub use object::StorageObjectBody;

mod bucket;
pub use bucket::Bucket;

mod multipart;
pub use multipart::MultipartUpload;
pub use multipart::UploadState;
pub use multipart::UploadedPart;

// Public modules, accessed via `r2_bucket::api::Xxxx`.
pub mod api;
pub mod http_util;
