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

use std::fmt;
use std::fmt::Debug;

use bytes::Bytes;
use bytes::BytesMut;
use futures::stream;
use futures::stream::BoxStream;
use futures::Stream;
use futures::StreamExt;
use futures::TryStreamExt;

use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Body of an outgoing write: `put` values and multipart parts.
///
/// The protocol needs a content length up front, so stream bodies are
/// buffered in full before transfer.
pub enum RequestBody {
    /// An empty body.
    Empty,
    /// Body with bytes already in memory.
    Bytes(Bytes),
    /// Body streamed from somewhere else; buffered before transfer.
    Stream(BoxStream<'static, Result<Bytes>>),
}

impl RequestBody {
    /// Create a streaming body.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        RequestBody::Stream(stream.boxed())
    }

    /// Consume self into flat bytes, draining a stream body in full.
    pub(crate) async fn into_bytes(self) -> Result<Bytes> {
        match self {
            RequestBody::Empty => Ok(Bytes::new()),
            RequestBody::Bytes(bs) => Ok(bs),
            RequestBody::Stream(s) => collect(s).await,
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        RequestBody::Empty
    }
}

impl Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "RequestBody::Empty"),
            RequestBody::Bytes(bs) => write!(f, "RequestBody::Bytes({})", bs.len()),
            RequestBody::Stream(_) => write!(f, "RequestBody::Stream"),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bs: Bytes) -> Self {
        RequestBody::Bytes(bs)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bs: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bs))
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Bytes(Bytes::from(s))
    }
}

impl From<&'static str> for RequestBody {
    fn from(s: &'static str) -> Self {
        RequestBody::Bytes(Bytes::from_static(s.as_bytes()))
    }
}

impl From<&'static [u8]> for RequestBody {
    fn from(bs: &'static [u8]) -> Self {
        RequestBody::Bytes(Bytes::from_static(bs))
    }
}

/// Body of an incoming response.
///
/// The underlying stream can be consumed exactly once: any of the read
/// paths takes it out, and later reads fail.
pub struct ResponseBody {
    inner: Option<BoxStream<'static, Result<Bytes>>>,
}

impl ResponseBody {
    /// Create a body over the given stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        ResponseBody {
            inner: Some(stream.boxed()),
        }
    }

    /// Create a body holding the given bytes as a single chunk.
    pub fn from_bytes(bs: impl Into<Bytes>) -> Self {
        Self::new(stream::iter([Ok(bs.into())]))
    }

    /// Create an empty, not-yet-consumed body.
    pub fn empty() -> Self {
        Self::new(stream::empty())
    }

    /// Whether the body has already been consumed.
    pub fn is_consumed(&self) -> bool {
        self.inner.is_none()
    }

    /// Take the underlying stream out, marking the body consumed.
    pub fn take_stream(&mut self) -> Result<BoxStream<'static, Result<Bytes>>> {
        self.inner.take().ok_or_else(|| {
            Error::new(
                ErrorKind::Unexpected,
                "response body has already been consumed",
            )
        })
    }

    /// Drain the body into flat bytes, marking it consumed.
    pub async fn to_bytes(&mut self) -> Result<Bytes> {
        collect(self.take_stream()?).await
    }
}

impl Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

async fn collect(mut stream: BoxStream<'static, Result<Bytes>>) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.try_next().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_body_into_bytes() {
        let bs = RequestBody::from("hello").into_bytes().await.unwrap();
        assert_eq!(bs, Bytes::from("hello"));

        let bs = RequestBody::Empty.into_bytes().await.unwrap();
        assert!(bs.is_empty());

        let chunks = vec![Ok(Bytes::from("hello, ")), Ok(Bytes::from("world"))];
        let body = RequestBody::from_stream(stream::iter(chunks));
        let bs = body.into_bytes().await.unwrap();
        assert_eq!(bs, Bytes::from("hello, world"));
    }

    #[tokio::test]
    async fn test_request_body_stream_error() {
        let chunks = vec![
            Ok(Bytes::from("hello")),
            Err(Error::new(ErrorKind::Unexpected, "broken pipe")),
        ];
        let body = RequestBody::from_stream(stream::iter(chunks));
        assert!(body.into_bytes().await.is_err());
    }

    #[tokio::test]
    async fn test_response_body_consumed_once() {
        let mut body = ResponseBody::from_bytes("hello");
        assert!(!body.is_consumed());

        let bs = body.to_bytes().await.unwrap();
        assert_eq!(bs, Bytes::from("hello"));
        assert!(body.is_consumed());

        let err = body.to_bytes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(body.take_stream().is_err());
    }

    #[tokio::test]
    async fn test_response_body_empty_reads_once() {
        let mut body = ResponseBody::empty();
        assert!(!body.is_consumed());
        assert!(body.to_bytes().await.unwrap().is_empty());
        assert!(body.to_bytes().await.is_err());
    }
}
