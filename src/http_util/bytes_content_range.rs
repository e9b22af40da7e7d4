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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::http_util::BytesRange;
use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// The parsed form of a `content-range` response header:
/// `bytes <start>-<end>/<size>`, where the total size may be reported
/// unknown as `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BytesContentRange {
    start: u64,
    end: u64,
    size: Option<u64>,
}

impl BytesContentRange {
    /// Create a new `BytesContentRange` for the inclusive byte positions
    /// `start..=end` with an unknown total size.
    pub fn new(start: u64, end: u64) -> Self {
        BytesContentRange {
            start,
            end,
            size: None,
        }
    }

    /// Attach the total object size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Offset of the first byte covered by this range.
    pub fn offset(&self) -> u64 {
        self.start
    }

    /// Count of bytes covered by this range. Both bounds are inclusive,
    /// so this is never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Total size of the object, `None` when the provider reported `*`.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// The covered span as a request-style [`BytesRange`].
    pub fn range(&self) -> BytesRange {
        BytesRange::new(self.start, Some(self.len()))
    }

    /// Render self as a `content-range` header value.
    pub fn to_header(&self) -> String {
        format!("bytes {self}")
    }
}

impl Display for BytesContentRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}-{}/{}", self.start, self.end, size),
            None => write!(f, "{}-{}/*", self.start, self.end),
        }
    }
}

impl FromStr for BytesContentRange {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || {
            Error::new(
                ErrorKind::ResponseInvalid,
                "content-range is not in the form `bytes <start>-<end>/<size>`",
            )
            .with_context("content-range", value)
        };

        let body = value.strip_prefix("bytes ").ok_or_else(invalid)?;
        let (range, size) = body.split_once('/').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;

        let start: u64 = start.parse().map_err(|_| invalid())?;
        let end: u64 = end.parse().map_err(|_| invalid())?;
        if start > end {
            return Err(invalid());
        }

        let size = match size {
            "*" => None,
            v => Some(v.parse::<u64>().map_err(|_| invalid())?),
        };

        let v = BytesContentRange::new(start, end);
        Ok(match size {
            Some(size) => v.with_size(size),
            None => v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_content_range_from_str() -> Result<()> {
        let cases = vec![
            (
                "with size",
                "bytes 0-99/1000",
                BytesContentRange::new(0, 99).with_size(1000),
            ),
            (
                "full object",
                "bytes 0-1023/1024",
                BytesContentRange::new(0, 1023).with_size(1024),
            ),
            (
                "unknown size",
                "bytes 100-200/*",
                BytesContentRange::new(100, 200),
            ),
        ];

        for (name, input, expected) in cases {
            let actual: BytesContentRange = input.parse()?;
            assert_eq!(actual, expected, "{name}");
        }

        Ok(())
    }

    #[test]
    fn test_bytes_content_range_from_str_invalid() {
        let cases = vec![
            ("missing unit", "0-99/1000"),
            ("wrong unit", "byte 0-99/1000"),
            ("missing size", "bytes 0-99"),
            ("unsatisfied form", "bytes */1000"),
            ("reversed bounds", "bytes 99-0/1000"),
            ("not numbers", "bytes a-b/c"),
        ];

        for (name, input) in cases {
            let err = input.parse::<BytesContentRange>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ResponseInvalid, "{name}");
        }
    }

    #[test]
    fn test_bytes_content_range_round_trip() -> Result<()> {
        let cases = vec![
            BytesContentRange::new(0, 99).with_size(1000),
            BytesContentRange::new(10, 10).with_size(11),
            BytesContentRange::new(100, 200),
        ];

        for expected in cases {
            let actual: BytesContentRange = expected.to_header().parse()?;
            assert_eq!(actual, expected);
        }

        Ok(())
    }

    #[test]
    fn test_bytes_content_range_accessors() {
        let v: BytesContentRange = "bytes 0-99/1000".parse().unwrap();
        assert_eq!(v.offset(), 0);
        assert_eq!(v.len(), 100);
        assert_eq!(v.size(), Some(1000));
        assert_eq!(v.range(), BytesRange::new(0, Some(100)));

        let v: BytesContentRange = "bytes 100-200/*".parse().unwrap();
        assert_eq!(v.size(), None);
        assert_eq!(v.len(), 101);
    }
}
