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

/// BytesRange(offset, length) carries a range of content in one of the two
/// mutually exclusive forms the protocol accepts.
///
/// Takes the following forms:
///
/// - `Offset { offset, length: None }`: `bytes=<offset>-`, from offset to
///   the end of the object
/// - `Offset { offset, length: Some(n) }`: `bytes=<offset>-<offset+n-1>`,
///   n bytes starting at offset
/// - `Suffix { suffix }`: `bytes=-<suffix>`, the last `suffix` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesRange {
    /// Read starting at `offset`, optionally limited to `length` bytes.
    Offset {
        /// Offset of the first byte, zero based.
        offset: u64,
        /// Count of bytes to read; the rest of the object when `None`.
        length: Option<u64>,
    },
    /// Read the trailing `suffix` bytes of the object.
    Suffix {
        /// Count of trailing bytes.
        suffix: u64,
    },
}

impl BytesRange {
    /// Create a new `BytesRange` in the offset form.
    pub fn new(offset: u64, length: Option<u64>) -> Self {
        BytesRange::Offset { offset, length }
    }

    /// Create a new `BytesRange` reading the last `suffix` bytes.
    pub fn suffix(suffix: u64) -> Self {
        BytesRange::Suffix { suffix }
    }

    /// Render self as a `range` header value.
    pub fn to_header(&self) -> String {
        format!("bytes={self}")
    }
}

impl Display for BytesRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            BytesRange::Offset {
                offset,
                length: None,
            } => write!(f, "{offset}-"),
            BytesRange::Offset {
                offset,
                length: Some(length),
            } => write!(f, "{}-{}", offset, offset + length - 1),
            BytesRange::Suffix { suffix } => write!(f, "-{suffix}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_range_to_header() {
        let cases = vec![
            ("offset and length", BytesRange::new(10, Some(5)), "bytes=10-14"),
            ("offset only", BytesRange::new(10, None), "bytes=10-"),
            ("zero offset", BytesRange::new(0, Some(1024)), "bytes=0-1023"),
            ("single byte", BytesRange::new(1024, Some(1)), "bytes=1024-1024"),
            ("suffix", BytesRange::suffix(100), "bytes=-100"),
        ];

        for (name, range, expected) in cases {
            assert_eq!(range.to_header(), expected, "{name}");
        }
    }

    #[test]
    fn test_bytes_range_display() {
        assert_eq!(BytesRange::new(1, Some(10)).to_string(), "1-10");
        assert_eq!(BytesRange::suffix(10).to_string(), "-10");
    }
}
