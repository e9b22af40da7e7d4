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

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Parse datetime from rfc2822, the format of `last-modified`.
///
/// For example: `Fri, 28 Nov 2014 21:00:09 +0900`
pub fn parse_datetime_from_rfc2822(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .map(|v| v.into())
        .map_err(|e| {
            Error::new(ErrorKind::ResponseInvalid, "parse datetime from rfc2822 failed")
                .with_context("value", s)
                .set_source(e)
        })
}

/// Parse datetime from rfc3339, the format list results carry.
///
/// For example: `2014-11-28T21:00:09+09:00` or `2014-11-28T21:00:09Z`
pub fn parse_datetime_from_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|v| v.into())
        .map_err(|e| {
            Error::new(ErrorKind::ResponseInvalid, "parse datetime from rfc3339 failed")
                .with_context("value", s)
                .set_source(e)
        })
}

/// Parse datetime from either rfc2822 or rfc3339.
///
/// The `cache-expiry` header shows up in both renderings depending on how
/// the expiry was written.
pub fn parse_datetime_from_rfc2822_or_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|v| v.into())
        .map_err(|e| {
            Error::new(
                ErrorKind::ResponseInvalid,
                "parse datetime from rfc2822 or rfc3339 failed",
            )
            .with_context("value", s)
            .set_source(e)
        })
}

/// Format datetime into ISO-8601 with milliseconds and a `Z` offset,
/// e.g. `2022-09-19T12:34:56.789Z`.
pub fn format_datetime_into_iso8601(v: DateTime<Utc>) -> String {
    v.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_from_rfc2822() {
        let v = parse_datetime_from_rfc2822("Sat, 29 Oct 1994 19:43:31 +0000").unwrap();
        assert_eq!(format_datetime_into_iso8601(v), "1994-10-29T19:43:31.000Z");

        assert!(parse_datetime_from_rfc2822("not-a-date").is_err());
    }

    #[test]
    fn test_parse_datetime_from_rfc3339() {
        let v = parse_datetime_from_rfc3339("2014-11-28T21:00:09+09:00").unwrap();
        assert_eq!(format_datetime_into_iso8601(v), "2014-11-28T12:00:09.000Z");

        let err = parse_datetime_from_rfc3339("Sat, 29 Oct 1994 19:43:31 +0000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }

    #[test]
    fn test_parse_datetime_from_rfc2822_or_rfc3339() {
        let cases = vec![
            ("rfc2822", "Sat, 29 Oct 1994 19:43:31 +0000"),
            ("rfc3339", "1994-10-29T19:43:31Z"),
        ];
        for (name, input) in cases {
            let v = parse_datetime_from_rfc2822_or_rfc3339(input).unwrap();
            assert_eq!(
                format_datetime_into_iso8601(v),
                "1994-10-29T19:43:31.000Z",
                "{name}"
            );
        }

        let err = parse_datetime_from_rfc2822_or_rfc3339("in three days").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }

    #[test]
    fn test_format_datetime_into_iso8601() {
        let v = parse_datetime_from_rfc3339("2022-09-19T12:34:56.789Z").unwrap();
        assert_eq!(format_datetime_into_iso8601(v), "2022-09-19T12:34:56.789Z");
    }
}
