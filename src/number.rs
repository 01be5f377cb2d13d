// Copyright 2024 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decoding of JSON number lexemes.
//!
//! Every function takes the full lexeme as a byte slice and comes in two
//! flavors: a strict one that fails with [`Error::NumberFormat`] on any input
//! outside its grammar, and a best-effort one that never fails and returns
//! zero instead. The float grammar is deliberately wider than RFC 7159 (it is
//! the one the permissive parser feeds): optional `+`/`-` sign, leading
//! zeros, a bare leading or trailing `.`, and the case-insensitive literals
//! `inf`, `infinity` and `nan`.

use crate::error::Error;
use crate::error::Result;

/// Decodes a float lexeme.
///
/// The integer fast path of large mantissas, exponent overflow to `±inf` and
/// underflow to `0` are handled by `fast_float2`, whose grammar matches the
/// permissive number dialect exactly.
pub fn parse_f64(s: &[u8]) -> Result<f64> {
    fast_float2::parse(s).map_err(|_| Error::NumberFormat)
}

/// Decodes a float lexeme, returning `0.0` for malformed input.
pub fn parse_f64_best_effort(s: &[u8]) -> f64 {
    fast_float2::parse(s).unwrap_or(0.0)
}

/// Decodes a signed integer lexeme: an optional `+` or `-` sign followed by
/// a digit run.
///
/// Fails on empty input, a bare sign, any non-digit suffix and on values
/// outside the `i64` range. `i64::MIN` is accepted.
pub fn parse_i64(s: &[u8]) -> Result<i64> {
    let (negative, digits) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let n = parse_digits(digits)?;
    if negative {
        if n > i64::MAX as u64 + 1 {
            return Err(Error::NumberFormat);
        }
        Ok((n as i64).wrapping_neg())
    } else {
        if n > i64::MAX as u64 {
            return Err(Error::NumberFormat);
        }
        Ok(n as i64)
    }
}

/// Decodes a signed integer lexeme, returning `0` for malformed input or
/// overflow.
pub fn parse_i64_best_effort(s: &[u8]) -> i64 {
    parse_i64(s).unwrap_or(0)
}

/// Decodes an unsigned integer lexeme: a digit run with an optional
/// leading `+`.
pub fn parse_u64(s: &[u8]) -> Result<u64> {
    let digits = match s.first() {
        Some(b'+') => &s[1..],
        _ => s,
    };
    parse_digits(digits)
}

/// Decodes an unsigned integer lexeme, returning `0` for malformed input or
/// overflow.
pub fn parse_u64_best_effort(s: &[u8]) -> u64 {
    parse_digits(s).unwrap_or(0)
}

fn parse_digits(s: &[u8]) -> Result<u64> {
    if s.is_empty() {
        return Err(Error::NumberFormat);
    }
    let mut n: u64 = 0;
    for &c in s {
        if !c.is_ascii_digit() {
            return Err(Error::NumberFormat);
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add((c - b'0') as u64))
            .ok_or(Error::NumberFormat)?;
    }
    Ok(n)
}
