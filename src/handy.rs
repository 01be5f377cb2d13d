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

//! One-shot lookups: parse a document and extract a single field.
//!
//! Convenient when a document is queried exactly once; every call pays a
//! full parse, so repeated lookups should parse once with [`crate::parse`]
//! and navigate the returned value instead.

use crate::parser::parse_bytes;

/// Returns the string value at the given keys path in `data`, `None` on a
/// parse error, a missing path or a type mismatch.
pub fn get_string(data: &[u8], keys: &[&str]) -> Option<String> {
    let value = parse_bytes(data).ok()?;
    value.get_str(keys).map(ToOwned::to_owned)
}

/// Returns a copy of the decoded string bytes at the given keys path.
pub fn get_bytes(data: &[u8], keys: &[&str]) -> Option<Vec<u8>> {
    let value = parse_bytes(data).ok()?;
    value.get_str_bytes(keys).map(ToOwned::to_owned)
}

/// Returns the integer value at the given keys path.
pub fn get_i64(data: &[u8], keys: &[&str]) -> Option<i64> {
    let value = parse_bytes(data).ok()?;
    value.get_i64(keys)
}

/// Returns the float value at the given keys path.
pub fn get_f64(data: &[u8], keys: &[&str]) -> Option<f64> {
    let value = parse_bytes(data).ok()?;
    value.get_f64(keys)
}

/// Returns the bool value at the given keys path.
pub fn get_bool(data: &[u8], keys: &[&str]) -> Option<bool> {
    let value = parse_bytes(data).ok()?;
    value.get_bool(keys)
}

/// Returns true if `data` parses and the given keys path exists in it.
pub fn exists(data: &[u8], keys: &[&str]) -> bool {
    match parse_bytes(data) {
        Ok(value) => value.exists(keys),
        Err(_) => false,
    }
}
