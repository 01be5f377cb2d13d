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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::ser::Serialize;
use serde::ser::SerializeMap;
use serde::ser::Serializer;

use crate::number;
use crate::util::escape_string;
use crate::value::LazyNumber;
use crate::value::LazyStr;
use crate::value::Object;
use crate::value::Value;

impl Value<'_> {
    /// Appends the JSON serialization of the value to `buf`.
    ///
    /// Leaves that were never type-accessed reproduce their original lexeme
    /// byte for byte. A promoted string is re-escaped with the minimal
    /// escape set; a promoted number re-derives from its lexeme, so integer
    /// lexemes stay exact at full 64-bit width and only non-integer ones go
    /// through the cached float. NaN and infinities have no JSON form and
    /// come out as `null`.
    pub fn write_to_vec(&self, buf: &mut Vec<u8>) {
        match self {
            Value::Null => buf.extend_from_slice(b"null"),
            Value::Bool(true) => buf.extend_from_slice(b"true"),
            Value::Bool(false) => buf.extend_from_slice(b"false"),
            Value::Number(n) => write_number(buf, n),
            Value::String(s) => write_string(buf, s),
            Value::Array(values) => {
                buf.push(b'[');
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        buf.push(b',');
                    }
                    value.write_to_vec(buf);
                }
                buf.push(b']');
            }
            Value::Object(obj) => obj.write_to_vec(buf),
        }
    }

    /// Returns the JSON serialization of the value.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }
}

impl Object<'_> {
    /// Appends the JSON serialization of the object to `buf`, entries in
    /// input order.
    pub fn write_to_vec(&self, buf: &mut Vec<u8>) {
        buf.push(b'{');
        for (i, (key, value)) in self.kvs().iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            write_string(buf, key);
            buf.push(b':');
            value.write_to_vec(buf);
        }
        buf.push(b'}');
    }
}

// A still-raw number is the original lexeme. A promoted one picks the same
// form the serde bridge picks: the lexeme decoded at full integer width
// when it is one, the cached float otherwise.
fn write_number(buf: &mut Vec<u8>, n: &LazyNumber<'_>) {
    let Some(f) = n.parsed() else {
        buf.extend_from_slice(n.lexeme());
        return;
    };
    if let Ok(v) = number::parse_u64(n.lexeme()) {
        let mut itoa_buf = itoa::Buffer::new();
        buf.extend_from_slice(itoa_buf.format(v).as_bytes());
    } else if let Ok(v) = number::parse_i64(n.lexeme()) {
        let mut itoa_buf = itoa::Buffer::new();
        buf.extend_from_slice(itoa_buf.format(v).as_bytes());
    } else {
        format_f64(buf, f);
    }
}

// A still-raw string is emitted as its escaped lexeme surrounded by quotes,
// without re-escaping; a decoded one is escaped from scratch.
fn write_string(buf: &mut Vec<u8>, s: &LazyStr<'_>) {
    match s.decoded() {
        None => {
            buf.push(b'"');
            buf.extend_from_slice(s.raw());
            buf.push(b'"');
        }
        Some(decoded) => escape_string(buf, decoded),
    }
}

/// Formats a float: `itoa` integer form when exactly representable, compact
/// `ryu` form otherwise, `null` for non-finite values.
pub(crate) fn format_f64(buf: &mut Vec<u8>, f: f64) {
    if !f.is_finite() {
        buf.extend_from_slice(b"null");
        return;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        let mut itoa_buf = itoa::Buffer::new();
        buf.extend_from_slice(itoa_buf.format(f as i64).as_bytes());
    } else {
        let mut ryu_buf = ryu::Buffer::new();
        buf.extend_from_slice(ryu_buf.format(f).as_bytes());
    }
}

/// The diagnostic string form: exactly the marshaled JSON text.
impl Display for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let buf = self.to_vec();
        write!(f, "{}", String::from_utf8_lossy(&buf))
    }
}

impl Display for Object<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        write!(f, "{}", String::from_utf8_lossy(&buf))
    }
}

/// Bridges a parsed tree into any serde sink. Numbers pick the narrowest
/// serde form their lexeme fits; non-UTF-8 string content degrades to bytes.
impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(n) => {
                if let Ok(v) = number::parse_u64(n.lexeme()) {
                    serializer.serialize_u64(v)
                } else if let Ok(v) = number::parse_i64(n.lexeme()) {
                    serializer.serialize_i64(v)
                } else {
                    serializer.serialize_f64(n.as_f64())
                }
            }
            Value::String(s) => match s.as_str() {
                Some(v) => serializer.serialize_str(v),
                None => serializer.serialize_bytes(s.as_bytes()),
            },
            Value::Array(values) => serializer.collect_seq(values),
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj.iter() {
                    map.serialize_entry(&String::from_utf8_lossy(key), value)?;
                }
                map.end()
            }
        }
    }
}
