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

use std::borrow::Cow;
use std::cell::Cell;
use std::cell::OnceCell;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use ordered_float::OrderedFloat;

use crate::constants::*;
use crate::error::Error;
use crate::error::Result;
use crate::number;
use crate::util::unescape_best_effort;

/// The type of a JSON value, as reported by [`Value::type_of`].
///
/// `true` and `false` are distinct tags, matching the JSON grammar where they
/// are separate literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Null,
    True,
    False,
    Number,
    String,
    Array,
    Object,
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Null => TYPE_NULL,
            Type::True => TYPE_TRUE,
            Type::False => TYPE_FALSE,
            Type::Number => TYPE_NUMBER,
            Type::String => TYPE_STRING,
            Type::Array => TYPE_ARRAY,
            Type::Object => TYPE_OBJECT,
        };
        write!(f, "{name}")
    }
}

/// A JSON string held as the escaped lexeme from the input until its decoded
/// form is first needed.
///
/// Decoding is best-effort and cached; strings without escapes borrow the
/// input buffer and never allocate.
#[derive(Clone, Default)]
pub struct LazyStr<'a> {
    raw: &'a [u8],
    decoded: OnceCell<Cow<'a, [u8]>>,
}

impl<'a> LazyStr<'a> {
    pub(crate) fn from_raw(raw: &'a [u8]) -> Self {
        Self {
            raw,
            decoded: OnceCell::new(),
        }
    }

    pub(crate) fn from_decoded(decoded: Cow<'a, [u8]>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(decoded);
        Self {
            raw: b"",
            decoded: cell,
        }
    }

    /// The decoded bytes, unescaping the lexeme on first call.
    pub fn as_bytes(&self) -> &[u8] {
        self.decoded.get_or_init(|| unescape_best_effort(self.raw))
    }

    /// The decoded bytes as `&str`, or `None` if they are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    // The escaped lexeme while not decoded, the decoded bytes afterwards.
    // Used by the object-key fast path so a comparison never forces a decode.
    pub(crate) fn current_bytes(&self) -> &[u8] {
        match self.decoded.get() {
            Some(decoded) => decoded,
            None => self.raw,
        }
    }

    pub(crate) fn decoded(&self) -> Option<&Cow<'a, [u8]>> {
        self.decoded.get()
    }

    pub(crate) fn raw(&self) -> &'a [u8] {
        self.raw
    }
}

impl Debug for LazyStr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LazyStr")
            .field(&String::from_utf8_lossy(self.current_bytes()))
            .finish()
    }
}

impl PartialEq for LazyStr<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for LazyStr<'_> {}

/// A JSON number held as its lexeme, with the float value decoded and cached
/// on first typed access.
///
/// Integer accessors always decode the lexeme rather than the cached float,
/// so the full `u64`/`i64` ranges survive.
#[derive(Clone)]
pub struct LazyNumber<'a> {
    raw: Cow<'a, [u8]>,
    parsed: OnceCell<f64>,
}

impl<'a> LazyNumber<'a> {
    pub(crate) fn from_raw(raw: &'a [u8]) -> Self {
        Self {
            raw: Cow::Borrowed(raw),
            parsed: OnceCell::new(),
        }
    }

    pub(crate) fn from_i64(v: i64) -> Self {
        let mut buf = itoa::Buffer::new();
        Self {
            raw: Cow::Owned(buf.format(v).as_bytes().to_vec()),
            parsed: OnceCell::new(),
        }
    }

    pub(crate) fn from_u64(v: u64) -> Self {
        let mut buf = itoa::Buffer::new();
        Self {
            raw: Cow::Owned(buf.format(v).as_bytes().to_vec()),
            parsed: OnceCell::new(),
        }
    }

    pub(crate) fn from_f64(v: f64) -> Self {
        let mut lexeme = Vec::new();
        crate::ser::format_f64(&mut lexeme, v);
        let cell = OnceCell::new();
        let _ = cell.set(v);
        Self {
            raw: Cow::Owned(lexeme),
            parsed: cell,
        }
    }

    /// The original number lexeme.
    pub fn lexeme(&self) -> &[u8] {
        &self.raw
    }

    /// The float value, decoded best-effort from the lexeme on first call.
    pub fn as_f64(&self) -> f64 {
        *self
            .parsed
            .get_or_init(|| number::parse_f64_best_effort(&self.raw))
    }

    pub(crate) fn parsed(&self) -> Option<f64> {
        self.parsed.get().copied()
    }
}

impl Debug for LazyNumber<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LazyNumber")
            .field(&String::from_utf8_lossy(&self.raw))
            .finish()
    }
}

impl PartialEq for LazyNumber<'_> {
    fn eq(&self, other: &Self) -> bool {
        // Compare integer lexemes at full width, everything else as floats
        // with a total order so equality stays reflexive for NaN.
        if let (Ok(a), Ok(b)) = (number::parse_u64(&self.raw), number::parse_u64(&other.raw)) {
            return a == b;
        }
        if let (Ok(a), Ok(b)) = (number::parse_i64(&self.raw), number::parse_i64(&other.raw)) {
            return a == b;
        }
        OrderedFloat(self.as_f64()) == OrderedFloat(other.as_f64())
    }
}

impl Eq for LazyNumber<'_> {}

/// Represents any JSON value.
///
/// String and number leaves are lazy: they keep pointing into the parsed
/// input until a typed accessor first touches them. Serialization of an
/// untouched leaf reproduces the original lexeme byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value<'a> {
    #[default]
    Null,
    Bool(bool),
    Number(LazyNumber<'a>),
    String(LazyStr<'a>),
    Array(Vec<Value<'a>>),
    Object(Object<'a>),
}

impl<'a> Value<'a> {
    /// Returns the type of the value.
    ///
    /// Calling this decodes a still-raw string or number leaf, so subsequent
    /// serialization uses the decoded form.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(true) => Type::True,
            Value::Bool(false) => Type::False,
            Value::Number(n) => {
                n.as_f64();
                Type::Number
            }
            Value::String(s) => {
                s.as_bytes();
                Type::String
            }
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    // The type tag without the decode side effect, for error reporting.
    pub(crate) fn type_tag(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(true) => Type::True,
            Value::Bool(false) => Type::False,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_array() && !self.is_object()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The float value of a number leaf, decoded best-effort on first access.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// The integer value of a number leaf whose lexeme is a plain `i64`.
    ///
    /// `None` for fractional or exponent lexemes and on overflow.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => number::parse_i64(n.lexeme()).ok(),
            _ => None,
        }
    }

    /// The integer value of a number leaf whose lexeme is a plain `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => number::parse_u64(n.lexeme()).ok(),
            _ => None,
        }
    }

    /// The decoded bytes of a string leaf.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// The decoded value of a string leaf, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object<'a>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value<'a>>> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the value at the given keys path.
    ///
    /// Each key addresses an object entry; on arrays a key is read as a
    /// decimal index. `None` for a non-existing path or a type mismatch
    /// along the way.
    pub fn get(&self, keys: &[&str]) -> Option<&Value<'a>> {
        let mut v = self;
        for key in keys {
            match v {
                Value::Object(obj) => v = obj.get(key)?,
                Value::Array(values) => {
                    let n = key.parse::<usize>().ok()?;
                    v = values.get(n)?;
                }
                _ => return None,
            }
        }
        Some(v)
    }

    /// Mutable counterpart of [`Value::get`], for updating a subtree in
    /// place.
    pub fn get_mut(&mut self, keys: &[&str]) -> Option<&mut Value<'a>> {
        let mut v = self;
        for key in keys {
            match v {
                Value::Object(obj) => v = obj.get_mut(key)?,
                Value::Array(values) => {
                    let n = key.parse::<usize>().ok()?;
                    v = values.get_mut(n)?;
                }
                _ => return None,
            }
        }
        Some(v)
    }

    /// Returns true if the given keys path exists.
    pub fn exists(&self, keys: &[&str]) -> bool {
        self.get(keys).is_some()
    }

    /// Returns the bool value at the given keys path.
    pub fn get_bool(&self, keys: &[&str]) -> Option<bool> {
        self.get(keys)?.as_bool()
    }

    /// Returns the float value at the given keys path.
    pub fn get_f64(&self, keys: &[&str]) -> Option<f64> {
        self.get(keys)?.as_f64()
    }

    /// Returns the integer value at the given keys path.
    pub fn get_i64(&self, keys: &[&str]) -> Option<i64> {
        self.get(keys)?.as_i64()
    }

    /// Returns the unsigned integer value at the given keys path.
    pub fn get_u64(&self, keys: &[&str]) -> Option<u64> {
        self.get(keys)?.as_u64()
    }

    /// Returns the decoded string bytes at the given keys path.
    pub fn get_str_bytes(&self, keys: &[&str]) -> Option<&[u8]> {
        self.get(keys)?.as_bytes()
    }

    /// Returns the decoded string at the given keys path.
    pub fn get_str(&self, keys: &[&str]) -> Option<&str> {
        self.get(keys)?.as_str()
    }

    /// Returns the object at the given keys path.
    pub fn get_object(&self, keys: &[&str]) -> Option<&Object<'a>> {
        self.get(keys)?.as_object()
    }

    /// Returns the array at the given keys path.
    pub fn get_array(&self, keys: &[&str]) -> Option<&[Value<'a>]> {
        self.get(keys)?.as_array()
    }

    /// The underlying bool, or a type mismatch error.
    ///
    /// Use [`Value::as_bool`] if you don't need error handling.
    pub fn try_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| self.mismatch("bool"))
    }

    /// The underlying float, or a type mismatch error.
    pub fn try_f64(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| self.mismatch(TYPE_NUMBER))
    }

    /// The underlying integer, failing on a non-number value or on a lexeme
    /// outside the `i64` grammar.
    pub fn try_i64(&self) -> Result<i64> {
        match self {
            Value::Number(n) => number::parse_i64(n.lexeme()),
            _ => Err(self.mismatch(TYPE_NUMBER)),
        }
    }

    /// The underlying unsigned integer, failing on a non-number value or on
    /// a lexeme outside the `u64` grammar.
    pub fn try_u64(&self) -> Result<u64> {
        match self {
            Value::Number(n) => number::parse_u64(n.lexeme()),
            _ => Err(self.mismatch(TYPE_NUMBER)),
        }
    }

    /// The decoded string bytes, or a type mismatch error.
    pub fn try_str_bytes(&self) -> Result<&[u8]> {
        self.as_bytes().ok_or_else(|| self.mismatch(TYPE_STRING))
    }

    /// The decoded string, failing on a non-string value or non-UTF-8 data.
    pub fn try_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch(TYPE_STRING))
    }

    /// The underlying object, or a type mismatch error.
    pub fn try_object(&self) -> Result<&Object<'a>> {
        self.as_object().ok_or_else(|| self.mismatch(TYPE_OBJECT))
    }

    /// The underlying array, or a type mismatch error.
    pub fn try_array(&self) -> Result<&[Value<'a>]> {
        self.as_array().ok_or_else(|| self.mismatch(TYPE_ARRAY))
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            actual: self.type_tag(),
        }
    }
}

/// Represents a JSON object.
///
/// Entries keep their input order and keys may repeat; lookups return the
/// first match. Keys stay escaped until a lookup or visit first needs their
/// decoded form.
#[derive(Debug, Clone, Default)]
pub struct Object<'a> {
    kvs: Vec<(LazyStr<'a>, Value<'a>)>,
    keys_unescaped: Cell<bool>,
}

impl PartialEq for Object<'_> {
    fn eq(&self, other: &Self) -> bool {
        // The key decode state is not part of the object's identity.
        self.kvs == other.kvs
    }
}

impl Eq for Object<'_> {}

impl<'a> Object<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.kvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kvs.is_empty()
    }

    pub(crate) fn push(&mut self, key: LazyStr<'a>, value: Value<'a>) {
        self.kvs.push((key, value));
    }

    pub(crate) fn kvs(&self) -> &[(LazyStr<'a>, Value<'a>)] {
        &self.kvs
    }

    pub(crate) fn kvs_mut(&mut self) -> &mut Vec<(LazyStr<'a>, Value<'a>)> {
        &mut self.kvs
    }

    fn unescape_keys(&self) {
        if self.keys_unescaped.get() {
            return;
        }
        for (k, _) in &self.kvs {
            k.as_bytes();
        }
        self.keys_unescaped.set(true);
    }

    pub(crate) fn mark_keys_unescaped(&self) {
        self.unescape_keys();
    }

    /// Returns the value for the given key, `None` when absent.
    ///
    /// With duplicate keys the first entry in input order wins.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        if !self.keys_unescaped.get() && !key.as_bytes().contains(&b'\\') {
            // Fast path - compare against the still-escaped keys.
            for (k, v) in &self.kvs {
                if k.current_bytes() == key.as_bytes() {
                    return Some(v);
                }
            }
        }

        // Slow path - unescape the object keys.
        self.unescape_keys();

        for (k, v) in &self.kvs {
            if k.as_bytes() == key.as_bytes() {
                return Some(v);
            }
        }
        None
    }

    /// Mutable counterpart of [`Object::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        self.unescape_keys();
        self.kvs
            .iter_mut()
            .find(|(k, _)| k.as_bytes() == key.as_bytes())
            .map(|(_, v)| v)
    }

    /// Calls `f` for each entry, in input order.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &Value<'a>),
    {
        self.unescape_keys();
        for (k, v) in &self.kvs {
            f(k.as_bytes(), v);
        }
    }

    /// Iterates over `(decoded key, value)` entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value<'a>)> {
        self.unescape_keys();
        self.kvs.iter().map(|(k, v)| (k.as_bytes(), v))
    }
}
