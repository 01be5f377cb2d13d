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

use crate::error::Error;
use crate::parser::Parser;
use crate::value::Value;

/// Iterates over a concatenation of whitespace-separated JSON documents in a
/// single input.
///
/// ```
/// let mut sc = lazyjson::Scanner::new(r#"{"a":1}[2,3] true"#);
/// let mut docs = Vec::new();
/// while sc.next() {
///     docs.push(sc.value().unwrap().to_string());
/// }
/// assert!(sc.error().is_none());
/// assert_eq!(docs, [r#"{"a":1}"#, "[2,3]", "true"]);
/// ```
///
/// The first error is sticky: once [`Scanner::next`] has failed it keeps
/// returning `false` and [`Scanner::error`] reports the failure. Parsed
/// values borrow the input, not the scanner, so earlier values stay usable
/// while scanning continues.
#[derive(Debug, Default)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    idx: usize,
    value: Option<Value<'a>>,
    err: Option<Error>,
}

impl<'a> Scanner<'a> {
    pub fn new(s: &'a str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    pub fn from_bytes(buf: &'a [u8]) -> Self {
        Self {
            buf,
            idx: 0,
            value: None,
            err: None,
        }
    }

    /// Advances to the next document.
    ///
    /// Returns `true` if one was parsed, `false` at the end of the input or
    /// on the first (and every subsequent) error.
    pub fn next(&mut self) -> bool {
        if self.err.is_some() {
            return false;
        }

        let mut parser = Parser::new(self.buf);
        parser.idx = self.idx;
        parser.skip_ws();
        if parser.eof() {
            self.idx = parser.idx;
            self.value = None;
            return false;
        }

        match parser.parse_value(0) {
            Ok(value) => {
                self.idx = parser.idx;
                self.value = Some(value);
                true
            }
            Err(err) => {
                self.idx = parser.idx;
                self.value = None;
                self.err = Some(err);
                false
            }
        }
    }

    /// The most recently parsed document. `None` before the first
    /// successful [`Scanner::next`] call and after a failed one.
    pub fn value(&self) -> Option<&Value<'a>> {
        self.value.as_ref()
    }

    /// The sticky error, if scanning has failed.
    pub fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }
}
