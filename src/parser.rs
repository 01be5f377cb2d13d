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

use crate::constants::MAX_DEPTH;
use crate::error::Error;
use crate::error::ParseErrorCode;
use crate::error::Result;
use crate::util::start_end;
use crate::value::LazyNumber;
use crate::value::LazyStr;
use crate::value::Object;
use crate::value::Value;

/// Parses JSON text into a [`Value`] borrowing from `s`.
///
/// The parser is permissive: on top of RFC 7159 it accepts `inf`/`nan`
/// number literals, numbers with a leading `+` or `.`, malformed escape
/// sequences (kept verbatim) and raw control characters inside strings. Use
/// [`crate::validate`] when strict grammar enforcement is needed.
///
/// String and number leaves of the returned value are slices of `s`, decoded
/// lazily on first typed access.
pub fn parse(s: &str) -> Result<Value<'_>> {
    parse_bytes(s.as_bytes())
}

/// Parses JSON bytes into a [`Value`] borrowing from `buf`.
///
/// The input does not have to be valid UTF-8; string content is exposed as
/// bytes first and checked only by the `str` accessors.
pub fn parse_bytes(buf: &[u8]) -> Result<Value<'_>> {
    let mut parser = Parser::new(buf);
    let value = parser.parse_value(0)?;

    parser.skip_ws();
    if parser.idx < parser.buf.len() {
        return Err(parser.error(ParseErrorCode::UnexpectedTrailingCharacters));
    }
    Ok(value)
}

/// Recursive-descent JSON parser over a borrowed buffer.
///
/// Also carries the tokenizer primitives shared with the strict validator.
pub(crate) struct Parser<'a> {
    /// Input buffer containing the JSON text to parse
    pub(crate) buf: &'a [u8],
    /// Current position in the buffer
    pub(crate) idx: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, idx: 0 }
    }

    pub(crate) fn error(&self, code: ParseErrorCode) -> Error {
        let pos = self.idx.min(self.buf.len());
        Error::Syntax(code, pos, start_end(&self.buf[pos..]))
    }

    #[inline]
    pub(crate) fn next(&mut self) -> Result<u8> {
        match self.buf.get(self.idx) {
            Some(c) => Ok(*c),
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    pub(crate) fn check_next(&self, c: u8) -> bool {
        self.buf.get(self.idx) == Some(&c)
    }

    #[inline]
    pub(crate) fn step(&mut self) {
        self.idx += 1;
    }

    #[inline]
    pub(crate) fn eof(&self) -> bool {
        self.idx >= self.buf.len()
    }

    /// Skips insignificant whitespace: space, tab, newline, carriage return.
    #[inline]
    pub(crate) fn skip_ws(&mut self) {
        if let Some(&c) = self.buf.get(self.idx) {
            if c > 0x20 {
                // Fast path.
                return;
            }
        }
        self.skip_ws_slow();
    }

    fn skip_ws_slow(&mut self) {
        while let Some(&c) = self.buf.get(self.idx) {
            match c {
                b'\x20' | b'\x09' | b'\x0A' | b'\x0D' => self.idx += 1,
                _ => return,
            }
        }
    }

    #[inline]
    fn expect_literal(&mut self, literal: &'static [u8]) -> Result<()> {
        if self.buf[self.idx..].starts_with(literal) {
            self.idx += literal.len();
            Ok(())
        } else {
            Err(self.error(ParseErrorCode::ExpectedSomeIdent))
        }
    }

    /// Scans a raw string with `idx` at the opening quote. Returns the
    /// interior with escapes intact and leaves `idx` past the closing quote.
    ///
    /// The fast path jumps between `"` candidates; the slow path counts the
    /// backslashes in front of a candidate to decide whether it is escaped.
    pub(crate) fn scan_raw_string(&mut self) -> Result<&'a [u8]> {
        if !self.check_next(b'"') {
            return Err(self.error(ParseErrorCode::ExpectedStringQuote));
        }
        self.step();
        let start = self.idx;
        let mut from = self.idx;
        loop {
            let Some(n) = self.buf[from..].iter().position(|&c| c == b'"') else {
                self.idx = self.buf.len();
                return Err(self.error(ParseErrorCode::InvalidEOF));
            };
            let quote = from + n;
            let mut backslashes = 0;
            while quote > start + backslashes && self.buf[quote - 1 - backslashes] == b'\\' {
                backslashes += 1;
            }
            if backslashes % 2 == 0 {
                self.idx = quote + 1;
                return Ok(&self.buf[start..quote]);
            }
            from = quote + 1;
        }
    }

    /// Same contract as [`Parser::scan_raw_string`], but optimized for the
    /// common case of short keys without escape sequences.
    pub(crate) fn scan_raw_key(&mut self) -> Result<&'a [u8]> {
        if !self.check_next(b'"') {
            return Err(self.error(ParseErrorCode::ExpectedStringQuote));
        }
        let start = self.idx + 1;
        let mut i = start;
        while i < self.buf.len() {
            match self.buf[i] {
                b'"' => {
                    self.idx = i + 1;
                    return Ok(&self.buf[start..i]);
                }
                b'\\' => return self.scan_raw_string(),
                _ => i += 1,
            }
        }
        self.idx = self.buf.len();
        Err(self.error(ParseErrorCode::InvalidEOF))
    }

    /// Scans a number lexeme: the longest prefix of number characters, or
    /// the three-letter `inf`/`nan` literals (any case, optionally signed)
    /// when no digits were collected.
    pub(crate) fn scan_raw_number(&mut self) -> Result<&'a [u8]> {
        let start = self.idx;
        while let Some(&c) = self.buf.get(self.idx) {
            match c {
                b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E' => self.idx += 1,
                _ => break,
            }
        }
        let len = self.idx - start;
        if len == 0 || (len == 1 && matches!(self.buf[start], b'-' | b'+')) {
            if let Some(literal) = self.buf.get(self.idx..self.idx + 3) {
                if literal.eq_ignore_ascii_case(b"inf") || literal.eq_ignore_ascii_case(b"nan") {
                    self.idx += 3;
                    return Ok(&self.buf[start..self.idx]);
                }
            }
            self.idx = start;
            return Err(self.error(ParseErrorCode::ExpectedSomeValue));
        }
        Ok(&self.buf[start..self.idx])
    }

    /// Parses a single JSON value, dispatching on the first byte after
    /// whitespace.
    pub(crate) fn parse_value(&mut self, depth: usize) -> Result<Value<'a>> {
        let depth = depth + 1;
        if depth > MAX_DEPTH {
            return Err(self.error(ParseErrorCode::DepthLimitExceeded));
        }

        self.skip_ws();
        let c = self.next()?;
        match c {
            b'{' => self.parse_object(depth),
            b'[' => self.parse_array(depth),
            b'"' => {
                let raw = self.scan_raw_string()?;
                Ok(Value::String(LazyStr::from_raw(raw)))
            }
            b't' => {
                self.expect_literal(b"true")?;
                Ok(Value::Bool(true))
            }
            b'f' => {
                self.expect_literal(b"false")?;
                Ok(Value::Bool(false))
            }
            b'n' if self.buf[self.idx..].starts_with(b"null") => {
                self.idx += 4;
                Ok(Value::Null)
            }
            _ => {
                // Number, or the nan/inf literals the number scanner knows.
                let raw = self.scan_raw_number()?;
                Ok(Value::Number(LazyNumber::from_raw(raw)))
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value<'a>> {
        // Skip the first char - '['
        self.step();

        self.skip_ws();
        if self.check_next(b']') {
            self.step();
            return Ok(Value::Array(Vec::new()));
        }

        let mut values = Vec::with_capacity(8);
        loop {
            let value = self.parse_value(depth)?;
            values.push(value);

            self.skip_ws();
            match self.next()? {
                b',' => self.step(),
                b']' => {
                    self.step();
                    return Ok(Value::Array(values));
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value<'a>> {
        // Skip the first char - '{'
        self.step();

        self.skip_ws();
        if self.check_next(b'}') {
            self.step();
            return Ok(Value::Object(Object::new()));
        }

        let mut obj = Object::new();
        loop {
            // Parse key. Duplicate keys are kept; lookups return the first.
            self.skip_ws();
            let key = self.scan_raw_key()?;

            self.skip_ws();
            if !self.check_next(b':') {
                self.next()?;
                return Err(self.error(ParseErrorCode::ExpectedColon));
            }
            self.step();

            // Parse value
            let value = self.parse_value(depth)?;
            obj.push(LazyStr::from_raw(key), value);

            self.skip_ws();
            match self.next()? {
                b',' => self.step(),
                b'}' => {
                    self.step();
                    return Ok(Value::Object(obj));
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
    }
}
