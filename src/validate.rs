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
use crate::constants::UNICODE_LEN;
use crate::error::ParseErrorCode;
use crate::error::Result;
use crate::parser::Parser;
use crate::util::HEX;

/// Validates that `s` is JSON conforming to the RFC 7159 grammar.
///
/// Unlike [`crate::parse`] this rejects the permissive extensions: `inf` and
/// `nan` literals, `+` signs, numbers with a bare leading or trailing `.` or
/// a redundant leading zero, unescaped control characters inside strings and
/// escape sequences outside the RFC set. No value tree is built.
pub fn validate(s: &str) -> Result<()> {
    validate_bytes(s.as_bytes())
}

/// Validates that `buf` is JSON conforming to the RFC 7159 grammar.
pub fn validate_bytes(buf: &[u8]) -> Result<()> {
    let mut validator = Validator {
        p: Parser::new(buf),
    };
    validator.validate_value(0)?;

    validator.p.skip_ws();
    if !validator.p.eof() {
        return Err(validator
            .p
            .error(ParseErrorCode::UnexpectedTrailingCharacters));
    }
    Ok(())
}

/// Strict grammar checker sharing the tokenizer primitives of [`Parser`].
struct Validator<'a> {
    p: Parser<'a>,
}

impl Validator<'_> {
    fn validate_value(&mut self, depth: usize) -> Result<()> {
        let depth = depth + 1;
        if depth > MAX_DEPTH {
            return Err(self.p.error(ParseErrorCode::DepthLimitExceeded));
        }

        self.p.skip_ws();
        let c = self.p.next()?;
        match c {
            b'{' => self.validate_object(depth),
            b'[' => self.validate_array(depth),
            b'"' => self.validate_string(),
            b't' => self.expect_literal(b"true"),
            b'f' => self.expect_literal(b"false"),
            b'n' => self.expect_literal(b"null"),
            b'0'..=b'9' | b'-' => self.validate_number(),
            _ => Err(self.p.error(ParseErrorCode::ExpectedSomeValue)),
        }
    }

    fn expect_literal(&mut self, literal: &'static [u8]) -> Result<()> {
        if self.p.buf[self.p.idx..].starts_with(literal) {
            self.p.idx += literal.len();
            Ok(())
        } else {
            Err(self.p.error(ParseErrorCode::ExpectedSomeIdent))
        }
    }

    fn validate_array(&mut self, depth: usize) -> Result<()> {
        self.p.step();

        self.p.skip_ws();
        if self.p.check_next(b']') {
            self.p.step();
            return Ok(());
        }

        loop {
            self.validate_value(depth)?;

            self.p.skip_ws();
            match self.p.next()? {
                b',' => self.p.step(),
                b']' => {
                    self.p.step();
                    return Ok(());
                }
                _ => return Err(self.p.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
    }

    fn validate_object(&mut self, depth: usize) -> Result<()> {
        self.p.step();

        self.p.skip_ws();
        if self.p.check_next(b'}') {
            self.p.step();
            return Ok(());
        }

        loop {
            self.p.skip_ws();
            self.validate_string()?;

            self.p.skip_ws();
            if !self.p.check_next(b':') {
                self.p.next()?;
                return Err(self.p.error(ParseErrorCode::ExpectedColon));
            }
            self.p.step();

            self.validate_value(depth)?;

            self.p.skip_ws();
            match self.p.next()? {
                b',' => self.p.step(),
                b'}' => {
                    self.p.step();
                    return Ok(());
                }
                _ => return Err(self.p.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
    }

    /// Scans a string with the shared raw scanner, then enforces that it has
    /// no unescaped control characters and only RFC escape sequences.
    fn validate_string(&mut self) -> Result<()> {
        let start = self.p.idx + 1;
        let raw = self.p.scan_raw_string()?;

        let mut i = 0;
        while i < raw.len() {
            let c = raw[i];
            if c < 0x20 {
                self.p.idx = start + i;
                return Err(self.p.error(ParseErrorCode::InvalidStringValue(c)));
            }
            if c != b'\\' {
                i += 1;
                continue;
            }
            // The scanner guarantees a backslash is never the last byte.
            let escaped = raw[i + 1];
            i += 2;
            match escaped {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {}
                b'u' => {
                    if raw.len() < i + UNICODE_LEN {
                        self.p.idx = start + raw.len();
                        return Err(self.p.error(ParseErrorCode::UnexpectedEndOfHexEscape));
                    }
                    for _ in 0..UNICODE_LEN {
                        let h = raw[i];
                        if HEX[h as usize] == 255 {
                            self.p.idx = start + i;
                            return Err(self.p.error(ParseErrorCode::InvalidHex(h)));
                        }
                        i += 1;
                    }
                }
                other => {
                    self.p.idx = start + i - 1;
                    return Err(self.p.error(ParseErrorCode::InvalidEscaped(other)));
                }
            }
        }
        Ok(())
    }

    /// Validates an RFC 7159 number: optional `-`, an integer part without a
    /// redundant leading zero, then optional fraction and exponent parts
    /// carrying at least one digit each.
    fn validate_number(&mut self) -> Result<()> {
        if self.p.check_next(b'-') {
            self.p.step();
        }

        let int_start = self.p.idx;
        let leading_zero = self.p.check_next(b'0');
        let len = self.step_digits();
        if len == 0 {
            return Err(self.p.error(ParseErrorCode::InvalidNumberValue));
        }
        if leading_zero && len != 1 {
            self.p.idx = int_start;
            return Err(self.p.error(ParseErrorCode::InvalidNumberValue));
        }

        if self.p.check_next(b'.') {
            self.p.step();
            if self.step_digits() == 0 {
                return Err(self.p.error(ParseErrorCode::InvalidNumberValue));
            }
        }

        if self.p.check_next(b'e') || self.p.check_next(b'E') {
            self.p.step();
            if self.p.check_next(b'+') || self.p.check_next(b'-') {
                self.p.step();
            }
            if self.step_digits() == 0 {
                return Err(self.p.error(ParseErrorCode::InvalidNumberValue));
            }
        }
        Ok(())
    }

    fn step_digits(&mut self) -> usize {
        let start = self.p.idx;
        while let Some(c) = self.p.buf.get(self.p.idx) {
            if !c.is_ascii_digit() {
                break;
            }
            self.p.step();
        }
        self.p.idx - start
    }
}
