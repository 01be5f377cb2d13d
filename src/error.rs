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

use crate::value::Type;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the parser, the validator and the typed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Syntax error, with the byte offset at which it was detected and a
    /// bounded excerpt of the input that was left unparsed.
    Syntax(ParseErrorCode, usize, String),
    /// A checked accessor was called on a value of the wrong type.
    TypeMismatch {
        expected: &'static str,
        actual: Type,
    },
    /// A numeric lexeme did not match the requested integer width or the
    /// strict number grammar.
    NumberFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorCode {
    InvalidEOF,
    ExpectedSomeValue,
    ExpectedSomeIdent,
    ExpectedColon,
    ExpectedArrayCommaOrEnd,
    ExpectedObjectCommaOrEnd,
    ExpectedStringQuote,
    InvalidNumberValue,
    InvalidStringValue(u8),
    InvalidEscaped(u8),
    InvalidHex(u8),
    UnexpectedEndOfHexEscape,
    DepthLimitExceeded,
    UnexpectedTrailingCharacters,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorCode::InvalidEOF => write!(f, "EOF while parsing a value"),
            ParseErrorCode::ExpectedSomeValue => write!(f, "expected value"),
            ParseErrorCode::ExpectedSomeIdent => write!(f, "expected ident"),
            ParseErrorCode::ExpectedColon => write!(f, "expected `:`"),
            ParseErrorCode::ExpectedArrayCommaOrEnd => write!(f, "expected `,` or `]`"),
            ParseErrorCode::ExpectedObjectCommaOrEnd => write!(f, "expected `,` or `}}`"),
            ParseErrorCode::ExpectedStringQuote => write!(f, "expected `\"`"),
            ParseErrorCode::InvalidNumberValue => write!(f, "invalid number"),
            ParseErrorCode::InvalidStringValue(c) => {
                write!(f, "string cannot contain control char 0x{c:02X}")
            }
            ParseErrorCode::InvalidEscaped(c) => {
                write!(f, "invalid escaped char `{}`", *c as char)
            }
            ParseErrorCode::InvalidHex(c) => write!(f, "invalid hex char `{}`", *c as char),
            ParseErrorCode::UnexpectedEndOfHexEscape => {
                write!(f, "unexpected end of hex escape")
            }
            ParseErrorCode::DepthLimitExceeded => write!(f, "max nesting depth exceeded"),
            ParseErrorCode::UnexpectedTrailingCharacters => write!(f, "trailing characters"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(code, pos, tail) => {
                write!(f, "{code}, pos {pos}")?;
                if !tail.is_empty() {
                    write!(f, ", unparsed tail {tail:?}")?;
                }
                Ok(())
            }
            Error::TypeMismatch { expected, actual } => {
                write!(f, "value doesn't contain {expected}; it contains {actual}")
            }
            Error::NumberFormat => write!(f, "invalid number"),
        }
    }
}

impl std::error::Error for Error {}
