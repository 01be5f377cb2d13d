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
use std::fmt::Display;
use std::fmt::Formatter;

use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::character::complete::i32;
use nom::character::complete::multispace0;
use nom::combinator::map;
use nom::combinator::map_res;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::preceded;
use nom::sequence::terminated;
use nom::IResult;
use nom::Parser;

use crate::error::Error;
use crate::error::ParseErrorCode;
use crate::value::Value;

/// Represents a typed path: a chain of object-key and array-index steps.
/// The textual form is compatible with PostgreSQL's sub-object path syntax,
/// e.g. `{a,"b c",-1}`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Path<'a> {
    pub steps: Vec<PathStep<'a>>,
}

/// Represents a single valid path step.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PathStep<'a> {
    /// represents the index of an Array, allow negative indexing.
    Index(i32),
    /// represents the quoted field name of an Object.
    QuotedName(Cow<'a, str>),
    /// represents the field name of an Object.
    Name(Cow<'a, str>),
}

impl PathStep<'_> {
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            PathStep::Index(_) => None,
            PathStep::QuotedName(name) | PathStep::Name(name) => Some(name),
        }
    }
}

impl Display for Path<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{step}")?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}

impl Display for PathStep<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathStep::Index(idx) => {
                write!(f, "{idx}")?;
            }
            PathStep::QuotedName(name) => {
                write!(f, "\"{name}\"")?;
            }
            PathStep::Name(name) => {
                write!(f, "{name}")?;
            }
        }
        Ok(())
    }
}

/// Parses the input string to a path.
pub fn parse_path(input: &[u8]) -> Result<Path<'_>, Error> {
    match path_steps(input) {
        Ok((rest, steps)) => {
            if !rest.is_empty() {
                return Err(Error::Syntax(
                    ParseErrorCode::UnexpectedTrailingCharacters,
                    input.len() - rest.len(),
                    String::new(),
                ));
            }
            Ok(Path { steps })
        }
        Err(nom::Err::Error(_) | nom::Err::Failure(_)) => Err(Error::Syntax(
            ParseErrorCode::ExpectedSomeValue,
            0,
            String::new(),
        )),
        Err(nom::Err::Incomplete(_)) => unreachable!(),
    }
}

fn path_step(input: &[u8]) -> IResult<&[u8], PathStep<'_>> {
    alt((
        map(i32, PathStep::Index),
        map(quoted_name, PathStep::QuotedName),
        map(raw_name, PathStep::Name),
    ))
    .parse(input)
}

fn path_steps(input: &[u8]) -> IResult<&[u8], Vec<PathStep<'_>>> {
    alt((
        delimited(
            preceded(multispace0, char('{')),
            separated_list1(char(','), delimited(multispace0, path_step, multispace0)),
            terminated(char('}'), multispace0),
        ),
        map(
            delimited(
                preceded(multispace0, char('{')),
                multispace0,
                terminated(char('}'), multispace0),
            ),
            |_| vec![],
        ),
    ))
    .parse(input)
}

fn quoted_name(input: &[u8]) -> IResult<&[u8], Cow<'_, str>> {
    map_res(
        delimited(char('"'), take_while(|c| c != b'"'), char('"')),
        |bytes: &[u8]| std::str::from_utf8(bytes).map(Cow::Borrowed),
    )
    .parse(input)
}

fn raw_name(input: &[u8]) -> IResult<&[u8], Cow<'_, str>> {
    map_res(
        take_while1(|c: u8| c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80),
        |bytes: &[u8]| std::str::from_utf8(bytes).map(Cow::Borrowed),
    )
    .parse(input)
}

impl<'a> Value<'a> {
    /// Returns the value addressed by a chain of typed path steps.
    ///
    /// A negative index counts from the end of the array, so `Index(-1)` is
    /// its last element. `None` for a non-existing path or a type mismatch
    /// along the way.
    pub fn get_by_path<'v>(&'v self, steps: &[PathStep<'_>]) -> Option<&'v Value<'a>> {
        let mut v = self;
        for step in steps {
            match step {
                PathStep::Index(i) => {
                    let values = v.as_array()?;
                    let idx = if *i < 0 {
                        values.len().checked_sub(i.unsigned_abs() as usize)?
                    } else {
                        *i as usize
                    };
                    v = values.get(idx)?;
                }
                PathStep::QuotedName(name) | PathStep::Name(name) => {
                    v = v.as_object()?.get(name)?;
                }
            }
        }
        Some(v)
    }
}
