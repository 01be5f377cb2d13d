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

//! `lazyjson` is a JSON parser optimized for the parse-once, query-many
//! workload of ad-bidding and JSON-RPC style services.
//!
//! ## Features
//!
//! - Zero-copy parsing: string and number leaves of the parsed tree are
//!   slices of the input buffer. Strings without escape sequences and
//!   numbers never allocate.
//! - Lazy materialization: a leaf stays in its raw lexeme form until a typed
//!   accessor first touches it; the decoded form is cached from then on.
//!   Serializing an untouched tree reproduces the input byte for byte.
//! - A permissive parser for reading real-world data (`inf`/`nan` literals,
//!   leading `+`/`.` in numbers, best-effort escape handling, raw control
//!   characters in strings) and a separate strict [`validate`] entry point
//!   enforcing the RFC 7159 grammar.
//! - Path navigation, typed getters, mutation ([`Value::set`],
//!   [`Value::del`], [`Value::set_by_path`]) and serialization back to JSON
//!   text.
//! - A [`Scanner`] for iterating over concatenated JSON documents.
//!
//! Nesting depth is bounded by [`MAX_DEPTH`] so adversarial inputs cannot
//! exhaust the stack.
//!
//! ## Parsing and querying
//!
//! ```
//! let v = lazyjson::parse(r#"{"foo":"bar","n":123,"arr":[1,"x",null]}"#).unwrap();
//!
//! assert_eq!(v.get_str(&["foo"]), Some("bar"));
//! assert_eq!(v.get_i64(&["n"]), Some(123));
//! assert_eq!(v.get_str(&["arr", "1"]), Some("x"));
//! assert!(v.exists(&["arr", "2"]));
//! assert_eq!(v.to_string(), r#"{"foo":"bar","n":123,"arr":[1,"x",null]}"#);
//! ```
//!
//! ## Building and updating documents
//!
//! ```
//! let mut v = lazyjson::parse(r#"{"a":{"b":1}}"#).unwrap();
//! use lazyjson::PathStep;
//!
//! v.set_by_path(&[PathStep::Name("a".into()), PathStep::Name("b".into())], 2i64.into());
//! v.set("reply", lazyjson::Object::from_iter([("status", "ok")]).into());
//! assert_eq!(v.to_string(), r#"{"a":{"b":2},"reply":{"status":"ok"}}"#);
//! ```
//!
//! ## Concurrency
//!
//! Parsed values use interior caches and are deliberately not `Sync`; a
//! value stays on the thread that parsed it. Parallel workloads parse with
//! one input per worker.

#![allow(clippy::uninlined_format_args)]

mod constants;
mod error;
mod from;
mod handy;
pub mod number;
mod parser;
mod path;
mod scanner;
mod ser;
mod update;
mod util;
mod validate;
mod value;

pub use constants::MAX_DEPTH;
pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
pub use handy::*;
pub use parser::parse;
pub use parser::parse_bytes;
pub use path::parse_path;
pub use path::Path;
pub use path::PathStep;
pub use scanner::Scanner;
pub use validate::validate;
pub use validate::validate_bytes;
pub use value::LazyNumber;
pub use value::LazyStr;
pub use value::Object;
pub use value::Type;
pub use value::Value;
