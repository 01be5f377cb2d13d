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

// Number of hex digits in a \uXXXX escape.
pub(crate) const UNICODE_LEN: usize = 4;

/// Maximum nesting depth accepted by the parser and the validator.
/// Inputs nested deeper fail instead of exhausting the stack.
pub const MAX_DEPTH: usize = 300;

// Unparsed tail excerpts attached to syntax errors keep at most this many
// bytes, half from the head and half from the tail of the remaining input.
pub(crate) const MAX_TAIL_EXCERPT_LEN: usize = 80;

pub(crate) const TYPE_NULL: &str = "null";
pub(crate) const TYPE_TRUE: &str = "true";
pub(crate) const TYPE_FALSE: &str = "false";
pub(crate) const TYPE_NUMBER: &str = "number";
pub(crate) const TYPE_STRING: &str = "string";
pub(crate) const TYPE_ARRAY: &str = "array";
pub(crate) const TYPE_OBJECT: &str = "object";
