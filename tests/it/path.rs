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

use lazyjson::parse;
use lazyjson::parse_path;
use lazyjson::PathStep;

#[test]
fn test_parse_path_syntax() {
    let path = parse_path(b"{a,b,1}").unwrap();
    assert_eq!(
        path.steps,
        vec![
            PathStep::Name(Cow::Borrowed("a")),
            PathStep::Name(Cow::Borrowed("b")),
            PathStep::Index(1),
        ]
    );

    let path = parse_path(br#"{ "key with space" , -2 }"#).unwrap();
    assert_eq!(
        path.steps,
        vec![
            PathStep::QuotedName(Cow::Borrowed("key with space")),
            PathStep::Index(-2),
        ]
    );
    assert_eq!(path.to_string(), r#"{"key with space",-2}"#);

    assert!(parse_path(b"{}").unwrap().steps.is_empty());
    assert!(parse_path(b"no braces").is_err());
    assert!(parse_path(b"{unclosed").is_err());
}

#[test]
fn test_get_by_path() {
    let v = parse(r#"{"a":{"b":[10,20,30]},"list":["x","y"]}"#).unwrap();

    let path = parse_path(b"{a,b,1}").unwrap();
    assert_eq!(v.get_by_path(&path.steps).unwrap().as_i64(), Some(20));

    // Negative indexes count from the end.
    let path = parse_path(b"{a,b,-1}").unwrap();
    assert_eq!(v.get_by_path(&path.steps).unwrap().as_i64(), Some(30));

    let path = parse_path(b"{list,-2}").unwrap();
    assert_eq!(v.get_by_path(&path.steps).unwrap().as_str(), Some("x"));

    // Out of range in either direction is None.
    assert!(v.get_by_path(&parse_path(b"{a,b,3}").unwrap().steps).is_none());
    assert!(v.get_by_path(&parse_path(b"{a,b,-4}").unwrap().steps).is_none());
    // Type mismatches are None.
    assert!(v.get_by_path(&parse_path(b"{a,0}").unwrap().steps).is_none());
    assert!(v.get_by_path(&parse_path(b"{list,x}").unwrap().steps).is_none());

    // An empty path addresses the root.
    assert!(v.get_by_path(&[]).unwrap().is_object());
}

#[test]
fn test_quoted_and_raw_names_are_equivalent() {
    let v = parse(r#"{"k":1}"#).unwrap();
    let quoted = [PathStep::QuotedName(Cow::Borrowed("k"))];
    let raw = [PathStep::Name(Cow::Borrowed("k"))];
    assert_eq!(v.get_by_path(&quoted), v.get_by_path(&raw));
}
