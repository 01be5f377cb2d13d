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

use lazyjson::Scanner;

fn collect(input: &str) -> Vec<String> {
    let mut sc = Scanner::new(input);
    let mut docs = Vec::new();
    while sc.next() {
        docs.push(sc.value().unwrap().to_string());
    }
    assert!(sc.error().is_none(), "unexpected error: {:?}", sc.error());
    docs
}

#[test]
fn test_scanner_success() {
    assert_eq!(collect(r#"[] {} "" 123"#), ["[]", "{}", "\"\"", "123"]);
    assert_eq!(collect(r#"{"a":1}[2,3] true"#), [r#"{"a":1}"#, "[2,3]", "true"]);
    assert_eq!(
        collect("   {\"foo\":  \"bar\"  }[  ]\n\t\t12345\"xyz\" true false null    "),
        [
            r#"{"foo":"bar"}"#,
            "[]",
            "12345",
            "\"xyz\"",
            "true",
            "false",
            "null"
        ]
    );
}

#[test]
fn test_scanner_empty_input() {
    let mut sc = Scanner::new("");
    assert!(!sc.next());
    assert!(sc.error().is_none());
    assert!(sc.value().is_none());

    let mut sc = Scanner::new("  \t\n ");
    assert!(!sc.next());
    assert!(sc.error().is_none());
}

#[test]
fn test_scanner_yields_exactly_n() {
    let docs: Vec<String> = (0..10).map(|i| format!("[{i}]")).collect();
    let input = docs.join(" ");
    let mut sc = Scanner::from_bytes(input.as_bytes());
    let mut count = 0;
    while sc.next() {
        count += 1;
    }
    assert_eq!(count, 10);
    assert!(sc.error().is_none());
    assert!(!sc.next());
}

#[test]
fn test_scanner_sticky_error() {
    let mut sc = Scanner::new("[] sdfdsfdf");
    assert!(sc.next());
    assert_eq!(sc.value().unwrap().to_string(), "[]");

    assert!(!sc.next());
    assert!(sc.error().is_some());
    assert!(sc.value().is_none());

    // The error is sticky.
    assert!(!sc.next());
    assert!(sc.error().is_some());
}

#[test]
fn test_scanner_values_outlive_next() {
    // Values borrow the input, not the scanner, so earlier documents stay
    // usable while scanning continues.
    let input = r#"{"a":1} {"b":2}"#;
    let mut sc = Scanner::new(input);
    assert!(sc.next());
    let first = sc.value().unwrap().clone();
    assert!(sc.next());
    let second = sc.value().unwrap();
    assert_eq!(first.to_string(), r#"{"a":1}"#);
    assert_eq!(second.to_string(), r#"{"b":2}"#);
    assert!(!sc.next());
}
