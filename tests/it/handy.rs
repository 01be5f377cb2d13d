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

use lazyjson::exists;
use lazyjson::get_bool;
use lazyjson::get_bytes;
use lazyjson::get_f64;
use lazyjson::get_i64;
use lazyjson::get_string;

const DATA: &[u8] = br#"{"foo":"bar","n":123,"f":1.5,"ok":true,"arr":[{"k":"v"}]}"#;

#[test]
fn test_handy_getters() {
    assert_eq!(get_string(DATA, &["foo"]), Some("bar".to_string()));
    assert_eq!(get_bytes(DATA, &["foo"]), Some(b"bar".to_vec()));
    assert_eq!(get_i64(DATA, &["n"]), Some(123));
    assert_eq!(get_f64(DATA, &["f"]), Some(1.5));
    assert_eq!(get_bool(DATA, &["ok"]), Some(true));
    assert_eq!(get_string(DATA, &["arr", "0", "k"]), Some("v".to_string()));

    // Missing paths and type mismatches.
    assert_eq!(get_string(DATA, &["n"]), None);
    assert_eq!(get_i64(DATA, &["missing"]), None);

    // Malformed documents.
    assert_eq!(get_string(b"{invalid", &["foo"]), None);
}

#[test]
fn test_handy_exists() {
    assert!(exists(DATA, &["arr", "0", "k"]));
    assert!(!exists(DATA, &["arr", "1"]));
    assert!(!exists(b"{invalid", &["foo"]));
}
