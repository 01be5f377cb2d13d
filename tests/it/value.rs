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

use lazyjson::parse;
use lazyjson::Error;
use lazyjson::Type;
use lazyjson::Value;

const SAMPLE: &str = r#"{
    "str": "hello",
    "int": -42,
    "uint": 18446744073709551615,
    "float": 1.25,
    "flag": true,
    "nothing": null,
    "arr": [10, 20, {"deep": "yes"}],
    "obj": {"k": "v"}
}"#;

#[test]
fn test_type_of() {
    let v = parse(SAMPLE).unwrap();
    assert_eq!(v.type_of(), Type::Object);
    assert_eq!(v.get(&["str"]).unwrap().type_of(), Type::String);
    assert_eq!(v.get(&["int"]).unwrap().type_of(), Type::Number);
    assert_eq!(v.get(&["flag"]).unwrap().type_of(), Type::True);
    assert_eq!(v.get(&["nothing"]).unwrap().type_of(), Type::Null);
    assert_eq!(v.get(&["arr"]).unwrap().type_of(), Type::Array);
    assert_eq!(parse("false").unwrap().type_of(), Type::False);
    assert_eq!(Type::Object.to_string(), "object");
    assert_eq!(Type::True.to_string(), "true");
}

#[test]
fn test_get_paths() {
    let v = parse(SAMPLE).unwrap();

    assert_eq!(v.get_str(&["str"]), Some("hello"));
    assert_eq!(v.get_str_bytes(&["str"]), Some(&b"hello"[..]));
    assert_eq!(v.get_i64(&["int"]), Some(-42));
    assert_eq!(v.get_u64(&["uint"]), Some(u64::MAX));
    assert_eq!(v.get_f64(&["float"]), Some(1.25));
    assert_eq!(v.get_bool(&["flag"]), Some(true));
    assert_eq!(v.get_str(&["arr", "2", "deep"]), Some("yes"));
    assert_eq!(v.get_i64(&["arr", "0"]), Some(10));
    assert_eq!(v.get_object(&["obj"]).unwrap().len(), 1);
    assert_eq!(v.get_array(&["arr"]).unwrap().len(), 3);

    // Missing paths and type mismatches are all None.
    assert_eq!(v.get(&["missing"]), None);
    assert_eq!(v.get(&["str", "x"]), None);
    assert_eq!(v.get(&["arr", "3"]), None);
    assert_eq!(v.get(&["arr", "x"]), None);
    assert_eq!(v.get(&["arr", "-1"]), None);
    assert_eq!(v.get_bool(&["str"]), None);
    assert_eq!(v.get_i64(&["float"]), None);

    // An empty path is the value itself.
    assert!(v.get(&[]).unwrap().is_object());
}

#[test]
fn test_exists() {
    let v = parse(SAMPLE).unwrap();
    assert!(v.exists(&["nothing"]));
    assert!(v.exists(&["arr", "2", "deep"]));
    assert!(!v.exists(&["arr", "9"]));
    assert!(!v.exists(&["obj", "missing"]));

    // get and exists agree.
    for path in [&["str"][..], &["missing"][..], &["arr", "1"][..]] {
        assert_eq!(v.get(path).is_some(), v.exists(path));
    }
}

#[test]
fn test_try_accessors() {
    let v = parse(SAMPLE).unwrap();

    assert_eq!(v.get(&["int"]).unwrap().try_i64().unwrap(), -42);
    assert_eq!(v.get(&["uint"]).unwrap().try_u64().unwrap(), u64::MAX);
    assert_eq!(v.get(&["float"]).unwrap().try_f64().unwrap(), 1.25);
    assert_eq!(v.get(&["str"]).unwrap().try_str().unwrap(), "hello");
    assert!(v.get(&["flag"]).unwrap().try_bool().unwrap());
    assert!(v.try_object().is_ok());
    assert!(v.get(&["arr"]).unwrap().try_array().is_ok());

    let err = v.get(&["str"]).unwrap().try_i64().unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            expected: "number",
            actual: Type::String,
        }
    );
    assert_eq!(
        err.to_string(),
        "value doesn't contain number; it contains string"
    );

    // A float lexeme is a number but not an i64.
    assert_eq!(
        v.get(&["float"]).unwrap().try_i64().unwrap_err(),
        Error::NumberFormat
    );
    // A negative lexeme is not a u64.
    assert_eq!(
        v.get(&["int"]).unwrap().try_u64().unwrap_err(),
        Error::NumberFormat
    );
}

#[test]
fn test_lazy_number_promotion() {
    // Untouched numbers marshal as their original lexeme.
    let v = parse("1e2").unwrap();
    assert_eq!(v.to_string(), "1e2");

    // type_of promotes, so the cached float is marshaled instead.
    let v = parse("1e2").unwrap();
    assert_eq!(v.type_of(), Type::Number);
    assert_eq!(v.to_string(), "100");

    // Compact float form when there is a fraction.
    let v = parse("0.2500").unwrap();
    assert_eq!(v.as_f64(), Some(0.25));
    assert_eq!(v.to_string(), "0.25");

    // A promoted integer lexeme keeps full 64-bit precision through both
    // output paths, even though the cached float is lossy.
    let v = parse("18446744073709551615").unwrap();
    assert_eq!(v.type_of(), Type::Number);
    assert_eq!(v.to_string(), "18446744073709551615");
    assert_eq!(
        serde_json::to_string(&v).unwrap(),
        "18446744073709551615"
    );

    // The permissive plus sign is normalized away on re-encode.
    let v = parse("+7").unwrap();
    v.type_of();
    assert_eq!(v.to_string(), "7");

    // A malformed permissive lexeme decodes to zero.
    let v = parse("1e").unwrap();
    assert_eq!(v.as_f64(), Some(0.0));
}

#[test]
fn test_lazy_string_promotion() {
    // Untouched strings marshal their escaped lexeme verbatim.
    let v = parse(r#""aAb""#).unwrap();
    assert_eq!(v.to_string(), r#""aAb""#);

    // After decoding, the string is re-escaped from the decoded bytes.
    let v = parse(r#""aAb\n""#).unwrap();
    assert_eq!(v.as_str(), Some("aAb\n"));
    assert_eq!(v.to_string(), r#""aAb\n""#);
}

#[test]
fn test_object_escaped_keys() {
    let v = parse(r#"{"fo\no":"bar","plain":1}"#).unwrap();
    let obj = v.as_object().unwrap();

    // The fast path finds unescaped keys without decoding anything.
    assert_eq!(obj.get("plain").unwrap().as_i64(), Some(1));

    // Looking up the decoded form falls back to unescaping all keys.
    assert_eq!(obj.get("fo\no").unwrap().as_str(), Some("bar"));

    // The escaped spelling does not match the decoded key.
    assert!(obj.get(r"fo\no").is_none());
}

#[test]
fn test_object_visit_order() {
    let v = parse(r#"{"b":1,"a":2,"b":3}"#).unwrap();
    let obj = v.as_object().unwrap();

    let mut seen = Vec::new();
    obj.visit(|key, value| {
        seen.push((key.to_vec(), value.as_i64().unwrap()));
    });
    assert_eq!(
        seen,
        vec![
            (b"b".to_vec(), 1),
            (b"a".to_vec(), 2),
            (b"b".to_vec(), 3),
        ]
    );

    // get returns the first matching entry of the visit order.
    let first = obj.get("b").unwrap();
    assert_eq!(first.as_i64(), seen[0].1.into());

    let keys: Vec<&[u8]> = obj.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![&b"b"[..], &b"a"[..], &b"b"[..]]);
}

#[test]
fn test_structural_equality() {
    let a = parse(r#"{"x":[1,2.5,"s"],"y":null}"#).unwrap();
    let b = parse(r#"{ "x" : [ 1 , 2.5 , "s" ] , "y" : null }"#).unwrap();
    assert_eq!(a, b);

    // Numbers compare by value, not lexeme.
    assert_eq!(parse("1e2").unwrap(), parse("100.0").unwrap());
    assert_eq!(parse("100").unwrap(), parse("100").unwrap());
    assert_ne!(parse("100").unwrap(), parse("101").unwrap());
    // Full-width integers are not squashed through f64.
    assert_ne!(
        parse("18446744073709551615").unwrap(),
        parse("18446744073709551614").unwrap()
    );

    assert_ne!(a, parse(r#"{"x":[1,2.5,"s"]}"#).unwrap());
}

#[test]
fn test_constructed_values() {
    let mut obj: Value = lazyjson::Object::from_iter([("id", Value::from(7i64))]).into();
    obj.set("name", "svc".into());
    obj.set("ratio", 0.5f64.into());
    obj.set("big", Value::from(u64::MAX));
    obj.set("ok", true.into());
    obj.set("none", ().into());
    assert_eq!(
        obj.to_string(),
        r#"{"id":7,"name":"svc","ratio":0.5,"big":18446744073709551615,"ok":true,"none":null}"#
    );

    let arr: Value = [1i64, 2, 3].into_iter().collect();
    assert_eq!(arr.to_string(), "[1,2,3]");

    // Constructed integers keep full precision through marshal.
    let v = Value::from(i64::MIN);
    assert_eq!(v.to_string(), "-9223372036854775808");
    assert_eq!(v.as_i64(), Some(i64::MIN));
}

#[test]
fn test_serde_bridge() {
    let v = parse(r#"{"b":1,"a":[1.5,true,null],"s":"x"}"#).unwrap();
    let out = serde_json::to_string(&v).unwrap();
    assert_eq!(out, r#"{"b":1,"a":[1.5,true,null],"s":"x"}"#);
}

#[test]
fn test_marshal_non_finite() {
    // Raw inf/nan lexemes round-trip untouched.
    let v = parse("[inf,nan]").unwrap();
    assert_eq!(v.to_string(), "[inf,nan]");

    // Promoted non-finite numbers have no JSON form and marshal as null.
    let v = parse("[inf,nan]").unwrap();
    for item in v.as_array().unwrap() {
        item.type_of();
    }
    assert_eq!(v.to_string(), "[null,null]");

    assert_eq!(Value::from(f64::INFINITY).to_string(), "null");
}
