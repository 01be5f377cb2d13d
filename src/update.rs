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

use crate::path::PathStep;
use crate::value::LazyStr;
use crate::value::Object;
use crate::value::Value;

impl<'a> Object<'a> {
    /// Sets the value for the given key: the first entry with a matching
    /// decoded key is replaced, otherwise a new entry is appended.
    pub fn set(&mut self, key: &str, value: Value<'a>) {
        self.mark_keys_unescaped();
        let pos = self
            .kvs_mut()
            .iter()
            .position(|(k, _)| k.as_bytes() == key.as_bytes());
        match pos {
            Some(pos) => self.kvs_mut()[pos].1 = value,
            None => {
                let key = LazyStr::from_decoded(Cow::Owned(key.as_bytes().to_vec()));
                self.push(key, value);
            }
        }
    }

    /// Removes the first entry with a matching key. No-op when absent.
    pub fn del(&mut self, key: &str) {
        self.mark_keys_unescaped();
        let pos = self
            .kvs_mut()
            .iter()
            .position(|(k, _)| k.as_bytes() == key.as_bytes());
        if let Some(pos) = pos {
            self.kvs_mut().remove(pos);
        }
    }
}

impl<'a> Value<'a> {
    /// Sets the entry under `key`.
    ///
    /// On an object this replaces the first matching entry or appends. On an
    /// array `key` is read as a decimal index: an existing slot is replaced,
    /// an index past the end pads the array with `null` first. An invalid
    /// index and a non-container value are no-ops.
    pub fn set(&mut self, key: &str, value: Value<'a>) {
        match self {
            Value::Object(obj) => obj.set(key, value),
            Value::Array(_) => {
                if let Ok(idx) = key.parse::<usize>() {
                    self.set_array_item(idx, value);
                }
            }
            _ => {}
        }
    }

    /// Sets the array slot at `idx`, padding with `null` values when the
    /// index is past the end. No-op on non-arrays.
    pub fn set_array_item(&mut self, idx: usize, value: Value<'a>) {
        if let Value::Array(values) = self {
            set_slot(values, idx, value);
        }
    }

    /// Deletes the entry under `key`: an object entry by name, an array slot
    /// by decimal index. No-op when absent or on scalar values.
    pub fn del(&mut self, key: &str) {
        match self {
            Value::Object(obj) => obj.del(key),
            Value::Array(values) => {
                if let Ok(idx) = key.parse::<usize>() {
                    if idx < values.len() {
                        values.remove(idx);
                    }
                }
            }
            _ => {}
        }
    }

    /// Sets the value at a typed path, creating missing intermediates.
    ///
    /// A missing object entry is created as an empty object, or as an empty
    /// array when the next step is an index. An `Index(-1)` step appends to
    /// its array; an index past the end pads the array with `null` slots.
    /// Steps through scalar values leave the tree unchanged.
    ///
    /// ```
    /// let mut v = lazyjson::parse(r#"{"arr":[0]}"#).unwrap();
    /// use lazyjson::PathStep;
    /// v.set_by_path(&[PathStep::Name("arr".into()), PathStep::Index(2)], 111i64.into());
    /// assert_eq!(v.to_string(), r#"{"arr":[0,null,111]}"#);
    /// ```
    pub fn set_by_path(&mut self, steps: &[PathStep<'_>], value: Value<'a>) {
        let Some((step, rest)) = steps.split_first() else {
            return;
        };

        match self {
            Value::Object(obj) => {
                let Some(key) = step.name() else {
                    return;
                };
                if rest.is_empty() {
                    obj.set(key, value);
                    return;
                }
                if obj.get(key).is_none() {
                    obj.set(key, empty_for(&rest[0]));
                }
                if let Some(child) = obj.get_mut(key) {
                    child.set_by_path(rest, value);
                }
            }
            Value::Array(values) => {
                let PathStep::Index(i) = step else {
                    return;
                };
                let idx = if *i == -1 {
                    values.len()
                } else if *i < 0 {
                    return;
                } else {
                    *i as usize
                };
                if rest.is_empty() {
                    set_slot(values, idx, value);
                    return;
                }
                if idx >= values.len() {
                    set_slot(values, idx, empty_for(&rest[0]));
                }
                if let Some(child) = values.get_mut(idx) {
                    child.set_by_path(rest, value);
                }
            }
            _ => {}
        }
    }
}

fn set_slot<'a>(values: &mut Vec<Value<'a>>, idx: usize, value: Value<'a>) {
    if idx < values.len() {
        values[idx] = value;
    } else {
        while values.len() < idx {
            values.push(Value::Null);
        }
        values.push(value);
    }
}

// The empty container an intermediate path step is created as.
fn empty_for<'a>(next: &PathStep<'_>) -> Value<'a> {
    match next {
        PathStep::Index(_) => Value::Array(Vec::new()),
        _ => Value::Object(Object::new()),
    }
}
