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

use crate::constants::*;

#[allow(clippy::zero_prefixed_literal)]
pub(crate) static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[inline]
pub(crate) fn decode_hex4(s: &[u8]) -> Option<u16> {
    if s.len() < UNICODE_LEN {
        return None;
    }
    let mut n = 0u16;
    for &c in &s[..UNICODE_LEN] {
        let h = HEX[c as usize];
        if h == 255 {
            return None;
        }
        n = (n << 4) | h as u16;
    }
    Some(n)
}

/// Decodes the escaped interior of a JSON string (the quote-delimited range
/// without the surrounding quotes).
///
/// The decode never fails: a malformed escape keeps the backslash and the
/// offending bytes verbatim. A `\uXXXX` high surrogate directly followed by a
/// low surrogate escape combines into the encoded code point; a lone or
/// mismatched surrogate keeps its escape text untouched, so the output stays
/// valid UTF-8 whenever the input outside escapes was.
pub(crate) fn unescape_best_effort(raw: &[u8]) -> Cow<'_, [u8]> {
    let Some(n) = raw.iter().position(|&c| c == b'\\') else {
        // Fast path - nothing to unescape.
        return Cow::Borrowed(raw);
    };

    let mut buf = Vec::with_capacity(raw.len());
    buf.extend_from_slice(&raw[..n]);
    let mut s = &raw[n..];
    loop {
        // s starts at a backslash here.
        if s.len() < 2 {
            // Trailing backslash, kept verbatim.
            buf.extend_from_slice(s);
            break;
        }
        let ch = s[1];
        s = &s[2..];
        match ch {
            b'"' => buf.push(b'"'),
            b'\\' => buf.push(b'\\'),
            b'/' => buf.push(b'/'),
            b'b' => buf.push(b'\x08'),
            b'f' => buf.push(b'\x0C'),
            b'n' => buf.push(b'\n'),
            b'r' => buf.push(b'\r'),
            b't' => buf.push(b'\t'),
            b'u' => s = unescape_unicode(s, &mut buf),
            other => {
                // Unknown escape sequence, kept verbatim.
                buf.push(b'\\');
                buf.push(other);
            }
        }
        match s.iter().position(|&c| c == b'\\') {
            Some(n) => {
                buf.extend_from_slice(&s[..n]);
                s = &s[n..];
            }
            None => {
                buf.extend_from_slice(s);
                break;
            }
        }
    }
    Cow::Owned(buf)
}

// Handles the remainder of a `\u` escape. `s` points at the four hex digits;
// returns the input left after the consumed escape.
fn unescape_unicode<'a>(s: &'a [u8], buf: &mut Vec<u8>) -> &'a [u8] {
    let Some(n1) = decode_hex4(s) else {
        // Truncated or non-hex escape, kept verbatim.
        buf.extend_from_slice(b"\\u");
        return s;
    };
    match n1 {
        0xD800..=0xDBFF => {
            // High surrogate; a paired low surrogate escape must follow.
            let rest = &s[UNICODE_LEN..];
            if rest.len() >= 2 + UNICODE_LEN && rest[0] == b'\\' && rest[1] == b'u' {
                if let Some(n2) = decode_hex4(&rest[2..]) {
                    if (0xDC00..=0xDFFF).contains(&n2) {
                        let n = (((n1 - 0xD800) as u32) << 10 | (n2 - 0xDC00) as u32) + 0x1_0000;
                        push_code_point(buf, n);
                        return &rest[2 + UNICODE_LEN..];
                    }
                }
            }
            keep_unicode_escape(buf, s);
            &s[UNICODE_LEN..]
        }
        0xDC00..=0xDFFF => {
            // Lone low surrogate.
            keep_unicode_escape(buf, s);
            &s[UNICODE_LEN..]
        }
        n => {
            push_code_point(buf, n as u32);
            &s[UNICODE_LEN..]
        }
    }
}

// https://datatracker.ietf.org/doc/html/rfc8259#section-8.2
// RFC 8259 allows unpaired surrogates; their escape text is kept as-is.
#[inline]
fn keep_unicode_escape(buf: &mut Vec<u8>, s: &[u8]) {
    buf.extend_from_slice(b"\\u");
    buf.extend_from_slice(&s[..UNICODE_LEN]);
}

#[inline]
fn push_code_point(buf: &mut Vec<u8>, n: u32) {
    // Surrogates are filtered out by the caller, every remaining value is a
    // valid char.
    if let Some(c) = char::from_u32(n) {
        let mut tmp = [0u8; 4];
        buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
    }
}

/// Appends `s` as a quoted JSON string, escaping the minimal set: quote,
/// backslash and control bytes below 0x20.
pub(crate) fn escape_string(dst: &mut Vec<u8>, s: &[u8]) {
    dst.push(b'"');
    for &c in s {
        match c {
            b'"' => dst.extend_from_slice(b"\\\""),
            b'\\' => dst.extend_from_slice(b"\\\\"),
            b'\x08' => dst.extend_from_slice(b"\\b"),
            b'\x0C' => dst.extend_from_slice(b"\\f"),
            b'\n' => dst.extend_from_slice(b"\\n"),
            b'\r' => dst.extend_from_slice(b"\\r"),
            b'\t' => dst.extend_from_slice(b"\\t"),
            c if c < 0x20 => {
                dst.extend_from_slice(b"\\u00");
                dst.push(HEX_DIGITS[(c >> 4) as usize]);
                dst.push(HEX_DIGITS[(c & 0x0F) as usize]);
            }
            c => dst.push(c),
        }
    }
    dst.push(b'"');
}

/// Returns a bounded excerpt of `s` for error messages: the whole input when
/// short, otherwise its head and tail around a `...` marker.
pub(crate) fn start_end(s: &[u8]) -> String {
    if s.len() <= MAX_TAIL_EXCERPT_LEN {
        return String::from_utf8_lossy(s).into_owned();
    }
    let half = MAX_TAIL_EXCERPT_LEN / 2;
    let mut out = String::from_utf8_lossy(&s[..half]).into_owned();
    out.push_str("...");
    out.push_str(&String::from_utf8_lossy(&s[s.len() - half..]));
    out
}
