// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Windows registry export values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `hex:..`, `hex(2):..`, `hex(7):..` values from `reg export`.
    static ref HEX_VALUE: Regex =
        Regex::new(r"^hex(?:\([0-9a-fA-F]+\))?:(?P<bytes>[0-9a-fA-F,\s\\]*)$").unwrap();
}

/// Decode a hex-encoded registry value to text.
///
/// NUL bytes are dropped, which turns UTF-16LE strings into plain ASCII.
/// Returns `None` when `value` is not a hex value.
pub fn decode_registry_value(value: &str) -> Option<String> {
    let caps = HEX_VALUE.captures(value.trim())?;

    let mut digits = String::new();
    for byte in caps["bytes"]
        .split(|c: char| c == ',' || c == '\\' || c.is_whitespace())
        .filter(|b| !b.is_empty())
    {
        if byte.len() != 2 {
            return None;
        }
        if byte != "00" {
            digits.push_str(byte);
        }
    }

    let bytes = hex::decode(&digits).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
