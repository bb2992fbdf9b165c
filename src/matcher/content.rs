// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Reading target files as text.

use std::path::Path;

use crate::error::FileAccessError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";

/// Read a target file. Binary content is an error, not a crash.
pub fn read_target(path: &Path) -> Result<String, FileAccessError> {
    let bytes = std::fs::read(path).map_err(|e| FileAccessError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    decode_text(&bytes).ok_or_else(|| FileAccessError::NotText {
        path: path.to_path_buf(),
    })
}

/// Decode UTF-8 or BOM-marked UTF-16 (`reg export` output).
///
/// Returns `None` for anything that does not decode or contains NUL.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let text = if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        decode_utf16(rest, u16::from_le_bytes)?
    } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        decode_utf16(rest, u16::from_be_bytes)?
    } else {
        let rest = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        String::from_utf8(rest.to_vec()).ok()?
    };

    if text.contains('\0') {
        None
    } else {
        Some(text)
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
