//! ETag derivation from a structured payload.

use serde_json::Value;

use super::hash::structural_hash;

/// Number of hex digits in an ETag.
pub const ETAG_DIGITS: usize = 8;

/// A payload is empty when it is null, `{}` or `[]`.
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Render the low `digits * 4` bits of `value` as lowercase hex, zero padded.
pub fn hex_digits(value: u64, digits: usize) -> String {
    let masked = if digits >= 16 {
        value
    } else {
        value & ((1u64 << (digits * 4)) - 1)
    };
    format!("{:0width$x}", masked, width = digits)
}

/// Quote a hash as an ETag header value.
pub fn format_etag(hash: u64) -> String {
    format!("\"{}\"", hex_digits(hash, ETAG_DIGITS))
}

/// Tag for `payload`, or `None` when there is nothing to tag.
pub fn etag_for(payload: &Value) -> Option<String> {
    if is_empty_payload(payload) {
        return None;
    }
    Some(format_etag(structural_hash(payload)))
}
