//! Deterministic structural hash of a JSON payload.
//!
//! Every node writes a one-byte type tag followed by its contents:
//! numbers as 8 little-endian bytes, strings and keys as a u64 length plus
//! UTF-8 bytes, arrays as a length plus elements, objects as a length plus
//! entries in key order. The byte stream is fed to 64-bit FNV-1a.

use std::hash::Hasher;

use fnv::FnvHasher;
use serde_json::Value;

/// Hash `value` independently of object key insertion order.
pub fn structural_hash(value: &Value) -> u64 {
    let mut hasher = FnvHasher::default();
    feed(&mut hasher, value);
    hasher.finish()
}

fn feed(hasher: &mut FnvHasher, value: &Value) {
    match value {
        Value::Null => hasher.write(b"n"),
        Value::Bool(false) => hasher.write(b"f"),
        Value::Bool(true) => hasher.write(b"t"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                hasher.write(b"i");
                hasher.write(&i.to_le_bytes());
            } else if let Some(u) = n.as_u64() {
                hasher.write(b"u");
                hasher.write(&u.to_le_bytes());
            } else if let Some(f) = n.as_f64() {
                hasher.write(b"d");
                hasher.write(&f.to_bits().to_le_bytes());
            } else {
                hasher.write(b"d");
                feed_str(hasher, &n.to_string());
            }
        }
        Value::String(s) => {
            hasher.write(b"s");
            feed_str(hasher, s);
        }
        Value::Array(items) => {
            hasher.write(b"a");
            hasher.write(&(items.len() as u64).to_le_bytes());
            for item in items {
                feed(hasher, item);
            }
        }
        Value::Object(map) => {
            hasher.write(b"o");
            hasher.write(&(map.len() as u64).to_le_bytes());
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (key, item) in entries {
                feed_str(hasher, key);
                feed(hasher, item);
            }
        }
    }
}

fn feed_str(hasher: &mut FnvHasher, s: &str) {
    hasher.write(&(s.len() as u64).to_le_bytes());
    hasher.write(s.as_bytes());
}
