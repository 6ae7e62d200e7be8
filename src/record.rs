//! Record encoding
//!
//! A record is `key`, one delimiter byte, then `value`. There is no length
//! prefix and no escaping, so the log cannot be parsed without the index.
//!
//! ```text
//! ┌─────────────┬─────┬───────────────┐
//! │ key bytes   │ ':' │ value bytes   │
//! └─────────────┴─────┴───────────────┘
//! ```

/// Separator between key and value inside a record
pub const DELIMITER: u8 = b':';

/// Encode a key/value pair as `key:value`
pub fn encode(key: &str, value: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(key.len() + 1 + value.len());
    buf.extend_from_slice(key.as_bytes());
    buf.push(DELIMITER);
    buf.extend_from_slice(value.as_bytes());
    buf
}

/// Number of bytes `encode(key, value)` produces
pub fn encoded_len(key: &str, value: &str) -> u64 {
    (key.len() + 1 + value.len()) as u64
}

/// Extract the value from an encoded record.
///
/// Returns the segment after the *last* delimiter. A value that itself
/// contains `':'` comes back truncated to its final segment; an empty span
/// decodes to an empty string.
pub fn decode_value(bytes: &[u8]) -> String {
    let tail = match bytes.iter().rposition(|&b| b == DELIMITER) {
        Some(pos) => &bytes[pos + 1..],
        None => bytes,
    };
    String::from_utf8_lossy(tail).into_owned()
}
