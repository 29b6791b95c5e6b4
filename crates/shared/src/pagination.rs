//! Cursor-based pagination for the punch log.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

/// Error type for cursor operations.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Invalid cursor format")]
    InvalidFormat,
    #[error("Invalid cursor encoding")]
    InvalidEncoding,
    #[error("Invalid ID in cursor")]
    InvalidId,
}

/// Encodes a punch-log cursor from a raw timestamp and row ID.
///
/// The cursor format is: base64(timestamp:id). The timestamp is the stored
/// lexical string, so the composite cursor resumes a keyset scan even when
/// several punches share one timestamp.
pub fn encode_cursor(timestamp: &str, id: i64) -> String {
    let raw = format!("{timestamp}:{id}");
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a punch-log cursor into `(timestamp, id)`.
pub fn decode_cursor(cursor: &str) -> Result<(String, i64), CursorError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| CursorError::InvalidEncoding)?;

    let s = String::from_utf8(decoded).map_err(|_| CursorError::InvalidFormat)?;

    // Split on last colon (the timestamp itself contains colons)
    let colon_pos = s.rfind(':').ok_or(CursorError::InvalidFormat)?;

    let timestamp = &s[..colon_pos];
    let id_str = &s[colon_pos + 1..];

    if timestamp.is_empty() {
        return Err(CursorError::InvalidFormat);
    }

    let id: i64 = id_str.parse().map_err(|_| CursorError::InvalidId)?;

    Ok((timestamp.to_string(), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let cursor = encode_cursor("2024-03-01 08:55:00", 42);
        let (ts, id) = decode_cursor(&cursor).unwrap();
        assert_eq!(ts, "2024-03-01 08:55:00");
        assert_eq!(id, 42);
    }

    #[test]
    fn test_cursor_timestamp_with_t_separator() {
        let cursor = encode_cursor("2024-03-01T08:55:00Z", 7);
        let (ts, id) = decode_cursor(&cursor).unwrap();
        assert_eq!(ts, "2024-03-01T08:55:00Z");
        assert_eq!(id, 7);
    }

    #[test]
    fn test_cursor_is_url_safe() {
        let cursor = encode_cursor("2024-03-01 08:55:00", 123456789);
        assert!(!cursor.contains('+'));
        assert!(!cursor.contains('/'));
        assert!(!cursor.contains('='));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            decode_cursor("not base64 !!!"),
            Err(CursorError::InvalidEncoding)
        ));
    }

    #[test]
    fn test_decode_rejects_missing_colon() {
        let cursor = URL_SAFE_NO_PAD.encode(b"no-separator");
        assert!(matches!(
            decode_cursor(&cursor),
            Err(CursorError::InvalidFormat)
        ));
    }

    #[test]
    fn test_decode_rejects_bad_id() {
        let cursor = URL_SAFE_NO_PAD.encode(b"2024-03-01 08:55:00:abc");
        assert!(matches!(decode_cursor(&cursor), Err(CursorError::InvalidId)));
    }
}
