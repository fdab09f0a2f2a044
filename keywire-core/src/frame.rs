//! Wire framing and the payload tag convention.
//!
//! Wire format:
//! ```text
//! +----------------+-------------------+
//! | LENGTH (4B BE) | PAYLOAD (N bytes) |
//! +----------------+-------------------+
//! ```
//!
//! The length prefix is always big-endian on the wire regardless of host
//! byte order. Encoding and decoding are explicit byte-array operations so
//! they can be tested in isolation.
//!
//! Handshake payloads carry a 3-byte ASCII tag (`"pk~"` or `"ss~"`) ahead
//! of the body. The tag is a labelling convention for humans reading logs;
//! the receiver strips it without branching on its value.

use crate::error::FrameError;

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Tag size in bytes.
pub const TAG_LEN: usize = 3;

/// Tag prefixed to an encoded public key payload.
pub const PUBLIC_KEY_TAG: &str = "pk~";

/// Tag prefixed to a derived shared secret payload.
pub const SHARED_SECRET_TAG: &str = "ss~";

/// Encode a payload length as the 4-byte big-endian wire prefix.
///
/// # Errors
///
/// Returns `FrameError::PayloadTooLarge` if the length does not fit in an
/// unsigned 32-bit field.
pub fn encode_length(len: usize) -> Result<[u8; LENGTH_PREFIX_SIZE], FrameError> {
    let len = u32::try_from(len).map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(len.to_be_bytes())
}

/// Decode a 4-byte big-endian wire prefix into a payload length.
///
/// Zero is a valid length; the frame that follows is empty.
pub fn decode_length(bytes: &[u8; LENGTH_PREFIX_SIZE]) -> usize {
    u32::from_be_bytes(*bytes) as usize
}

/// Build a tagged payload: tag bytes immediately followed by the body,
/// no separator.
pub fn tag_payload(tag: &str, body: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(tag.len() + body.len());
    payload.extend_from_slice(tag.as_bytes());
    payload.extend_from_slice(body);
    payload
}

/// Split a received payload into its 3-byte tag and body.
///
/// The tag is returned for display only; callers must not branch on it.
///
/// # Errors
///
/// Returns `FrameError::MissingTag` if the payload is shorter than the tag.
pub fn split_tag(payload: &[u8]) -> Result<(&[u8], &[u8]), FrameError> {
    if payload.len() < TAG_LEN {
        return Err(FrameError::MissingTag);
    }
    Ok(payload.split_at(TAG_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_roundtrip() {
        for len in [0usize, 1, 3, 255, 256, 65_535, 65_536, 16_777_216] {
            let encoded = encode_length(len).unwrap();
            assert_eq!(decode_length(&encoded), len);
        }
    }

    #[test]
    fn test_length_wire_layout_is_big_endian() {
        // 258 = 0x00000102 must serialize most-significant byte first,
        // independent of host byte order.
        assert_eq!(encode_length(258).unwrap(), [0x00, 0x00, 0x01, 0x02]);
        assert_eq!(decode_length(&[0x00, 0x00, 0x01, 0x02]), 258);
    }

    #[test]
    fn test_length_zero() {
        assert_eq!(encode_length(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(decode_length(&[0, 0, 0, 0]), 0);
    }

    #[test]
    fn test_length_max() {
        let max = u32::MAX as usize;
        assert_eq!(encode_length(max).unwrap(), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_length(&[0xFF, 0xFF, 0xFF, 0xFF]), max);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_length_overflow_rejected() {
        let too_large = (u32::MAX as usize) + 1;
        assert_eq!(encode_length(too_large), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_tag_payload_layout() {
        let payload = tag_payload(PUBLIC_KEY_TAG, b"AQID");
        assert_eq!(&payload, b"pk~AQID");
    }

    #[test]
    fn test_split_tag_roundtrip() {
        let payload = tag_payload(SHARED_SECRET_TAG, b"c2VjcmV0");
        let (tag, body) = split_tag(&payload).unwrap();
        assert_eq!(tag, b"ss~");
        assert_eq!(body, b"c2VjcmV0");
    }

    #[test]
    fn test_split_tag_empty_body() {
        let (tag, body) = split_tag(b"pk~").unwrap();
        assert_eq!(tag, b"pk~");
        assert!(body.is_empty());
    }

    #[test]
    fn test_split_tag_too_short() {
        assert_eq!(split_tag(b""), Err(FrameError::MissingTag));
        assert_eq!(split_tag(b"pk"), Err(FrameError::MissingTag));
    }
}
