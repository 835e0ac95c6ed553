//! KISS frame codec
//!
//! A frame on the wire is `FEND payload FEND` with reserved bytes in the
//! payload byte-stuffed:
//! - `FEND` (0xC0) becomes `FESC TFEND` (0xDB 0xDC)
//! - `FESC` (0xDB) becomes `FESC TFESC` (0xDB 0xDD)
//!
//! Decoding is lenient in two places:
//! an escape followed by anything other than TFEND/TFESC yields the following
//! byte unmodified, and an escape that is the last byte before the closing
//! delimiter is dropped.

use akita_core::{
    DecodeFault, DATA_FRAME_COMMAND, ESCAPE, FRAME_DELIMITER, TRANSPOSED_DELIMITER,
    TRANSPOSED_ESCAPE,
};
use bytes::Bytes;

/// A delimited, still-escaped frame as cut out of the byte stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFrame(Bytes);

impl RawFrame {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        RawFrame(bytes.into())
    }

    /// Full frame including both delimiters
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Escaped bytes between the delimiters
    pub fn interior(&self) -> &[u8] {
        if self.0.len() < 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    /// No bytes between the delimiters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.len() <= 2
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn decode(&self) -> Result<Vec<u8>, DecodeFault> {
        decode(&self.0)
    }
}

impl AsRef<[u8]> for RawFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Strip the delimiters from a frame and reverse byte-stuffing
pub fn decode(frame: &[u8]) -> Result<Vec<u8>, DecodeFault> {
    if frame.len() < 2 {
        return Err(DecodeFault::MalformedFrame { len: frame.len() });
    }
    if frame[0] != FRAME_DELIMITER || frame[frame.len() - 1] != FRAME_DELIMITER {
        return Err(DecodeFault::InvalidFrameBounds);
    }

    Ok(unescape(&frame[1..frame.len() - 1]))
}

/// Reverse byte-stuffing on an undelimited payload
pub fn unescape(escaped: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(escaped.len());
    let mut bytes = escaped.iter().copied();

    while let Some(b) = bytes.next() {
        if b != ESCAPE {
            out.push(b);
            continue;
        }
        // Dangling escape at the end is dropped
        match bytes.next() {
            Some(TRANSPOSED_DELIMITER) => out.push(FRAME_DELIMITER),
            Some(TRANSPOSED_ESCAPE) => out.push(ESCAPE),
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

/// Apply byte-stuffing without adding delimiters
pub fn escape(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 16 + 2);
    escape_into(payload, &mut out);
    out
}

fn escape_into(payload: &[u8], out: &mut Vec<u8>) {
    for &b in payload {
        match b {
            FRAME_DELIMITER => out.extend_from_slice(&[ESCAPE, TRANSPOSED_DELIMITER]),
            ESCAPE => out.extend_from_slice(&[ESCAPE, TRANSPOSED_ESCAPE]),
            _ => out.push(b),
        }
    }
}

/// Escape a payload and wrap it in delimiters
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 16 + 2);
    out.push(FRAME_DELIMITER);
    escape_into(payload, &mut out);
    out.push(FRAME_DELIMITER);
    out
}

/// Encode a payload as a KISS data frame (command byte 0x00 on port 0)
pub fn encode_data_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 16 + 3);
    out.push(FRAME_DELIMITER);
    out.push(DATA_FRAME_COMMAND);
    escape_into(payload, &mut out);
    out.push(FRAME_DELIMITER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_escapes_reserved_bytes() {
        let input = [0x01, FRAME_DELIMITER, 0x02, ESCAPE, 0x03];
        let out = encode(&input);

        assert_eq!(
            out,
            vec![0xC0, 0x01, 0xDB, 0xDC, 0x02, 0xDB, 0xDD, 0x03, 0xC0]
        );
    }

    #[test]
    fn test_decode_reverses_encode() {
        let input = [0x01, FRAME_DELIMITER, 0x02, ESCAPE, 0x03];
        assert_eq!(decode(&encode(&input)).unwrap(), input.to_vec());
    }

    #[test]
    fn test_decode_empty_frame() {
        assert_eq!(decode(&[0xC0, 0xC0]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(decode(&[]), Err(DecodeFault::MalformedFrame { len: 0 }));
        assert_eq!(decode(&[0xC0]), Err(DecodeFault::MalformedFrame { len: 1 }));
    }

    #[test]
    fn test_decode_missing_delimiters() {
        assert_eq!(decode(&[0x01, 0x02, 0xC0]), Err(DecodeFault::InvalidFrameBounds));
        assert_eq!(decode(&[0xC0, 0x02, 0x03]), Err(DecodeFault::InvalidFrameBounds));
    }

    #[test]
    fn test_unknown_escape_yields_next_byte() {
        assert_eq!(decode(&[0xC0, 0xDB, 0x41, 0x42, 0xC0]).unwrap(), vec![0x41, 0x42]);
    }

    #[test]
    fn test_dangling_escape_is_dropped() {
        assert_eq!(decode(&[0xC0, 0x41, 0xDB, 0xC0]).unwrap(), vec![0x41]);
        assert_eq!(decode(&[0xC0, 0xDB, 0xC0]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_data_frame_prefix() {
        let out = encode_data_frame(&[0xC0]);
        assert_eq!(out, vec![0xC0, 0x00, 0xDB, 0xDC, 0xC0]);
    }

    #[test]
    fn test_raw_frame_interior() {
        let frame = RawFrame::new(vec![0xC0, 0x01, 0x02, 0xC0]);
        assert_eq!(frame.interior(), &[0x01, 0x02]);
        assert!(!frame.is_empty());
        assert!(RawFrame::new(vec![0xC0, 0xC0]).is_empty());
    }
}
