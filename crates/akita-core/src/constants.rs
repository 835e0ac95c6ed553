//! Fixed byte values of the KISS framing and Reticulum header layout

/// Frame start/end marker (FEND)
pub const FRAME_DELIMITER: u8 = 0xC0;

/// Byte-stuffing escape marker (FESC)
pub const ESCAPE: u8 = 0xDB;

/// Escaped encoding of [`FRAME_DELIMITER`] (TFEND)
pub const TRANSPOSED_DELIMITER: u8 = 0xDC;

/// Escaped encoding of [`ESCAPE`] (TFESC)
pub const TRANSPOSED_ESCAPE: u8 = 0xDD;

/// Optional KISS command byte announcing a data frame on port 0
pub const DATA_FRAME_COMMAND: u8 = 0x00;

/// Destination identifier length in bytes
pub const DESTINATION_ID_SIZE: usize = 16;

/// Minimum Reticulum header: flags + hops + destination + context
pub const HEADER_SIZE: usize = 1 + 1 + DESTINATION_ID_SIZE + 1;

/// Reticulum link MTU in bytes
pub const RETICULUM_MTU: usize = 500;

/// Default cap on bytes the deframer retains for an unterminated frame.
///
/// One MTU plus command byte with every byte escaped, plus both delimiters.
pub const DEFAULT_MAX_BUFFER: usize = 2 * (RETICULUM_MTU + 1) + 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(HEADER_SIZE, 19);
    }

    #[test]
    fn test_escape_codes_are_not_reserved() {
        for code in [TRANSPOSED_DELIMITER, TRANSPOSED_ESCAPE] {
            assert_ne!(code, FRAME_DELIMITER);
            assert_ne!(code, ESCAPE);
        }
    }
}
