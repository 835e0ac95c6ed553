//! Destination identifier
//!
//! Reticulum addresses a destination by a 16-byte truncated hash. The
//! parser accepts any 16 bytes; nothing here checks how they were derived.

use std::fmt;

use crate::DESTINATION_ID_SIZE;

/// 16-byte destination hash
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DestinationId(pub [u8; DESTINATION_ID_SIZE]);

impl DestinationId {
    pub const ZERO: DestinationId = DestinationId([0u8; DESTINATION_ID_SIZE]);

    #[inline]
    pub fn new(bytes: [u8; DESTINATION_ID_SIZE]) -> Self {
        DestinationId(bytes)
    }

    /// Copy an identifier out of a slice; `None` unless exactly 16 bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; DESTINATION_ID_SIZE] = bytes.try_into().ok()?;
        Some(DestinationId(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; DESTINATION_ID_SIZE] {
        &self.0
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; DESTINATION_ID_SIZE] {
        self.0
    }
}

impl From<[u8; DESTINATION_ID_SIZE]> for DestinationId {
    fn from(bytes: [u8; DESTINATION_ID_SIZE]) -> Self {
        DestinationId(bytes)
    }
}

impl fmt::Debug for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Destination({})", self)
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hex() {
        let mut bytes = [0u8; DESTINATION_ID_SIZE];
        bytes[0] = 0xAB;
        bytes[15] = 0x01;
        let id = DestinationId::new(bytes);
        assert_eq!(id.to_string(), "ab000000000000000000000000000001");
        assert_eq!(format!("{:?}", id), "Destination(ab000000000000000000000000000001)");
    }

    #[test]
    fn test_from_slice_length() {
        assert!(DestinationId::from_slice(&[0xAA; 16]).is_some());
        assert!(DestinationId::from_slice(&[0xAA; 15]).is_none());
        assert!(DestinationId::from_slice(&[0xAA; 17]).is_none());
        assert_eq!(
            DestinationId::from_slice(&[0xAA; 16]),
            Some(DestinationId([0xAA; 16]))
        );
    }
}
