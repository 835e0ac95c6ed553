//! Reticulum header flags byte
//!
//! Bit layout (bit 0 = least significant):
//! - Bits 0-1: Packet type
//! - Bits 2-3: Destination type
//! - Bit 4: Propagation type
//! - Bit 5: Context flag
//! - Bit 6: Header type
//! - Bit 7: Interface access code (IFAC) flag
//!
//! Every bit pattern is meaningful, so decomposition never fails.

use std::fmt;

const PACKET_TYPE_SHIFT: u8 = 0;
const DESTINATION_TYPE_SHIFT: u8 = 2;
const PROPAGATION_SHIFT: u8 = 4;
const CONTEXT_FLAG_SHIFT: u8 = 5;
const HEADER_TYPE_SHIFT: u8 = 6;
const IFAC_SHIFT: u8 = 7;

const TWO_BITS: u8 = 0b11;
const ONE_BIT: u8 = 0b1;

/// Packet type (bits 0-1)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    #[default]
    Data = 0,
    Announce = 1,
    LinkRequest = 2,
    Proof = 3,
}

impl PacketType {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & TWO_BITS {
            0 => PacketType::Data,
            1 => PacketType::Announce,
            2 => PacketType::LinkRequest,
            _ => PacketType::Proof,
        }
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PacketType::Data => "DATA",
            PacketType::Announce => "ANNOUNCE",
            PacketType::LinkRequest => "LINKREQUEST",
            PacketType::Proof => "PROOF",
        }
    }
}

/// Destination type (bits 2-3)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DestinationType {
    #[default]
    Single = 0,
    Group = 1,
    Plain = 2,
    Link = 3,
}

impl DestinationType {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & TWO_BITS {
            0 => DestinationType::Single,
            1 => DestinationType::Group,
            2 => DestinationType::Plain,
            _ => DestinationType::Link,
        }
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DestinationType::Single => "SINGLE",
            DestinationType::Group => "GROUP",
            DestinationType::Plain => "PLAIN",
            DestinationType::Link => "LINK",
        }
    }
}

/// Propagation type (bit 4)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PropagationType {
    #[default]
    Broadcast = 0,
    Transport = 1,
}

impl PropagationType {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        if bits & ONE_BIT == 0 {
            PropagationType::Broadcast
        } else {
            PropagationType::Transport
        }
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PropagationType::Broadcast => "BROADCAST",
            PropagationType::Transport => "TRANSPORT",
        }
    }
}

/// Header layout version (bit 6)
///
/// Only `Header1` is decoded; `Header2` carries an extra transport id that
/// this crate does not interpret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HeaderType {
    #[default]
    Header1 = 0,
    Header2 = 1,
}

impl HeaderType {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        if bits & ONE_BIT == 0 {
            HeaderType::Header1
        } else {
            HeaderType::Header2
        }
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HeaderType::Header1 => "HEADER_1",
            HeaderType::Header2 => "HEADER_2",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

display_by_name!(PacketType, DestinationType, PropagationType, HeaderType);

/// Decomposed flags byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PacketFlags {
    pub packet_type: PacketType,
    pub destination_type: DestinationType,
    pub propagation: PropagationType,
    pub context_flag: bool,
    pub header_type: HeaderType,
    /// Interface access code present
    pub ifac: bool,
}

impl PacketFlags {
    /// Split a flags byte into its six sub-fields
    pub fn from_byte(b: u8) -> Self {
        PacketFlags {
            packet_type: PacketType::from_bits(b >> PACKET_TYPE_SHIFT),
            destination_type: DestinationType::from_bits(b >> DESTINATION_TYPE_SHIFT),
            propagation: PropagationType::from_bits(b >> PROPAGATION_SHIFT),
            context_flag: (b >> CONTEXT_FLAG_SHIFT) & ONE_BIT != 0,
            header_type: HeaderType::from_bits(b >> HEADER_TYPE_SHIFT),
            ifac: (b >> IFAC_SHIFT) & ONE_BIT != 0,
        }
    }

    /// Pack the sub-fields back into one byte
    pub fn to_byte(self) -> u8 {
        (self.packet_type.to_bits() << PACKET_TYPE_SHIFT)
            | (self.destination_type.to_bits() << DESTINATION_TYPE_SHIFT)
            | (self.propagation.to_bits() << PROPAGATION_SHIFT)
            | ((self.context_flag as u8) << CONTEXT_FLAG_SHIFT)
            | (self.header_type.to_bits() << HEADER_TYPE_SHIFT)
            | ((self.ifac as u8) << IFAC_SHIFT)
    }
}

impl From<u8> for PacketFlags {
    fn from(b: u8) -> Self {
        PacketFlags::from_byte(b)
    }
}

impl From<PacketFlags> for u8 {
    fn from(flags: PacketFlags) -> Self {
        flags.to_byte()
    }
}

impl fmt::Display for PacketFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.packet_type, self.destination_type, self.propagation, self.header_type
        )?;
        if self.context_flag {
            f.write_str(" CTX")?;
        }
        if self.ifac {
            f.write_str(" IFAC")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_announce_group() {
        let flags = PacketFlags::from_byte(0b1010_0101);

        assert_eq!(flags.packet_type, PacketType::Announce);
        assert_eq!(flags.destination_type, DestinationType::Group);
        assert_eq!(flags.propagation, PropagationType::Broadcast);
        assert!(flags.context_flag);
        assert_eq!(flags.header_type, HeaderType::Header1);
        assert!(flags.ifac);
    }

    #[test]
    fn test_every_byte_roundtrips() {
        for b in 0..=u8::MAX {
            assert_eq!(PacketFlags::from_byte(b).to_byte(), b);
        }
    }

    #[test]
    fn test_field_isolation() {
        let flags = PacketFlags::from_byte(0b0101_1011);
        assert_eq!(flags.packet_type, PacketType::Proof);
        assert_eq!(flags.destination_type, DestinationType::Plain);
        assert_eq!(flags.propagation, PropagationType::Transport);
        assert!(!flags.context_flag);
        assert_eq!(flags.header_type, HeaderType::Header2);
        assert!(!flags.ifac);
    }

    #[test]
    fn test_display_names() {
        let flags = PacketFlags {
            packet_type: PacketType::LinkRequest,
            destination_type: DestinationType::Link,
            context_flag: true,
            ..Default::default()
        };
        assert_eq!(flags.to_string(), "LINKREQUEST LINK BROADCAST HEADER_1 CTX");
    }
}
