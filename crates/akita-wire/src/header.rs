//! Reticulum packet header
//!
//! Header layout (offsets after the optional KISS command byte):
//! - Byte 0: Flags
//! - Byte 1: Hops
//! - Bytes 2-17: Destination hash
//! - Byte 18: Context
//! - Bytes 19..: Data
//!
//! There is no checksum; integrity rests on the framing and length checks.

use akita_core::{DestinationId, HeaderFault, DATA_FRAME_COMMAND, DESTINATION_ID_SIZE, HEADER_SIZE};

use crate::{encode, encode_data_frame, Context, PacketFlags};

const FLAGS_OFFSET: usize = 0;
const HOPS_OFFSET: usize = 1;
const DESTINATION_OFFSET: usize = 2;
const CONTEXT_OFFSET: usize = DESTINATION_OFFSET + DESTINATION_ID_SIZE;

/// Link sequence number size in bytes
pub const SEQUENCE_SIZE: usize = 2;

/// A decoded Reticulum packet
///
/// Owns its data; nothing borrows from the deframer's buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    pub flags: PacketFlags,
    pub hops: u8,
    pub destination: DestinationId,
    /// Raw context byte; see [`Packet::context`] for the classification
    pub context: u8,
    pub data: Vec<u8>,
}

impl Packet {
    pub fn new(flags: PacketFlags, destination: DestinationId) -> Self {
        Packet {
            flags,
            hops: 0,
            destination,
            context: Context::NONE,
            data: Vec::new(),
        }
    }

    /// Parse an unescaped frame payload.
    ///
    /// A leading `0x00` is taken as the KISS data-frame command and skipped,
    /// so payloads with and without the command byte both parse. A header
    /// whose flags byte is itself `0x00` therefore needs the command byte.
    pub fn parse(payload: &[u8]) -> Result<Self, HeaderFault> {
        let offset = command_offset(payload);
        Self::parse_at(payload, offset)
    }

    /// Parse a payload known to carry no command byte
    pub fn parse_header_only(buf: &[u8]) -> Result<Self, HeaderFault> {
        Self::parse_at(buf, 0)
    }

    fn parse_at(payload: &[u8], offset: usize) -> Result<Self, HeaderFault> {
        let needed = offset + HEADER_SIZE;
        if payload.len() < needed {
            return Err(HeaderFault::TruncatedHeader {
                needed,
                got: payload.len(),
            });
        }

        let buf = &payload[offset..];

        let flags = PacketFlags::from_byte(buf[FLAGS_OFFSET]);
        let hops = buf[HOPS_OFFSET];

        let destination = DestinationId::from_slice(&buf[DESTINATION_OFFSET..CONTEXT_OFFSET])
            .ok_or(HeaderFault::TruncatedHeader {
                needed,
                got: payload.len(),
            })?;

        let context = buf[CONTEXT_OFFSET];
        let data = buf[HEADER_SIZE..].to_vec();

        Ok(Packet {
            flags,
            hops,
            destination,
            context,
            data,
        })
    }

    /// Classified context byte
    #[inline]
    pub fn context(&self) -> Context {
        Context::from_byte(self.context)
    }

    /// Big-endian sequence number leading the data of LINK_DATA and ACK packets
    pub fn link_sequence(&self) -> Option<u16> {
        if !self.context().carries_sequence() || self.data.len() < SEQUENCE_SIZE {
            return None;
        }
        Some(u16::from_be_bytes([self.data[0], self.data[1]]))
    }

    /// Serialized length (header + data, no command byte)
    #[inline]
    pub fn size(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }

    /// Serialize into `buf`, returning the number of bytes written
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, HeaderFault> {
        let size = self.size();
        if buf.len() < size {
            return Err(HeaderFault::TruncatedHeader {
                needed: size,
                got: buf.len(),
            });
        }

        buf[FLAGS_OFFSET] = self.flags.to_byte();
        buf[HOPS_OFFSET] = self.hops;
        buf[DESTINATION_OFFSET..CONTEXT_OFFSET].copy_from_slice(self.destination.as_bytes());
        buf[CONTEXT_OFFSET] = self.context;
        buf[HEADER_SIZE..size].copy_from_slice(&self.data);

        Ok(size)
    }

    /// Serialize to a new Vec
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size());
        buf.push(self.flags.to_byte());
        buf.push(self.hops);
        buf.extend_from_slice(self.destination.as_bytes());
        buf.push(self.context);
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Full KISS frame, optionally with the data-frame command byte
    pub fn to_kiss_frame(&self, with_command: bool) -> Vec<u8> {
        let bytes = self.to_bytes();
        if with_command {
            encode_data_frame(&bytes)
        } else {
            encode(&bytes)
        }
    }
}

/// Parse an unescaped frame payload into a packet
pub fn parse_header(payload: &[u8]) -> Result<Packet, HeaderFault> {
    Packet::parse(payload)
}

fn command_offset(payload: &[u8]) -> usize {
    match payload.first() {
        Some(&DATA_FRAME_COMMAND) => 1,
        _ => 0,
    }
}

/// Packet builder for convenient construction
pub struct PacketBuilder {
    packet: Packet,
}

impl PacketBuilder {
    pub fn new(destination: DestinationId) -> Self {
        PacketBuilder {
            packet: Packet::new(PacketFlags::default(), destination),
        }
    }

    pub fn flags(mut self, flags: PacketFlags) -> Self {
        self.packet.flags = flags;
        self
    }

    pub fn hops(mut self, hops: u8) -> Self {
        self.packet.hops = hops;
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.packet.context = context.to_byte();
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.packet.data = data;
        self
    }

    pub fn build(self) -> Packet {
        self.packet
    }
}
