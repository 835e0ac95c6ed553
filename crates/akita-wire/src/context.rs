//! Context byte classification
//!
//! The context byte is advisory metadata. Unrecognized values map to
//! [`Context::Unknown`] and never make a packet invalid.

use std::fmt;

/// Known context values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    None,
    LinkRequest,
    LinkClose,
    LinkData,
    Ack,
    LocalCommand,
    Unknown(u8),
}

impl Context {
    pub const NONE: u8 = 0x00;
    pub const LINK_REQUEST: u8 = 0xA1;
    pub const LINK_CLOSE: u8 = 0xA2;
    pub const LINK_DATA: u8 = 0xA3;
    pub const ACK: u8 = 0xA4;
    pub const LOCAL_COMMAND: u8 = 0xFE;

    pub fn from_byte(b: u8) -> Self {
        match b {
            Self::NONE => Context::None,
            Self::LINK_REQUEST => Context::LinkRequest,
            Self::LINK_CLOSE => Context::LinkClose,
            Self::LINK_DATA => Context::LinkData,
            Self::ACK => Context::Ack,
            Self::LOCAL_COMMAND => Context::LocalCommand,
            other => Context::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Context::None => Self::NONE,
            Context::LinkRequest => Self::LINK_REQUEST,
            Context::LinkClose => Self::LINK_CLOSE,
            Context::LinkData => Self::LINK_DATA,
            Context::Ack => Self::ACK,
            Context::LocalCommand => Self::LOCAL_COMMAND,
            Context::Unknown(b) => b,
        }
    }

    /// Contexts whose data starts with a big-endian 16-bit sequence number
    #[inline]
    pub fn carries_sequence(self) -> bool {
        matches!(self, Context::LinkData | Context::Ack)
    }

    #[inline]
    pub fn is_known(self) -> bool {
        !matches!(self, Context::Unknown(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            Context::None => "NONE",
            Context::LinkRequest => "LINK_REQUEST",
            Context::LinkClose => "LINK_CLOSE",
            Context::LinkData => "LINK_DATA",
            Context::Ack => "ACK",
            Context::LocalCommand => "LOCAL_COMMAND",
            Context::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<u8> for Context {
    fn from(b: u8) -> Self {
        Context::from_byte(b)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} ({})", self.to_byte(), self.name())
    }
}
