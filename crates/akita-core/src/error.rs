//! Fault types for the decoding pipeline
//!
//! Every fault is recoverable. A stage reports it to its caller and the
//! pipeline keeps going with the next frame.

use thiserror::Error;

/// Deframer faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameFault {
    /// Retained partial frame outgrew the configured cap; the buffer was reset
    #[error("Frame too large: retained {retained} bytes, limit {limit}")]
    TooLarge { retained: usize, limit: usize },
}

/// Frame codec faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFault {
    #[error("Malformed frame: {len} bytes, need at least 2")]
    MalformedFrame { len: usize },

    /// Frame does not begin and end with FEND
    #[error("Invalid frame bounds: missing leading or trailing delimiter")]
    InvalidFrameBounds,
}

/// Header parser faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderFault {
    #[error("Truncated header: need {needed} bytes, got {got}")]
    TruncatedHeader { needed: usize, got: usize },
}

/// Any fault the pipeline can produce
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AkitaError {
    #[error(transparent)]
    Frame(#[from] FrameFault),

    #[error(transparent)]
    Decode(#[from] DecodeFault),

    #[error(transparent)]
    Header(#[from] HeaderFault),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Byte source errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AkitaError {
    fn from(e: std::io::Error) -> Self {
        AkitaError::Io(e.to_string())
    }
}

/// Result type for Akita operations
pub type AkitaResult<T> = Result<T, AkitaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        let fault = HeaderFault::TruncatedHeader { needed: 19, got: 18 };
        assert_eq!(fault.to_string(), "Truncated header: need 19 bytes, got 18");

        let fault = FrameFault::TooLarge { retained: 2000, limit: 1004 };
        assert_eq!(
            fault.to_string(),
            "Frame too large: retained 2000 bytes, limit 1004"
        );
    }

    #[test]
    fn test_any_fault_is_transparent() {
        let err: AkitaError = DecodeFault::MalformedFrame { len: 1 }.into();
        assert_eq!(err.to_string(), "Malformed frame: 1 bytes, need at least 2");
        assert_eq!(err, AkitaError::Decode(DecodeFault::MalformedFrame { len: 1 }));
    }
}
