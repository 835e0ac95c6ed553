//! Akita Wire - KISS framing and Reticulum packet headers
//!
//! Raw bytes flow through three strictly layered stages:
//! - [`Deframer`]: chunked byte stream to FEND-delimited raw frames
//! - [`decode`]: raw frame to unescaped payload
//! - [`Packet::parse`]: payload to a typed packet
//!
//! [`Ingestor`] chains all three and is the usual entry point.

pub mod context;
pub mod deframer;
pub mod flags;
pub mod header;
pub mod ingest;
pub mod kiss;

pub use context::*;
pub use deframer::*;
pub use flags::*;
pub use header::*;
pub use ingest::*;
pub use kiss::*;
