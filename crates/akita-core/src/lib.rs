//! Akita Core - Shared types for the KISS / Reticulum decoding pipeline
//!
//! This crate defines the pieces every layer agrees on:
//! - Byte-level framing constants (FEND, FESC, ...)
//! - The 16-byte destination identifier
//! - Fault types for each pipeline stage

pub mod constants;
pub mod error;
pub mod id;

pub use constants::*;
pub use error::*;
pub use id::*;
