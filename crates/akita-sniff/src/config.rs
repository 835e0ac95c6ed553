//! Sniffer configuration from arguments and environment

use std::path::PathBuf;

use akita_core::{AkitaError, AkitaResult};
use akita_wire::{DeframerConfig, IngestConfig};

/// Cap on retained partial-frame bytes; 0 disables the cap
pub const ENV_MAX_BUFFER: &str = "AKITA_MAX_BUFFER";

/// Bytes requested per read from the source
pub const ENV_CHUNK_SIZE: &str = "AKITA_CHUNK_SIZE";

pub const DEFAULT_CHUNK_SIZE: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SniffConfig {
    /// Capture file; stdin when absent
    pub input: Option<PathBuf>,
    pub chunk_size: usize,
    pub ingest: IngestConfig,
}

impl Default for SniffConfig {
    fn default() -> Self {
        SniffConfig {
            input: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            ingest: IngestConfig::default(),
        }
    }
}

impl SniffConfig {
    /// Build from positional arguments (program name excluded) and an
    /// environment lookup
    pub fn from_sources<I, F>(args: I, env: F) -> AkitaResult<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SniffConfig::default();

        let mut args = args.into_iter();
        if let Some(path) = args.next() {
            if path != "-" {
                config.input = Some(PathBuf::from(path));
            }
        }
        if let Some(extra) = args.next() {
            return Err(AkitaError::InvalidConfig(format!(
                "unexpected argument: {}",
                extra
            )));
        }

        if let Some(value) = env(ENV_MAX_BUFFER) {
            config.ingest.deframer = match parse_usize(ENV_MAX_BUFFER, &value)? {
                0 => DeframerConfig::unbounded(),
                n => DeframerConfig::with_max_buffer(n),
            };
        }

        if let Some(value) = env(ENV_CHUNK_SIZE) {
            config.chunk_size = parse_usize(ENV_CHUNK_SIZE, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AkitaResult<()> {
        if self.chunk_size == 0 {
            return Err(AkitaError::InvalidConfig(format!(
                "{} must be greater than zero",
                ENV_CHUNK_SIZE
            )));
        }
        self.ingest.validate()
    }
}

fn parse_usize(name: &str, value: &str) -> AkitaResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| AkitaError::InvalidConfig(format!("{}: not a number: {:?}", name, value)))
}
