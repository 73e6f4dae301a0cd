use folio_config::constants::{FOLIO_CONTENT_PORT, FOLIO_SITES_ROOT};
use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONTENT_PORT: u16 = 4120;
pub const DEFAULT_SITES_ROOT: &str = "sites";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    pub port: u16,
    pub sites_root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_CONTENT_PORT,
            sites_root: PathBuf::from(DEFAULT_SITES_ROOT),
        }
    }
}

impl ContentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(FOLIO_CONTENT_PORT) {
            Ok(raw) => raw.trim().parse::<u16>()?,
            Err(_) => DEFAULT_CONTENT_PORT,
        };

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let sites_root = env::var(FOLIO_SITES_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SITES_ROOT));

        Ok(Self { port, sites_root })
    }
}
