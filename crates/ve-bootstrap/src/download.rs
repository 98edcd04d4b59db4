//! Fetching remote files

use crate::config::InstallerConfig;
use crate::error::{Error, Result};
use std::io::Read;

/// Source of remote bytes.
///
/// The bootstrap only ever needs one blocking GET; tests substitute a
/// local implementation.
pub trait Download {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) client.
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    pub fn new(config: &InstallerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .build();
        Self { agent }
    }
}

impl Download for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let network_error = |message: String| Error::Network {
            url: url.to_string(),
            message,
        };

        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => network_error(format!("HTTP {}", code)),
            ureq::Error::Transport(transport) => network_error(transport.to_string()),
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| network_error(e.to_string()))?;
        Ok(bytes)
    }
}
