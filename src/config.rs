//! Configuration for devlink
//!
//! Centralized configuration with sensible defaults, plus the loader for the
//! line-oriented `config.ini` file shipped next to DeviceLink tools.

use std::fs;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::{LinkError, Result};

/// Default receive timeout, matching the simulator's answer latency budget
pub const DEFAULT_RECEIVE_TIMEOUT_MS: u64 = 250;

/// Main configuration for a DeviceLink connection
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Host the simulator listens on
    pub host: String,

    /// UDP port the simulator listens on
    pub port: u16,

    /// How long one query waits for an answer (milliseconds)
    pub receive_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 21100,
            receive_timeout_ms: DEFAULT_RECEIVE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Remote endpoint as `host:port`
    pub fn remote_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }

    /// Load a config file from disk
    ///
    /// See [`Config::parse`] for the expected layout.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LinkError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse the contents of a config file
    ///
    /// Only the first three lines are significant:
    /// ```text
    /// [DeviceLink]        <- marker, second character must be 'D'
    /// P=21100             <- UDP port, non-zero
    /// I=127.0.0.1         <- IP address of the simulator
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim);

        let marker = lines
            .next()
            .ok_or_else(|| LinkError::Config("empty config file".to_string()))?;
        if marker.chars().nth(1) != Some('D') {
            return Err(LinkError::Config(format!(
                "invalid marker line {:?}",
                marker
            )));
        }

        let port_value = keyed_value(lines.next(), 'P')?;
        let port = port_value
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| LinkError::Config(format!("invalid port {:?}", port_value)))?;

        let ip_value = keyed_value(lines.next(), 'I')?;
        let ip = ip_value
            .parse::<IpAddr>()
            .map_err(|_| LinkError::Config(format!("invalid IP address {:?}", ip_value)))?;

        Ok(Config {
            host: ip.to_string(),
            port,
            ..Config::default()
        })
    }
}

/// Extract the value from a `K=value` line
fn keyed_value(line: Option<&str>, key: char) -> Result<&str> {
    let line = line.ok_or_else(|| LinkError::Config(format!("missing {}= line", key)))?;
    if !line.starts_with(key) {
        return Err(LinkError::Config(format!(
            "expected {}= line, found {:?}",
            key, line
        )));
    }
    let value = line
        .split_once('=')
        .map(|(_, v)| v.trim())
        .ok_or_else(|| LinkError::Config(format!("missing '=' in {:?}", line)))?;
    if value.is_empty() {
        return Err(LinkError::Config(format!("empty value for {}", key)));
    }
    Ok(value)
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the simulator host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the simulator UDP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the receive timeout (in milliseconds)
    pub fn receive_timeout_ms(mut self, ms: u64) -> Self {
        self.config.receive_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
