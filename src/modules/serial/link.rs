use std::io::Write;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ConfigError, SerialConfig};

const SERIAL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("No serial device available")]
    NoDevice,

    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial port enumeration failed: {0}")]
    Enumerate(#[from] serialport::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Writable half of an open device connection.
#[cfg_attr(test, mockall::automock)]
pub trait SerialWriter: Send {
    fn write_bytes(&mut self, bytes: &[u8]) -> std::io::Result<()>;
}

impl SerialWriter for Box<dyn serialport::SerialPort> {
    fn write_bytes(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.write_all(bytes)?;
        self.flush()
    }
}

/// Picks and opens a device; stands in for the user's device prompt.
#[cfg_attr(test, mockall::automock)]
pub trait PortSelector: Send {
    fn request_port(&mut self, baud_rate: u32) -> Result<Box<dyn SerialWriter>, SerialError>;
}

/// Opens the configured path, or the first port the system reports.
#[derive(Debug, Clone, Default)]
pub struct SystemPortSelector {
    preferred: Option<String>,
}

impl SystemPortSelector {
    pub fn new(preferred: Option<String>) -> Self {
        Self { preferred }
    }

    fn choose_path(&self) -> Result<String, SerialError> {
        if let Some(path) = &self.preferred {
            return Ok(path.clone());
        }
        let ports = serialport::available_ports()?;
        ports
            .into_iter()
            .next()
            .map(|port| port.port_name)
            .ok_or(SerialError::NoDevice)
    }
}

impl PortSelector for SystemPortSelector {
    fn request_port(&mut self, baud_rate: u32) -> Result<Box<dyn SerialWriter>, SerialError> {
        let path = self.choose_path()?;
        let port = serialport::new(&path, baud_rate)
            .timeout(SERIAL_TIMEOUT)
            .open()
            .map_err(|source| SerialError::Open {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path, baud_rate, "serial device opened");
        Ok(Box::new(port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    NotConnected,
    Failed,
}

/// At most one open writer. Write failures never drop the connection and
/// there is no disconnect; a new `connect` replaces the writer.
pub struct SerialLink {
    selector: Box<dyn PortSelector>,
    baud_rate: u32,
    marker: u8,
    writer: Option<Box<dyn SerialWriter>>,
}

impl SerialLink {
    pub fn new(selector: Box<dyn PortSelector>, baud_rate: u32, marker: u8) -> Self {
        Self {
            selector,
            baud_rate,
            marker,
            writer: None,
        }
    }

    pub fn from_config(config: &SerialConfig) -> Result<Self, SerialError> {
        let selector = SystemPortSelector::new(config.port.clone());
        Ok(Self::new(Box::new(selector), config.baud_rate, config.marker_byte()?))
    }

    pub fn state(&self) -> LinkState {
        if self.writer.is_some() {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    pub fn connect(&mut self) -> Result<(), SerialError> {
        let writer = self.selector.request_port(self.baud_rate)?;
        if self.writer.replace(writer).is_some() {
            tracing::info!("replaced previous serial connection");
        }
        Ok(())
    }

    pub fn notify(&mut self) -> NotifyOutcome {
        let Some(writer) = self.writer.as_mut() else {
            tracing::warn!("serial device not connected, skipping notification");
            return NotifyOutcome::NotConnected;
        };
        let marker = self.marker as char;
        match writer.write_bytes(&[self.marker]) {
            Ok(()) => {
                tracing::debug!(%marker, "serial notification sent");
                NotifyOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "serial notification failed");
                NotifyOutcome::Failed
            }
        }
    }
}
