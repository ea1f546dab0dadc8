use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// The part of a serial port the probe actually touches. Implemented for any
/// [SerialPort] so a boxed port from [open] works directly.
pub trait ProbePort: Read + Write {
    /// Throws away anything sitting in the receive buffer.
    fn clear_input(&mut self) -> Result<(), ProbeError>;

    /// Bounds how long the next read may block.
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), ProbeError>;
}

impl<T: SerialPort + ?Sized> ProbePort for Box<T> {
    fn clear_input(&mut self) -> Result<(), ProbeError> {
        (**self).clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), ProbeError> {
        (**self).set_timeout(timeout)?;
        Ok(())
    }
}

/// Opens the port named in the config with its baud rate and read timeout and
/// nothing else set.
pub fn open(config: &ProbeConfig) -> Result<Box<dyn SerialPort>, ProbeError> {
    let port = serialport::new(config.port.as_str(), config.baud_rate)
        .timeout(config.read_timeout)
        .open()?;

    Ok(port)
}
