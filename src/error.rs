use std::fmt::Display;

/// Anything that stops a probe early. Only the message text ends up in the
/// report, the variant just keeps the cause around for logging.
#[derive(Debug)]
pub enum ProbeError {
    /// The port could not be opened or configured.
    PortError(serialport::Error),
    /// An error when writing data or reading data from the device.
    IoError(std::io::Error),
}

impl Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PortError(e) => e.fmt(f),
            Self::IoError(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<serialport::Error> for ProbeError {
    fn from(value: serialport::Error) -> Self {
        Self::PortError(value)
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
