//! Fixed settings for the probe. Nothing here is read from the command line or
//! the environment, [ProbeConfig::default] is what the binary runs with.

use std::time::Duration;

#[cfg(target_os = "windows")]
pub const PORT: &str = "COM5";
#[cfg(not(target_os = "windows"))]
pub const PORT: &str = "/dev/ttyUSB0";

pub const BAUD_RATE: u32 = 115200;
pub const READ_TIMEOUT: Duration = Duration::from_secs(2);
/// Time given to the device to come back up after opening the port resets it.
pub const SETTLE_INTERVAL: Duration = Duration::from_secs(1);
pub const RESPONSE_WAIT: Duration = Duration::from_millis(500);
pub const PAYLOAD: &[u8] = b"PING\n";
/// Most bytes taken from the port in one probe.
pub const READ_CAP: usize = 200;
pub const LOG_FILE: &str = "test_result.txt";

#[derive(Clone, Debug, PartialEq)]
pub struct ProbeConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
    pub settle_interval: Duration,
    pub response_wait: Duration,
    pub payload: Vec<u8>,
}

impl ProbeConfig {
    /// The payload as it is shown in the report, without the line terminator.
    pub fn command(&self) -> String {
        let trimmed = self.payload.strip_suffix(b"\n").unwrap_or(&self.payload[..]);
        String::from_utf8_lossy(trimmed).into_owned()
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: PORT.to_string(),
            baud_rate: BAUD_RATE,
            read_timeout: READ_TIMEOUT,
            settle_interval: SETTLE_INTERVAL,
            response_wait: RESPONSE_WAIT,
            payload: PAYLOAD.to_vec(),
        }
    }
}
