//! # serial-probe
//! Opens a serial port, sends `PING`, waits for whatever the device sends back
//! and writes a short human readable report of what happened.
//! ## Features
//! - Running the probe and collecting its report in the [probe] module
//! - Rendering raw replies exactly in the [escape] module
//! - The fixed port settings in the [config] module
//! ## Testing
//! The probe runs on anything implementing [port::ProbePort], so most tests
//! script a fake device instead of needing hardware. The one test that talks to a
//! real port is ignored by default.
pub mod config;
pub mod error;
pub mod escape;
pub mod port;
pub mod probe;
pub mod report;

pub use serialport;
