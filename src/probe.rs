//! The probe itself: open, settle, flush, send, wait, read, record, close.
//! Every step can fail and the first failure ends the probe with an `Error:`
//! line. Nothing is propagated to the caller.

use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::config::{ProbeConfig, READ_CAP};
use crate::error::ProbeError;
use crate::escape::byte_literal;
use crate::port::{self, ProbePort};
use crate::report::ProbeReport;

/// Runs the probe against the real serial port named in `config`.
pub fn run(config: &ProbeConfig) -> ProbeReport {
    run_with(config, port::open)
}

/// Runs the probe on whatever port `open` hands back. `open` is called once,
/// after the opening line is recorded.
pub fn run_with<P, F>(config: &ProbeConfig, open: F) -> ProbeReport
where
    P: ProbePort,
    F: FnOnce(&ProbeConfig) -> Result<P, ProbeError>,
{
    let mut report = ProbeReport::new();

    if let Err(e) = exchange(config, open, &mut report) {
        log::warn!("probe of {} failed: {:?}", config.port, e);
        report.push(format!("Error: {}", e));
    }

    report
}

fn exchange<P, F>(config: &ProbeConfig, open: F, report: &mut ProbeReport) -> Result<(), ProbeError>
where
    P: ProbePort,
    F: FnOnce(&ProbeConfig) -> Result<P, ProbeError>,
{
    report.push(format!("Opening {}...", config.port));
    let mut port = open(config)?;

    thread::sleep(config.settle_interval);
    port.clear_input()?;

    report.push(format!("Sending {}...", config.command()));
    port.write_all(&config.payload)?;
    port.flush()?;

    thread::sleep(config.response_wait);
    let response = read_response(&mut port, config.read_timeout)?;

    if response.is_empty() {
        report.push("No response");
    } else {
        log::debug!("received {} bytes", response.len());
        report.push(format!("Response: {}", byte_literal(&response)));
    }

    drop(port);
    Ok(())
}

/// Collects up to [READ_CAP] bytes, stopping early once `timeout` has run out
/// since the read began. Each pass only waits for what is left of `timeout`.
/// Running out of time, with or without bytes, is not an error.
pub fn read_response<P: ProbePort>(
    port: &mut P,
    timeout: Duration,
) -> Result<ArrayVec<u8, READ_CAP>, ProbeError> {
    let deadline = Instant::now() + timeout;
    let mut buff = [0_u8; READ_CAP];
    let mut out = ArrayVec::<u8, READ_CAP>::new();

    while !out.is_full() {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            break;
        }
        port.set_read_timeout(left)?;

        let want = out.remaining_capacity();
        let s = match port.read(&mut buff[..want]) {
            Ok(0) => break,
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::TimedOut => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => Err(e)?,
        };
        out.write_all(&buff[..s])?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::io;

    /// Hands out one queued read result per call and times out once the queue
    /// is empty.
    #[derive(Default)]
    struct Chunks {
        reads: VecDeque<io::Result<Vec<u8>>>,
        timeouts: Vec<Duration>,
    }

    impl Chunks {
        fn new(reads: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                reads: reads.into(),
                ..Default::default()
            }
        }
    }

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.reads.pop_front() {
                Some(Ok(mut chunk)) => {
                    let n = buf.len().min(chunk.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.reads.push_front(Ok(chunk.split_off(n)));
                    }
                    Ok(n)
                }
                Some(Err(e)) => Err(e),
                None => Err(io::Error::new(ErrorKind::TimedOut, "Operation timed out")),
            }
        }
    }

    impl Write for Chunks {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl ProbePort for Chunks {
        fn clear_input(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), ProbeError> {
            self.timeouts.push(timeout);
            Ok(())
        }
    }

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn read_takes_what_is_there() {
        let mut port = Chunks::new(vec![Ok(b"PONG\r\n".to_vec())]);
        let out = read_response(&mut port, WAIT).unwrap();
        assert_eq!(&out[..], b"PONG\r\n");
    }

    #[test]
    fn read_joins_split_reply() {
        let mut port = Chunks::new(vec![Ok(b"PO".to_vec()), Ok(b"NG\r\n".to_vec())]);
        let out = read_response(&mut port, WAIT).unwrap();
        assert_eq!(&out[..], b"PONG\r\n");
    }

    #[test]
    fn read_caps_at_limit() {
        let mut port = Chunks::new(vec![
            Ok(vec![0x55_u8; 150]),
            Ok(vec![0xAA_u8; 150]),
        ]);
        let out = read_response(&mut port, WAIT).unwrap();
        assert_eq!(out.len(), READ_CAP);
        assert_eq!(out[149], 0x55);
        assert_eq!(out[150], 0xAA);
        // the rest stays queued on the port
        assert_eq!(port.reads.front().unwrap().as_ref().unwrap().len(), 100);
    }

    #[test]
    fn each_pass_waits_only_for_what_is_left() {
        let mut port = Chunks::new(vec![Ok(b"PO".to_vec()), Ok(b"NG".to_vec())]);
        read_response(&mut port, WAIT).unwrap();

        assert_eq!(port.timeouts.len(), 3);
        assert!(port.timeouts.iter().all(|t| *t <= WAIT));
        assert!(port.timeouts.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn zero_length_read_ends_reply() {
        let mut port = Chunks::new(vec![Ok(b"OK".to_vec()), Ok(Vec::new()), Ok(b"late".to_vec())]);
        let out = read_response(&mut port, WAIT).unwrap();
        assert_eq!(&out[..], b"OK");
    }

    #[test]
    fn timeout_is_empty() {
        let out = read_response(&mut Chunks::new(Vec::new()), WAIT).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn interrupted_read_is_retried() {
        let mut port = Chunks::new(vec![
            Err(io::Error::new(ErrorKind::Interrupted, "interrupted")),
            Ok(b"PONG".to_vec()),
        ]);
        let out = read_response(&mut port, WAIT).unwrap();
        assert_eq!(&out[..], b"PONG");
    }

    #[test]
    fn other_read_errors_fail() {
        let mut port = Chunks::new(vec![
            Ok(b"PO".to_vec()),
            Err(io::Error::new(ErrorKind::BrokenPipe, "device reports readiness to read but returned no data")),
        ]);
        let err = read_response(&mut port, WAIT).unwrap_err();
        assert!(matches!(err, ProbeError::IoError(_)));
    }
}
