use serial_probe::config::{ProbeConfig, LOG_FILE};
use serial_probe::probe;

fn main() {
    env_logger::init();

    let config = ProbeConfig::default();
    let report = probe::run(&config);

    if let Err(e) = report.write_to(LOG_FILE) {
        log::error!("could not write log file {}: {}", LOG_FILE, e);
    }

    let stdout = std::io::stdout();
    if let Err(e) = report.print_to(&mut stdout.lock()) {
        log::error!("could not print report to stdout: {}", e);
    }
}
