//! Logging bootstrap for the server binary.
//!
//! Library crates only talk to the `log` facade; this installs the
//! flexi_logger backend writing to stderr. Call once, keep the handle alive
//! for the life of the process.

use flexi_logger::{Logger, LoggerHandle};
use log::info;

pub fn init_logging(spec: &str) -> Result<LoggerHandle, String> {
    let handle = Logger::try_with_str(spec)
        .map_err(|err| format!("invalid log spec `{spec}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=app_start module=server status=ok platform={} version={} log_spec={spec}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
