use std::sync::Mutex;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

static LOGGER: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// Starts file + console logging once per process. Later calls are no-ops.
pub fn try_setup_logging(base_level: &str) -> anyhow::Result<()> {
    // held across start() so only one caller installs the global logger
    let mut logger = LOGGER
        .lock()
        .map_err(|_| anyhow::anyhow!("logger state poisoned"))?;
    if logger.is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_str(base_level)?
        .log_to_file(FileSpec::default().directory("logs"))
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;
    *logger = Some(handle);

    Ok(())
}

pub fn setup_logging(base_level: &str) {
    try_setup_logging(base_level)
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e));
}
