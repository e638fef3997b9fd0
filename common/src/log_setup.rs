use std::path::Path;

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};

const LOG_FILE_SIZE: u64 = 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;

/// Starts file + console logging for a host process.
///
/// `base_level` is a flexi_logger spec such as `"info"` or
/// `"info, starchart::star_field=trace"`; `RUST_LOG` overrides it.
/// The returned handle must stay alive until the process exits, dropping it
/// flushes and stops the file writer.
pub fn setup_logging(base_level: &str, directory: impl AsRef<Path>) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(base_level)?
        .log_to_file(
            FileSpec::default()
                .directory(directory.as_ref())
                .basename("starchart"),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(LOG_FILE_SIZE),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .start()?;

    Ok(handle)
}
