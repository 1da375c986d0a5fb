//! Optional logging initialization for binaries embedding this crate.
//!
//! The crate itself only ever logs through the [`log`] facade — it never
//! requires a backend to be installed. This module is a convenience for
//! consumers that want the same file-rotated `flexi_logger` setup the
//! teacher simulator uses, gated behind the `logging` feature so that
//! library-only consumers don't pull in `flexi_logger` at all.

#![cfg(feature = "logging")]

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming,
    WriteMode, default_format,
};
use log::LevelFilter;

/// Verbosity level for [`init`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Initialize a file-rotated logger at the given level.
///
/// Must keep the returned [`LoggerHandle`] alive up to the very end of
/// your program to ensure that all buffered log lines are flushed out.
#[must_use]
pub fn init(level: LogLevel) -> LoggerHandle {
    let mut builder = LogSpecBuilder::new();
    builder.default(level.to_level_filter());

    Logger::with(builder.build())
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("vfpsim")
                .suffix("log"),
        )
        .rotate(
            Criterion::Size(10_000_000), // 10 MB
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(Duplicate::Error)
        .format_for_files(default_format)
        .start()
        .unwrap()
}
