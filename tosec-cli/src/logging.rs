//! Logger setup for the binary.
//!
//! Normal output goes through `log` so `--quiet`, `--verbose` and
//! `--logfile` apply to every command uniformly.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Writes to stderr and, optionally, to a log file with ANSI codes removed.
struct TeeWriter {
    console: io::Stderr,
    file: Option<strip_ansi_escapes::Writer<File>>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `RUST_LOG` overrides the level chosen by the flags. If the log file
/// cannot be created the logger is still installed without it and the
/// error is returned.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let (file, file_err) = match logfile.map(File::create) {
        Some(Ok(f)) => (Some(strip_ansi_escapes::Writer::new(f)), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(Target::Pipe(Box::new(TeeWriter {
            console: io::stderr(),
            file,
        })));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.init();

    match file_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
