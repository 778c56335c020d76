use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "{} {} - {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

// Route the `log` macros to `<log_dir>/log.txt`. The terminal belongs to the UI, so nothing goes to stdout.
pub fn init(log_dir: PathBuf, debug: bool) -> Result<(), SetLoggerError> {
    if let Err(e) = create_dir_all(&log_dir) {
        eprintln!("Could not create log directory {}: {e}", log_dir.display());
    }
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: log_dir.join("log.txt"),
        level,
    });

    log::set_logger(logger).map(|()| log::set_max_level(logger.level))
}
