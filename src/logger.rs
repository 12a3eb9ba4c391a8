// ============================================================================
// Logging
// ============================================================================
// `log` backend: colored lines on the terminal plus a timestamped copy
// appended to the log file, so unattended runs can be diagnosed later.
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct Logger {
    level: LevelFilter,
    file: Option<PathBuf>,
}

impl Logger {
    pub fn new(level: LevelFilter, file: Option<PathBuf>) -> Self {
        if let Some(parent) = file.as_deref().and_then(|path| path.parent()) {
            let _ = std::fs::create_dir_all(parent);
        }
        Logger { level, file }
    }

    fn append(&self, record: &Record) {
        let Some(path) = &self.file else {
            return;
        };
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", file_line(record));
        }
    }
}

fn file_line(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] {:<5} {}", timestamp, record.level(), record.args())
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match record.level() {
            Level::Error => eprintln!("{} {}", "[ ERROR ]".red(), message.red()),
            Level::Warn => eprintln!("{} {}", "[ WARN ]".yellow(), message.yellow()),
            Level::Info => println!("{} {}", "[ INFO ]".cyan(), message),
            Level::Debug | Level::Trace => println!("{} {}", "[ DEBUG ]".dimmed(), message.dimmed()),
        }
        self.append(record);
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter, file: Option<PathBuf>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new(level, file)))?;
    log::set_max_level(level);
    Ok(())
}
