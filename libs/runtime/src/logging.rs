use crate::config::LoggingConfig;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

/// Resolve a log file path against `base_dir`.
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Create a rotating writer, ensuring the parent directory exists.
fn create_rotating_writer(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

/// Initialize the global tracing subscriber from configuration:
/// a console sink plus an optional rotating file sink, each with its own level.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    let console_layer = parse_tracing_level(&cfg.console_level).map(|lvl| {
        fmt::layer()
            .with_target(true)
            .with_filter(LevelFilter::from_level(lvl))
    });

    let file_layer = if cfg.file.trim().is_empty() {
        None
    } else {
        let path = resolve_log_path(&cfg.file, base_dir);
        let max_bytes = cfg.max_size_mb.unwrap_or(100) as usize * 1024 * 1024;
        let max_backups = cfg.max_backups.unwrap_or(3);
        match create_rotating_writer(&path, max_bytes, max_backups) {
            Ok(writer) => {
                let level_str = if cfg.file_level.trim().is_empty() {
                    &cfg.console_level
                } else {
                    &cfg.file_level
                };
                parse_tracing_level(level_str).map(|lvl| {
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer)
                        .with_filter(LevelFilter::from_level(lvl))
                })
            }
            Err(e) => {
                eprintln!("failed to open log file {}: {}", path.display(), e);
                None
            }
        }
    };

    // Route `log` records through tracing as well.
    let _ = tracing_log::LogTracer::init();

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
