// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::config::BridgeConfig;

pub const DEFAULT_LOG_FILE: &str = "nym-node-bridge.log";

/// Installs a global `tracing` subscriber configured from `config`.
///
/// If `config.log_file` points to an existing directory, logs are written to
/// "{dir}/nym-node-bridge.log"; if it points to an existing file, that file is used. Otherwise
/// logs go to stderr, leaving stdout to the host process.
///
/// The host may load the addon more than once per process (one instance per worker thread), so
/// an already installed subscriber is kept and `false` is returned.
pub fn init_logger(config: &BridgeConfig) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(&config.log_filter);

    let log_builder = tracing_subscriber::fmt().with_env_filter(filter).compact();

    let installed = match config.log_file.as_deref().and_then(try_make_writer) {
        Some(appender) => log_builder
            .with_ansi(false)
            .with_writer(appender)
            .try_init()
            .is_ok(),
        None => log_builder.with_writer(std::io::stderr).try_init().is_ok(),
    };

    if installed {
        tracing::debug!(filter = %config.log_filter, "logger initialized");
    }
    installed
}

fn try_make_writer(path: &Path) -> Option<tracing_appender::rolling::RollingFileAppender> {
    let (log_dir, filename) = resolve_log_path(path)?;
    Some(tracing_appender::rolling::never(log_dir, filename))
}

/// Splits a configured log location into directory and file name. Both must already exist in
/// the filesystem, except for the default file name inside a directory.
fn resolve_log_path(path: &Path) -> Option<(PathBuf, PathBuf)> {
    if path.as_os_str().is_empty() {
        return None;
    }

    let path = path.canonicalize().ok()?;

    if path.is_dir() {
        Some((path, PathBuf::from(DEFAULT_LOG_FILE)))
    } else if path.is_file() {
        let log_dir = path.parent()?.to_path_buf();
        let filename = PathBuf::from(path.file_name()?);
        Some((log_dir, filename))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (log_dir, filename) = resolve_log_path(dir.path()).unwrap();
        assert_eq!(log_dir, dir.path().canonicalize().unwrap());
        assert_eq!(filename, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_resolve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.log");
        std::fs::write(&file, b"").unwrap();

        let (log_dir, filename) = resolve_log_path(&file).unwrap();
        assert_eq!(log_dir, dir.path().canonicalize().unwrap());
        assert_eq!(filename, PathBuf::from("custom.log"));
    }

    #[test]
    fn test_resolve_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_log_path(&dir.path().join("missing.log")), None);
        assert_eq!(resolve_log_path(Path::new("")), None);
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = BridgeConfig::default();
        init_logger(&config);
        assert!(!init_logger(&config));
    }
}
