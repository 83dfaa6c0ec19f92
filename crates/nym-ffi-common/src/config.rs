// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

pub const LOG_FILTER_ENV: &str = "NYM_BRIDGE_LOG";
pub const LOG_FILE_ENV: &str = "NYM_BRIDGE_LOG_FILE";
pub const FRAMEWORKS_DIR_ENV: &str = "NYM_BRIDGE_FRAMEWORKS_DIR";

pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_FRAMEWORKS_DIR: &str = "/System/Library/Frameworks";

/// Settings read once when the bridge is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// `tracing` filter directives.
    pub log_filter: String,

    /// File or directory to write logs to. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,

    /// Root directory searched by framework imports.
    pub frameworks_dir: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_file: None,
            frameworks_dir: PathBuf::from(DEFAULT_FRAMEWORKS_DIR),
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            log_filter: get(LOG_FILTER_ENV).unwrap_or(defaults.log_filter),
            log_file: get(LOG_FILE_ENV).map(PathBuf::from),
            frameworks_dir: get(FRAMEWORKS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.frameworks_dir),
        }
    }
}
