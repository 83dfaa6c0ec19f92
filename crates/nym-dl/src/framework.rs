// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use nym_ffi_common::{config::DEFAULT_FRAMEWORKS_DIR, Error, Result};

/// Maps a framework name to the binary inside its bundle, e.g.
/// `Foundation` → `/System/Library/Frameworks/Foundation.framework/Foundation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkResolver {
    root: PathBuf,
}

impl Default for FrameworkResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMEWORKS_DIR)
    }
}

impl FrameworkResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fails if the framework bundle does not exist. Whether the binary inside it can be loaded
    /// is left to the loader.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let bundle = self.root.join(format!("{name}.framework"));
        if !bundle.exists() {
            return Err(Error::FrameworkNotFound(name.to_owned()));
        }
        Ok(bundle.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        assert_eq!(
            FrameworkResolver::default().root(),
            Path::new("/System/Library/Frameworks")
        );
    }

    #[test]
    fn test_resolve_existing_bundle() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("Foundation.framework")).unwrap();

        let resolver = FrameworkResolver::new(root.path());
        assert_eq!(
            resolver.resolve("Foundation"),
            Ok(root.path().join("Foundation.framework").join("Foundation"))
        );
    }

    #[test]
    fn test_resolve_missing_bundle() {
        let root = tempfile::tempdir().unwrap();
        let resolver = FrameworkResolver::new(root.path());
        assert_eq!(
            resolver.resolve("AppKit"),
            Err(Error::FrameworkNotFound("AppKit".to_owned()))
        );
    }
}
