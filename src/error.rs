//! Error handling for nix_test_migrate

use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream::Stderr};
use thiserror::Error;

/// Result type alias for nix_test_migrate operations
pub type Result<T> = core::result::Result<T, Error>;

/// Every variant is fatal: a pass stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
        /// Directory walking failed
        #[error("Directory walking error: {0}")]
        WalkDir(#[from] walkdir::Error),

        /// Resolving, reading or writing a test file failed
        #[error("Could not {action} {}: {source}", path.display().if_supports_color(Stderr, |p| p.yellow()))]
        File {
                action: &'static str,
                path: PathBuf,
                source: std::io::Error,
        },

        /// Renaming a test file failed (includes destination collisions where the platform refuses them)
        #[error(
                "Could not rename {} to {}: {source}",
                from.display().if_supports_color(Stderr, |p| p.yellow()),
                to.display().if_supports_color(Stderr, |p| p.yellow())
        )]
        Rename {
                from: PathBuf,
                to: PathBuf,
                source: std::io::Error,
        },
}

impl Error {
        pub(crate) fn read(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
                let path = path.into();
                move |source| Error::File { action: "read", path, source }
        }

        pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
                let path = path.into();
                move |source| Error::File { action: "write", path, source }
        }
}
