//! Migrate `.nix` test definitions to the `<name>_test.nix` layout.
//! Two one-pass tools, run in this order:
//!
//! 1. [`rename_tests`]: `test_<name>.nix` ~~> `<name>_test.nix`
//! 2. [`rewrite_tests`]: old `testPackages = { expr = ...; }` scaffold ~~> `[ { actual = ...; } ]`
//!
//! Both walk an explicit root recursively and stop at the first I/O error.

pub mod error;
pub mod logging;
pub mod rename;
pub mod rewrite;
pub mod walk;

use std::path::PathBuf;

use clap::Parser;
use error::Result;
use owo_colors::OwoColorize;
pub use rename::{RenameReport, rename_tests};
pub use rewrite::{RewriteReport, rewrite_tests};
pub use walk::TestFile;

/// Rename every `test_<name>.nix` below ROOT to `<name>_test.nix`, in place.
///
/// Existing `<name>_test.nix` files are not guarded against; see the platform's rename semantics.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct RenameArgs {
        /// Directory to walk (recursively).
        #[arg(default_value = ".")]
        pub root: PathBuf,
}

/// Rewrite the test scaffold of every `<name>_test.nix` below ROOT, in place.
///
/// Only an exact (whitespace-sensitive) match of the old scaffold is replaced, first occurrence only.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct RewriteArgs {
        /// Directory to walk (recursively).
        #[arg(default_value = ".")]
        pub root: PathBuf,
}

/// Renamer application code.  (main in lib.rs)
#[tracing::instrument]
pub fn rename_app(args: &RenameArgs) -> Result<()> {
        let report = rename_tests(&args.root)?;
        println!("Total renamed: {}", report.renamed.len().cyan());
        Ok(())
}

/// Rewriter application code.  (main in lib.rs)
#[tracing::instrument]
pub fn rewrite_app(args: &RewriteArgs) -> Result<()> {
        let report = rewrite_tests(&args.root)?;
        println!(
                "Total rewritten: {} (of {} test files)",
                report.rewritten.len().cyan(),
                report.visited.len().cyan()
        );
        Ok(())
}

/// /////////////////////////////////////////////////////////////////////////////////////// //
/// /////////////                 TESTS - lib.rs                             ////////////// //
/// /////////////////////////////////////////////////////////////////////////////////////// //
#[cfg(test)]
pub mod test_pub_utilities {
        use std::{
                fs,
                path::{Path, PathBuf},
        };

        use tempfile::TempDir;
        use walkdir::WalkDir;

        use crate::rewrite::old_template;

        pub type Result<T> = core::result::Result<T, Error>;
        pub type Error = Box<dyn std::error::Error>;

        /// Generate a fixed, populated temporary directory.
        ///
        /// Every `.nix` file that names a test holds the old scaffold for its own name,
        /// except `test_delta.nix`.
        ///
        /// dir_structure:
        /// ```md
        ///   - root/
        ///   - root/test_alpha.nix
        ///   - root/beta_test.nix
        ///   - root/notes.txt
        ///
        ///   - root/dir_1/
        ///   - root/dir_1/test_gamma.nix
        ///   - root/dir_1/dir_11/
        ///   - root/dir_1/dir_11/test_delta.nix       ("hello world")
        ///   - root/dir_1/dir_11/readme.nix           ("{ }")
        ///
        ///   - root/dir_2/
        ///   - root/dir_2/test_skip.nix/              (directory)
        ///   - root/dir_2/test_skip.nix/test_inner.nix
        ///
        ///   - root/dir_3/                            (empty)
        /// ```
        pub fn utility_test_dir_gen() -> Result<TempDir> {
                let dir_root = TempDir::new()?;
                fs::write(dir_root.path().join("test_alpha.nix"), old_template("alpha"))?;
                fs::write(dir_root.path().join("beta_test.nix"), old_template("beta"))?;
                fs::write(dir_root.path().join("notes.txt"), "not a test")?;

                let dir_1 = dir_root.path().join("dir_1");
                let dir_11 = dir_1.join("dir_11");
                fs::create_dir_all(&dir_11)?;
                fs::write(dir_1.join("test_gamma.nix"), old_template("gamma"))?;
                fs::write(dir_11.join("test_delta.nix"), "hello world")?;
                fs::write(dir_11.join("readme.nix"), "{ }")?;

                let dir_skip = dir_root.path().join("dir_2").join("test_skip.nix");
                fs::create_dir_all(&dir_skip)?;
                fs::write(dir_skip.join("test_inner.nix"), old_template("inner"))?;

                fs::create_dir(dir_root.path().join("dir_3"))?;

                Ok(dir_root)
        }

        /// Utility function to collect directory state for comparison.
        ///
        /// Paths are relative to `root`; `root` itself is left out.
        pub fn utility_collect_directory_state(root: &Path) -> Result<Vec<PathBuf>> {
                let mut entries = Vec::new();
                for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
                        entries.push(entry?.path().strip_prefix(root)?.to_path_buf());
                }
                Ok(entries)
        }

        /// Utility function for snapshot testing: lossy string image of a directory.
        ///
        /// Paths are sorted *prior* to lossy-string conversion and joined via `\n`.
        pub fn utility_capture_directory_tree_as_string(root: &Path) -> Result<String> {
                let mut entries = utility_collect_directory_state(root)?;
                entries.sort();
                let formatted = entries
                        .iter()
                        .map(|p| p.to_string_lossy().to_string())
                        .collect::<Vec<_>>()
                        .join("\n");
                Ok(formatted)
        }
}
