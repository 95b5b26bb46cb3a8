//! Renamer: `test_<name>.nix` ~~> `<name>_test.nix`

use std::{
        fs,
        path::{Path, PathBuf},
        sync::LazyLock,
};

use owo_colors::OwoColorize;
use regex::Regex;

use crate::{
        error::{Error, Result},
        walk::{TestFile, matching_files},
};

/// Greedy capture between the leading `test_` and the trailing `.nix`.
static RE_LEGACY_TEST: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)^test_(?<name>.*)\.nix$").expect("valid, static regex"));

/// One rename performed by [`rename_tests`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
        pub from: PathBuf,
        pub to: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameReport {
        pub renamed: Vec<Renamed>,
}

/// `<name>` of a `test_<name>.nix` filename.
///
/// `test_.nix` yields the empty name. The capture is never validated.
pub fn legacy_test_name(filename: &str) -> Option<&str> {
        RE_LEGACY_TEST.captures(filename).and_then(|cap| cap.name("name")).map(|m| m.as_str())
}

/// Filename a legacy test named `name` is moved to.
pub fn migrated_filename(name: &str) -> String {
        format!("{}_test.nix", name)
}

/// Lazily walks `root` and yields every file named `test_<name>.nix`.
///
/// Regular files and symlinks to regular files match; a symlink is renamed, not its target.
pub fn legacy_test_files(root: &Path) -> impl Iterator<Item = Result<TestFile>> {
        matching_files(root, legacy_test_name)
}

/// Renames every legacy test file under `root` as the walk reaches it.
///
/// # Collisions
/// An existing `<name>_test.nix` is not checked for. What happens is whatever
/// [`std::fs::rename`] does on the platform: on Unix the existing file is replaced,
/// on Windows the rename may fail, which aborts the pass.
///
/// # Errors
/// The first walk or rename error ends the pass. Renames already done are kept.
#[tracing::instrument]
pub fn rename_tests(root: &Path) -> Result<RenameReport> {
        let mut report = RenameReport::default();
        for legacy in legacy_test_files(root) {
                let TestFile { path, name } = legacy?;
                let to = path.with_file_name(migrated_filename(&name));
                let parent = path.parent().unwrap_or(root);
                println!(
                        "Renaming: {}/{} ~~> {}",
                        parent.to_string_lossy().blue(),
                        path.file_name().unwrap_or_default().to_string_lossy().black().bold().on_green(),
                        to.file_name().unwrap_or_default().to_string_lossy().red().bold().on_blue()
                );
                fs::rename(&path, &to).map_err(|source| Error::Rename { from: path.clone(), to: to.clone(), source })?;
                tracing::debug!(?path, ?to, "renamed");
                report.renamed.push(Renamed { from: path, to });
        }
        Ok(report)
}
