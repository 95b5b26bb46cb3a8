//! Content rewriter: migrates the test scaffold inside `<name>_test.nix` files.
//!
//! The match is an exact, whitespace-sensitive substring match on the old scaffold.
//! Files whose scaffold was reformatted in any way are left as they are.

use std::{
        borrow::Cow,
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

/// Everything before the trailing `_test.nix` is the name.
static RE_MIGRATED_TEST: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)^(?<name>.*)_test\.nix$").expect("valid, static regex"));

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteReport {
        /// Every matching file; each one was read and written back.
        pub visited: Vec<PathBuf>,
        /// Subset of `visited` whose content actually changed.
        pub rewritten: Vec<PathBuf>,
}

/// `<name>` of a `<name>_test.nix` filename.
pub fn migrated_test_name(filename: &str) -> Option<&str> {
        RE_MIGRATED_TEST.captures(filename).and_then(|cap| cap.name("name")).map(|m| m.as_str())
}

/// Attribute-set scaffold being replaced.
pub fn old_template(name: &str) -> String {
        format!(
                "in {{\n  testPackages = {{\n    expr = builtins.elem pkgs.{} feature.environment.systemPackages;\n    expected = true;\n  }};\n}}",
                name
        )
}

/// List scaffold that replaces [`old_template`].
pub fn new_template(name: &str) -> String {
        format!(
                "in [\n  {{\n    actual = builtins.elem pkgs.{} feature.environment.systemPackages;\n    expected = true;\n  }}\n]",
                name
        )
}

/// Replaces the first occurrence of the old scaffold for `name` with the new one.
///
/// Later occurrences are left as they are. Borrows `content` when there is nothing to replace.
pub fn rewrite_content<'a>(name: &str, content: &'a str) -> Cow<'a, str> {
        let old = old_template(name);
        match content.contains(&old) {
                true => Cow::Owned(content.replacen(&old, &new_template(name), 1)),
                false => Cow::Borrowed(content),
        }
}

/// Reads `path`, rewrites its scaffold for `name` and writes the result back.
///
/// The file is always written, even when the content is unchanged.
/// Returns whether the content changed.
#[tracing::instrument]
pub fn rewrite_file(path: &Path, name: &str) -> Result<bool> {
        let content = fs::read_to_string(path).map_err(Error::read(path))?;
        let new_content = rewrite_content(name, &content);
        let changed = matches!(new_content, Cow::Owned(_));
        fs::write(path, new_content.as_bytes()).map_err(Error::write(path))?;
        tracing::debug!(changed, "written back");
        Ok(changed)
}

/// Lazily walks `root` and yields every file named `<name>_test.nix`.
///
/// Hidden files and directories are included. A symlinked test file is rewritten through the link.
pub fn migrated_test_files(root: &Path) -> impl Iterator<Item = Result<TestFile>> {
        matching_files(root, migrated_test_name)
}

/// Rewrites every `<name>_test.nix` under `root`, one file at a time.
///
/// # Errors
/// Any walk, read (including non-utf8 content) or write error ends the pass.
/// Files already written stay written.
#[tracing::instrument]
pub fn rewrite_tests(root: &Path) -> Result<RewriteReport> {
        let mut report = RewriteReport::default();
        for migrated in migrated_test_files(root) {
                let TestFile { path, name } = migrated?;
                if rewrite_file(&path, &name)? {
                        println!("Rewrote: {}", path.to_string_lossy().black().bold().on_green());
                        report.rewritten.push(path.clone());
                } else {
                        tracing::debug!("Scaffold not found: {:?}", path);
                }
                report.visited.push(path);
        }
        Ok(report)
}
