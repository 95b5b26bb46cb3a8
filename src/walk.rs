//! Recursive walk shared by both passes

use std::{
        fs,
        path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A file whose name matched one of the test filename patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
        pub path: PathBuf,
        /// `<name>` captured from the filename
        pub name: String,
}

/// Lazily walks `root` and yields every file `matcher` captures a `<name>` from.
///
/// Each directory is read in full (sorted by name) before its entries are yielded,
/// so renaming a yielded file can't cause it to be yielded again under its new name.
///
/// Directories are always descended into, whatever their name. Symlinks are not descended into,
/// but a matching symlink whose target is a regular file is yielded like one.
/// A matching symlink that can't be resolved is an error.
pub(crate) fn matching_files(
        root: &Path,
        matcher: fn(&str) -> Option<&str>,
) -> impl Iterator<Item = Result<TestFile>> {
        WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter().filter_map(move |entry| {
                // Guard: walk errors are fatal, hand them to the caller
                let entry = match entry {
                        Ok(entry) => entry,
                        Err(e) => return Some(Err(Error::from(e))),
                };
                if entry.file_type().is_dir() {
                        return None;
                }
                // Guard: non-utf8 names can't match the pattern
                let Some(filename) = entry.file_name().to_str() else {
                        tracing::trace!("Non-utf8 filename skipped: {:?}", entry.path());
                        return None;
                };
                let Some(name) = matcher(filename) else {
                        tracing::trace!("No Match for Entry: {:?}", filename);
                        return None;
                };
                let name = name.to_owned();
                // Guard: regular files only, directly or behind a symlink
                if entry.path_is_symlink() {
                        match fs::metadata(entry.path()) {
                                Ok(target) if target.is_file() => {
                                        tracing::debug!("Following symlink: {:?}", entry.path());
                                }
                                Ok(_) => {
                                        tracing::warn!("Symlink to a non-file skipped: {:?}", entry.path());
                                        return None;
                                }
                                Err(source) => {
                                        return Some(Err(Error::File {
                                                action: "resolve",
                                                path: entry.into_path(),
                                                source,
                                        }));
                                }
                        }
                } else if !entry.file_type().is_file() {
                        tracing::warn!("Not a regular file, skipped: {:?}", entry.path());
                        return None;
                }
                Some(Ok(TestFile { path: entry.into_path(), name }))
        })
}
