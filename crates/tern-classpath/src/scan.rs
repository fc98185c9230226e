//! Library root scanning
//!
//! A library root is either a single file or a directory tree. Every regular
//! file whose extension is an archive or class extension is a classpath
//! entry; everything else is ignored, but directories are always descended
//! into.
//!
//! Scanning never fails. Unreadable directories, symlink loops and entries
//! with non-UTF-8 paths contribute nothing and are logged at debug level.
//! Symlinked directories are followed.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::config::ClasspathConfig;

/// Add every classpath file found under `root` to `output`.
pub fn collect_library_files(
    root: &Utf8Path,
    config: &ClasspathConfig,
    output: &mut BTreeSet<Utf8PathBuf>,
) {
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(%root, error = %e, "skipping unreadable library entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(path) = Utf8PathBuf::try_from(entry.into_path()) else {
            tracing::debug!(%root, "skipping entry with non-UTF-8 path");
            continue;
        };

        if is_classpath_file(&path, config) {
            output.insert(path);
        }
    }
}

/// Returns true if `path` has an archive or class extension.
///
/// The extension is whatever follows the last dot of the file name, so a
/// file named `.jar` counts as a `jar`.
pub fn is_classpath_file(path: &Utf8Path, config: &ClasspathConfig) -> bool {
    path.file_name()
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(_, ext)| config.is_classpath_extension(ext))
}
