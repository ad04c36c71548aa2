/*!
 * Utility functions for llmcontext
 */

use std::path::Path;

use walkdir::WalkDir;

use crate::patterns::CompiledSpec;

/// Render a path with forward-slash separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Count the files a scan of `root` will include, for progress tracking
///
/// Applies the same pruning and matching as the scanner, with the spec
/// anchored at `root` itself.
pub fn count_files(root: &Path, spec: &CompiledSpec, output_file: Option<&Path>) -> u64 {
    let mut count = 0u64;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let rel = match entry.path().strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => return true,
            };
            !(entry.file_type().is_dir() && spec.is_ignored(rel, true))
        });

    for entry in walker.filter_map(std::result::Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if output_file.map_or(false, |out| entry.path() == out) {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !spec.is_ignored(rel, false) {
            count += 1;
        }
    }

    count
}
