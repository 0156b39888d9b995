use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::RunError;

/// Find example scripts in `dir` whose file *stem* matches the glob `pattern`.
///
/// Matching on the stem lets callers write `*-OrcaKinFit` without caring about
/// the script extension. Non-recursive: subdirectories are never descended
/// into. Results are sorted by path so run order is deterministic.
pub fn find_examples(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, RunError> {
    if !dir.is_dir() {
        return Err(RunError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }
    let pat = Pattern::new(pattern).map_err(|source| RunError::BadPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        // Skip names that are not valid UTF-8; the harness has nothing useful
        // to report about them.
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s,
            None => continue,
        };
        if pat.matches(stem) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
