//! Scoped clean working directory: chdir into a scratch dir, guaranteed
//! restore-and-remove on every exit path (the guard's Drop runs during unwind).

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::RunError;

/// RAII guard for a scratch working directory. On drop the previous working
/// directory is restored first, then the scratch directory is removed (field
/// drop order: our Drop body runs before `scratch`'s own Drop).
pub struct WorkDirGuard {
    prev: PathBuf,
    scratch: TempDir,
}

impl WorkDirGuard {
    pub fn path(&self) -> &Path {
        self.scratch.path()
    }

    pub fn previous(&self) -> &Path {
        &self.prev
    }
}

impl Drop for WorkDirGuard {
    fn drop(&mut self) {
        // Must leave the scratch dir before TempDir can unlink it.
        if let Err(e) = env::set_current_dir(&self.prev) {
            eprintln!("[EXSMOKE][warn] failed to restore working directory: {}", e);
        }
    }
}

/// Create a fresh scratch directory and chdir into it.
///
/// The process-wide working directory is shared state; callers running under a
/// multi-threaded test harness must serialize around this.
pub fn clean_working_directory() -> Result<WorkDirGuard, RunError> {
    let prev = env::current_dir()?;
    let scratch = tempfile::tempdir()?;
    env::set_current_dir(scratch.path())?;
    Ok(WorkDirGuard { prev, scratch })
}

/// Closure form: run `f` inside a clean working directory. Cleanup happens on
/// normal return and on panic alike.
pub fn with_clean_working_directory<T>(f: impl FnOnce() -> T) -> Result<T, RunError> {
    let guard = clean_working_directory()?;
    let out = f();
    drop(guard);
    Ok(out)
}
