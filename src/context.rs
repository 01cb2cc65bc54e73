use chrono::Local;
use std::path::{Path, PathBuf};

/// Per-invocation state, built once in main and passed to every step instead
/// of being read from process-wide globals.
pub struct RunContext {
    pub run_id: String,
    pub margin: String,
    work_root: PathBuf,
}

impl RunContext {
    pub fn new(margin: &str, work_root: &Path) -> Self {
        Self {
            run_id: Local::now().format("%d-%m-%Y--%H-%M-%S").to_string(),
            margin: margin.to_string(),
            work_root: work_root.to_path_buf(),
        }
    }

    /// Where the original object is downloaded to.
    pub fn download_dir(&self) -> PathBuf {
        self.work_root.join("foredit")
    }

    /// Where the trimmed intermediate and the final re-encode live.
    pub fn edited_dir(&self) -> PathBuf {
        self.work_root.join("edited")
    }
}
