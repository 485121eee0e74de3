use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::domain::models::ScratchGuard;

const SCRATCH_PREFIX: &str = "card-";

/// A unique temporary directory holding one request's files.
///
/// Dropping it schedules removal of the directory on a blocking worker
/// and returns immediately. Removal failures are logged and ignored.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchDir {
    /// Creates a fresh directory under `root`, or the OS temp dir.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();

        tracing::debug!(scratch = %path.display(), "allocated scratch dir");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl ScratchGuard for ScratchDir {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        let remove = move || {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => tracing::debug!(scratch = %path.display(), "removed scratch dir"),
                Err(err) => tracing::warn!(
                    scratch = %path.display(),
                    "failed to remove scratch dir: {err}"
                ),
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                // Fire and forget; nobody waits on cleanup.
                drop(handle.spawn_blocking(remove));
            }
            Err(_) => remove(),
        }
    }
}

#[cfg(test)]
pub(crate) async fn wait_for_removal(path: &Path) -> bool {
    for _ in 0..100 {
        if !path.exists() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    !path.exists()
}
