use std::path::{Path, PathBuf};

/// One named file inside a card archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Per-request storage that is released when dropped.
pub trait ScratchGuard: Send + Sync + 'static {
    fn path(&self) -> &Path;
}

/// A finished archive on disk.
///
/// Owns the scratch space the archive and its intermediates were written
/// to; dropping the package schedules their removal.
pub struct CardPackage {
    archive_path: PathBuf,
    file_name: String,
    scratch: Box<dyn ScratchGuard>,
}

impl CardPackage {
    pub fn new(
        archive_path: PathBuf,
        file_name: impl Into<String>,
        scratch: Box<dyn ScratchGuard>,
    ) -> Self {
        Self {
            archive_path,
            file_name: file_name.into(),
            scratch,
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }
}

impl std::fmt::Debug for CardPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardPackage")
            .field("archive_path", &self.archive_path)
            .field("file_name", &self.file_name)
            .finish()
    }
}
