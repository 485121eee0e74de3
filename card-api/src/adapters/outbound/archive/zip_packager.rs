use std::{
    fs::File,
    io::{Seek, Write},
    path::PathBuf,
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use super::ScratchDir;
use crate::domain::{
    models::{ArchiveEntry, CardPackage},
    ports::outbound::Packager,
    CardError,
};

/// Writes card artifacts into a per-call scratch dir and zips them.
#[derive(Debug, Clone, Default)]
pub struct ZipPackager {
    scratch_root: Option<PathBuf>,
}

impl ZipPackager {
    pub fn new(scratch_root: Option<PathBuf>) -> Self {
        Self { scratch_root }
    }
}

impl Packager for ZipPackager {
    fn package(
        &self,
        entries: &[ArchiveEntry],
        archive_name: &str,
    ) -> Result<CardPackage, CardError> {
        let scratch = ScratchDir::create(self.scratch_root.as_deref())?;

        for entry in entries {
            std::fs::write(scratch.join(&entry.name), &entry.bytes)?;
        }

        let archive_path = scratch.join(archive_name);
        let file = File::create(&archive_path)?;
        write_archive(entries, file)?;

        Ok(CardPackage::new(archive_path, archive_name, Box::new(scratch)))
    }
}

/// Writes `entries` as a deflated zip archive into `writer`.
pub fn write_archive<W: Write + Seek>(entries: &[ArchiveEntry], writer: W) -> Result<W, CardError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)
            .map_err(zip_error)?;
        zip.write_all(&entry.bytes)?;
    }

    zip.finish().map_err(zip_error)
}

fn zip_error(err: zip::result::ZipError) -> CardError {
    match err {
        zip::result::ZipError::Io(err) => CardError::Io(err),
        other => CardError::Io(std::io::Error::other(other)),
    }
}
