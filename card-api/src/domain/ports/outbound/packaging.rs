use crate::domain::{
    models::{ArchiveEntry, CardPackage},
    CardError,
};

pub trait Packager: Send + Sync + 'static {
    /// Writes `entries` into fresh per-call scratch space and bundles them
    /// into an archive named `archive_name` next to them.
    fn package(
        &self,
        entries: &[ArchiveEntry],
        archive_name: &str,
    ) -> Result<CardPackage, CardError>;
}
