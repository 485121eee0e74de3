mod scratch_dir;
mod zip_packager;

pub use scratch_dir::ScratchDir;
pub use zip_packager::*;

#[cfg(test)]
pub(crate) use scratch_dir::wait_for_removal;
