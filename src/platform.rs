use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{blob::Blob, errors::Result};

/// Outcome of a share attempt. Reported to the user as a notice, never acted
/// on by the registry: subsequent operations proceed regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform accepted the payload for delivery.
    Delivered,
    /// No share capability on this platform. Callers must surface a manual
    /// download affordance instead of failing silently.
    Unsupported,
    /// The platform has the capability but the attempt failed.
    Failed(String),
}

/// Native affordances the core invokes with a record's payload and name.
/// Transport details stay behind this trait.
pub trait PlatformServices {
    fn open(&self, content: &Blob, name: &str) -> Result<()>;
    fn download(&self, content: &Blob, name: &str) -> Result<()>;
    fn share(&self, content: &Blob, name: &str) -> ShareOutcome;
}

/// Platform backed by a local directory: download writes the payload there,
/// open stops at logging, share is categorically unsupported.
#[derive(Debug)]
pub struct LocalPlatform {
    download_dir: PathBuf,
}

impl LocalPlatform {
    pub fn new<P: AsRef<Path>>(download_dir: P) -> Self {
        LocalPlatform {
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }
}

impl PlatformServices for LocalPlatform {
    fn open(&self, content: &Blob, name: &str) -> Result<()> {
        log::debug!("Opening {:?} ({} bytes)", name, content.len());
        Ok(())
    }

    fn download(&self, content: &Blob, name: &str) -> Result<()> {
        let target = self.download_dir.join(name);
        log::debug!("Downloading {:?} to {:?}", name, target);

        fs::write(target, content.bytes())?;
        Ok(())
    }

    fn share(&self, _content: &Blob, name: &str) -> ShareOutcome {
        log::debug!("No share capability for {:?}", name);
        ShareOutcome::Unsupported
    }
}
