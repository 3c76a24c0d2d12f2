use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use tracing::debug;

use crate::PatchError;

/// An owned binary image, typically a whole file loaded into memory.
///
/// The buffer either holds the complete contents or is empty; a failed
/// [`Image::load`] never produces a partially filled image. Scans and
/// patches borrow the buffer for the duration of one call and never take
/// ownership of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
}

impl Image {
    /// Reads the entire file at `path` into a freshly allocated buffer.
    ///
    /// Fails if the file cannot be opened, its size cannot be determined,
    /// or fewer bytes than its reported size are read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let expected = file.metadata()?.len() as usize;

        let mut data = Vec::with_capacity(expected);
        let actual = file.read_to_end(&mut data)?;
        if actual < expected {
            return Err(PatchError::ShortRead { expected, actual });
        }

        debug!(path = %path.display(), len = actual, "loaded image");
        Ok(Self { data })
    }

    /// Writes the full buffer to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PatchError> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(&self.data)?;

        debug!(path = %path.display(), len = self.data.len(), "saved image");
        Ok(())
    }

    /// Drops the buffer and resets the image to empty. Releasing an
    /// already-empty image is a no-op.
    pub fn release(&mut self) {
        if self.data.is_empty() {
            debug!("nothing to release");
            return;
        }
        debug!(len = self.data.len(), "released image");
        self.data = Vec::new();
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Image {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}
