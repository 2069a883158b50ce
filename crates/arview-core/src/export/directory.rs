use std::path::{Path, PathBuf};

use super::{ShareError, SharePayload, ShareSink};

/// Sink without a native share tier; downloads land in a directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShareSink for DirectorySink {
    fn can_share(&self, _payload: &SharePayload<'_>) -> bool {
        false
    }

    fn share(&self, _payload: &SharePayload<'_>) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }

    fn download(&self, bytes: &[u8], filename: &str) -> Result<(), ShareError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(filename), bytes)?;
        Ok(())
    }
}
