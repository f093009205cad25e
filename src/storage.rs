use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::AppResult;

/// File store rooted at the data directory. Both repositories persist
/// through this handle, one named JSON file each.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn open(root: &Path) -> AppResult<Self> {
        fs::create_dir_all(root)?;
        log::info!("Opened data directory at {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn read(&self, file_name: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path(file_name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // Write to a sibling temp file first so a crash mid-write cannot leave a
    // half-written file behind.
    pub fn write(&self, file_name: &str, contents: &str) -> AppResult<()> {
        let tmp = self.root.join(format!("{}.tmp", file_name));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, self.path(file_name))?;
        Ok(())
    }

    pub fn remove(&self, file_name: &str) -> AppResult<()> {
        match fs::remove_file(self.path(file_name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
