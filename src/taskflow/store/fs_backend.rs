use super::StorageBackend;
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON file per key under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        // Write to a sibling temp file and rename, so readers never see a partial snapshot
        let path = self.key_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        assert_eq!(backend.load("taskflow-tasks").unwrap(), None);
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let backend = FsBackend::new(&root);

        backend.save("taskflow-tasks", "[]").unwrap();
        assert!(root.join("taskflow-tasks.json").exists());
        assert!(!root.join(".taskflow-tasks.json.tmp").exists());
        assert_eq!(
            backend.load("taskflow-tasks").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        backend.save("k", "1").unwrap();
        backend.save("k", "2").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("2"));
    }
}
