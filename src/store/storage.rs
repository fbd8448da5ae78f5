use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::prelude::*;

/// Named JSON documents in a local directory, one `<name>.json` file each.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Read the document, `None` when it has never been written.
    #[instrument(skip_all, level = Level::DEBUG, fields(name = name))]
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path(name);
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error).with_context(|| format!("failed to read `{}`", path.display()));
            }
        };
        serde_json::from_slice(&contents)
            .with_context(|| format!("`{}` is corrupt", path.display()))
            .map(Some)
    }

    /// Replace the document as a whole.
    #[instrument(skip_all, level = Level::DEBUG, fields(name = name))]
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create `{}`", self.root.display()))?;
        let path = self.path(name);
        fs::write(&path, serde_json::to_vec_pretty(value)?)
            .with_context(|| format!("failed to write `{}`", path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
pub mod tests {
    use std::collections::BTreeMap;

    use super::*;

    /// Fresh storage under the system temporary directory.
    pub fn temporary_storage(label: &str) -> LocalStorage {
        let root = std::env::temp_dir()
            .join(format!("innkeeper-test-{}-{label}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        LocalStorage::new(root)
    }

    #[test]
    fn test_missing_document() -> Result {
        let storage = temporary_storage("missing");
        assert_eq!(storage.read::<BTreeMap<String, u32>>("nothing")?, None);
        Ok(())
    }

    #[test]
    fn test_write_then_read() -> Result {
        let storage = temporary_storage("write-read");
        let value = BTreeMap::from([("nights".to_owned(), 3_u32)]);
        storage.write("stay", &value)?;
        assert_eq!(storage.read::<BTreeMap<String, u32>>("stay")?, Some(value));
        assert!(storage.root().join("stay.json").is_file());
        Ok(())
    }

    #[test]
    fn test_corrupt_document() -> Result {
        let storage = temporary_storage("corrupt");
        fs::create_dir_all(storage.root())?;
        fs::write(storage.root().join("broken.json"), "{not json")?;
        assert!(storage.read::<BTreeMap<String, u32>>("broken").is_err());
        Ok(())
    }
}
