//! 標準ファイルシステム実装（std::fs を委譲）

use crate::error::Error;
use crate::ports::outbound::{FileMetadata, FileSystem};
use std::path::Path;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::io_msg(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| {
            Error::io_msg(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn metadata(&self, path: &Path) -> Result<Option<FileMetadata>, Error> {
        match std::fs::metadata(path) {
            Ok(m) => Ok(Some(FileMetadata::new(m.is_dir()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_msg(format!(
                "Failed to get metadata for '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_write_truncates_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.json");
        let fs = StdFileSystem;

        fs.write(&path, "a much longer first version").unwrap();
        fs.write(&path, "[]").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_to_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;

        let err = fs.write(tmp.path(), "[]").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_metadata_missing_dir_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;
        let dir = tmp.path().join("nested").join("dir");

        assert_eq!(fs.metadata(&dir).unwrap(), None);
        fs.create_dir_all(&dir).unwrap();
        fs.create_dir_all(&dir).unwrap();
        assert!(fs.metadata(&dir).unwrap().unwrap().is_dir());

        let file = dir.join("f.txt");
        fs.write(&file, "x").unwrap();
        assert!(!fs.metadata(&file).unwrap().unwrap().is_dir());
    }

    #[test]
    fn test_metadata_error_other_than_missing_is_err() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;
        let file = tmp.path().join("plain.txt");
        fs.write(&file, "x").unwrap();

        // 通常ファイルの下は NotFound ではなく NotADirectory になる
        let err = fs.metadata(&file.join("child")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_open_append_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("log.jsonl");
        let fs = StdFileSystem;

        for line in ["one\n", "two\n"] {
            let mut w = fs.open_append(&path).unwrap();
            w.write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(fs.read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
