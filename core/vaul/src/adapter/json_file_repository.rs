//! レコード列を整形済み JSON 配列として 1 ファイルに保存するリポジトリ

use crate::ports::outbound::RecordRepository;
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// `path` に `Vec<T>` を pretty JSON で読み書きする RecordRepository 実装
pub struct JsonFileRepository<T> {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T> {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            _records: PhantomData,
        }
    }
}

impl<T> RecordRepository<T> for JsonFileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<Vec<T>>, Error> {
        match self.fs.metadata(&self.path)? {
            None => return Ok(None),
            Some(m) if m.is_dir() => {
                return Err(Error::io_msg(format!(
                    "{} is a directory",
                    self.path.display()
                )))
            }
            Some(_) => {}
        }
        let s = self.fs.read_to_string(&self.path)?;
        let records = serde_json::from_str(&s)
            .map_err(|e| Error::json(format!("parse {}: {}", self.path.display(), e)))?;
        Ok(Some(records))
    }

    fn save(&self, records: &[T]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| Error::json(format!("serialize {}: {}", self.path.display(), e)))?;
        self.fs.write(&self.path, &json)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
