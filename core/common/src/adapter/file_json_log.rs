//! Log の実装: `<app dir>/logs/vaul.jsonl` への追記と、何もしない NoopLog

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    // 複数スレッドからの追記で行が混ざらないように直列化する
    write_lock: Mutex<()>,
}

impl FileJsonLog {
    /// 親ディレクトリは最初の書き込み時に作る
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        let mut w = self.fs.open_append(&self.path)?;
        use std::io::Write;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（テスト用・ログ無効時）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
