//! ファイルシステム Outbound ポート
//!
//! usecase / adapter はこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::Path;

/// ファイルメタデータ（種別のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    is_dir: bool,
}

impl FileMetadata {
    pub fn new(is_dir: bool) -> Self {
        Self { is_dir }
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` など。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// 内容を丸ごと書き込む（存在すれば truncate してから書く）
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// パスが存在しなければ Ok(None)。権限不足など他の失敗は Err
    fn metadata(&self, path: &Path) -> Result<Option<FileMetadata>, Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
}
