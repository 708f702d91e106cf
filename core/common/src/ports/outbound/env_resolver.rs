//! 環境変数解決 Outbound ポート
//!
//! 設定ディレクトリの解決に使う環境変数とカレントディレクトリを抽象化する。
//! adapter はこの trait 経由でのみ環境にアクセスする。

use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の固定マップなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数の値。未設定・空文字は None として扱う
    fn var(&self, key: &str) -> Option<String>;

    /// カレントディレクトリを返す
    fn current_dir(&self) -> Result<PathBuf, Error>;
}
