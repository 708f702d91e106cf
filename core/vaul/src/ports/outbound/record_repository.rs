//! レコード列の永続化 Outbound ポート
//!
//! 1 ファイル = 1 コレクション。保存は常に全件の書き直し。

use common::error::Error;
use std::path::Path;

/// 順序付きレコード列を読み書きする抽象（Outbound ポート）
///
/// 実装は `crate::adapter::JsonFileRepository` など。
pub trait RecordRepository<T>: Send + Sync {
    /// 全件を読み込む。ファイルが無ければ Ok(None)、読めない・壊れている場合は Err
    fn load(&self) -> Result<Option<Vec<T>>, Error>;

    /// 全件を書き込む（既存内容は置き換え）
    fn save(&self, records: &[T]) -> Result<(), Error>;

    /// 保存先（ログ・表示用）
    fn location(&self) -> &Path;
}
