//! 時刻取得 Outbound ポート
//!
//! usecase はこの trait 経由で「現在時刻」を取得し、レコードの createdAt に使う。

use chrono::{DateTime, Utc};

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在時刻（UTC）
    fn now(&self) -> DateTime<Utc>;
}
