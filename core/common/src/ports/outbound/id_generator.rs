//! レコード ID 生成 Outbound ポート
//!
//! usecase は IdGenerator を注入し、テストでは連番 ID を返す実装を渡せる。

/// 一意な ID 文字列を生成する抽象（Outbound ポート）
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
