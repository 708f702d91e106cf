//! 保存先パス解決 Outbound ポート
//!
//! ストアはこの trait 経由で commands.json / categories.json の場所を得る。

use crate::domain::VaultPaths;

/// パス解決の入力（CLI の home_dir オプション）
#[derive(Debug, Clone, Default)]
pub struct PathResolverInput {
    pub home_dir: Option<String>,
}

/// 保存先パス解決抽象（Outbound ポート）
///
/// 失敗はエラーにせず、フォールバックしたパスと理由（`VaultPaths::fallback`）を返す。
pub trait VaultPathResolver: Send + Sync {
    fn resolve(&self, input: &PathResolverInput) -> VaultPaths;
}
