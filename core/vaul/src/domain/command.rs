//! 保存されたターミナルコマンド

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 保存されたコマンド 1 件（commands.json の 1 要素）
///
/// `category` は Category の id を指すが、存在は検証しない。空文字は未分類。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// カテゴリ導入前のファイルには無いため、欠けていれば未分類
    #[serde(default)]
    pub category: String,
}

impl Command {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created_at,
            category: category.into(),
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }
}
