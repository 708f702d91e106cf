//! コマンドをまとめるカテゴリ（名前 + 表示色）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// カテゴリ 1 件（categories.json の 1 要素）
///
/// 名前はストア内で一意（大文字小文字を区別した完全一致）。
/// `color` は表示用のヒント（例: "#78b4ff"）で、形式は検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            created_at,
        }
    }
}

/// カテゴリごとのコマンド数（category_id が空文字なら未分類）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category_id: String,
    pub count: usize,
}
