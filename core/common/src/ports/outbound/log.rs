//! 構造化ログ Outbound ポート
//!
//! ストアの読み込み・保存・パス解決のフォールバック・CLI のライフサイクルを JSONL で残す。
//! ユーザー向けのエラー表示（stderr の `vaul: ...`）はこのポートを通らない。

use crate::error::Error;
use serde::Serialize;
use std::collections::BTreeMap;

/// LogRecord の `ts`（RFC3339, UTC）
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// JSONL の 1 行
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// ISO8601 形式のタイムスタンプ
    pub ts: String,
    pub level: LogLevel,
    pub message: String,
    /// 例: cli, usecase, adapter, wiring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// 例: lifecycle, store, paths, notify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 追加のキー・値（オブジェクトとして出力）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, serde_json::Value>>,
}

impl LogRecord {
    /// ts を現在時刻にしたレコードを作る
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            ts: now_iso8601(),
            level,
            message: message.into(),
            layer: None,
            kind: None,
            fields: None,
        }
    }

    pub fn layer(mut self, layer: &str) -> Self {
        self.layer = Some(layer.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    /// フィールドを 1 つ追加する
    pub fn field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// 構造化ログを出力する Outbound ポート
///
/// 実装は common::adapter::FileJsonLog（ファイルへ JSONL 追記）や NoopLog（テスト用）など。
pub trait Log: Send + Sync {
    /// 書き込みに失敗しても呼び出し側は処理を続ける（結果は捨ててよい）
    fn log(&self, record: &LogRecord) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_serialize() {
        let rec = LogRecord {
            ts: "2026-02-07T12:00:00Z".to_string(),
            level: LogLevel::Info,
            message: "command added".to_string(),
            layer: Some("usecase".to_string()),
            kind: Some("store".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("command_id".to_string(), serde_json::json!("abc"));
                Some(m)
            },
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"ts\":\"2026-02-07T12:00:00Z\""));
        assert!(json.contains("\"level\":\"info\""));
        assert!(json.contains("\"message\":\"command added\""));
        assert!(json.contains("\"layer\":\"usecase\""));
        assert!(json.contains("\"kind\":\"store\""));
        assert!(json.contains("\"command_id\":\"abc\""));
    }

    #[test]
    fn test_builder_skips_empty_optionals() {
        let rec = LogRecord::now(LogLevel::Warn, "paths degraded");
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"level\":\"warn\""));
        assert!(!json.contains("layer"));
        assert!(!json.contains("fields"));

        let rec = rec.layer("wiring").kind("paths").field("count", 3);
        assert_eq!(rec.layer.as_deref(), Some("wiring"));
        assert_eq!(rec.fields.unwrap()["count"], serde_json::json!(3));
    }
}
