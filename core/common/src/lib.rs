//! VAUL 共通ライブラリ
//!
//! `vaul` のストアと CLI で共有するエラー型・ポート・標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;
