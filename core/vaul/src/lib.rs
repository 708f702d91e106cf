//! VAUL: ターミナルコマンドの保管庫
//!
//! コマンドとカテゴリをメモリに保持し、ユーザー設定ディレクトリの JSON ファイルへ永続化する。
//! 変更は単一のコールバックで GUI / CLI などのホストへ通知する。

pub mod adapter;
pub mod domain;
pub mod ports;
pub mod usecase;
pub mod wiring;

pub use domain::{Category, CategoryCount, Command, PathFallback, VaultPaths};
pub use ports::outbound::PathResolverInput;
pub use usecase::{VaultPorts, VaultStore};

#[cfg(test)]
mod tests;
