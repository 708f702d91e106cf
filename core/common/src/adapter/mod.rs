//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみファイル・時刻・環境に触れる。
//! ここの Std* 実装か、テスト用の実装を注入する。

pub mod file_json_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_id_generator::StdIdGenerator;
