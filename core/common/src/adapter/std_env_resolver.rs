//! 標準環境変数解決実装（std::env を委譲）

use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        env::current_dir().map_err(|e| Error::env(format!("current directory: {}", e)))
    }
}
