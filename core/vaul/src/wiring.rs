//! 配線: 標準アダプタで VaultStore を組み立てる

use std::sync::Arc;

use common::adapter::{StdClock, StdEnvResolver, StdFileSystem, StdIdGenerator};
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};

use crate::adapter::{JsonFileRepository, StdVaultPathResolver};
use crate::domain::VaultPaths;
use crate::ports::outbound::{PathResolverInput, VaultPathResolver};
use crate::usecase::{VaultPorts, VaultStore};

/// 標準の環境・FS で保存先を解決する（必要ならアプリディレクトリを作成）
pub fn resolve_paths(input: &PathResolverInput) -> VaultPaths {
    StdVaultPathResolver::new(Arc::new(StdEnvResolver), Arc::new(StdFileSystem)).resolve(input)
}

/// 解決済みのパスで VaultStore を開く（両ファイルを読み込む）
///
/// フォールバックしたパスの場合は警告をログに残す。
pub fn open_store(paths: &VaultPaths, log: Arc<dyn Log>) -> VaultStore {
    if let Some(ref fallback) = paths.fallback {
        let _ = log.log(
            &LogRecord::now(LogLevel::Warn, "vault paths degraded")
                .layer("wiring")
                .kind("paths")
                .field("reason", fallback.to_string())
                .field("commands", paths.commands.display().to_string()),
        );
    }
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    VaultStore::open(VaultPorts {
        commands: Arc::new(JsonFileRepository::new(Arc::clone(&fs), paths.commands.clone())),
        categories: Arc::new(JsonFileRepository::new(fs, paths.categories.clone())),
        ids: Arc::new(StdIdGenerator),
        clock: Arc::new(StdClock),
        log,
    })
}

/// パス解決から読み込みまで（ホストが使う既定の入口）
pub fn open_default(input: &PathResolverInput, log: Arc<dyn Log>) -> (VaultStore, VaultPaths) {
    let paths = resolve_paths(input);
    let store = open_store(&paths, log);
    (store, paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::NoopLog;

    #[test]
    fn test_open_default_uses_home_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let input = PathResolverInput {
            home_dir: Some(tmp.path().to_string_lossy().to_string()),
        };

        let (store, paths) = open_default(&input, Arc::new(NoopLog));
        store.add_command("ls -la").unwrap();

        assert!(!paths.is_degraded());
        assert_eq!(store.commands_path(), tmp.path().join("commands.json"));
        assert!(tmp.path().join("commands.json").exists());
        assert!(!tmp.path().join("categories.json").exists());
    }
}
