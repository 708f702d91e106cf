//! 配線: CLI 用の App（ストア・パス・ログ）を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StdFileSystem};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use vaul::wiring::{open_store, resolve_paths};
use vaul::{PathResolverInput, VaultPaths, VaultStore};

/// ログファイル名（アプリディレクトリ直下の logs/ に置く）
pub const LOG_FILENAME: &str = "vaul.jsonl";

/// 配線で組み立てた App（main の CliCommand ディスパッチで利用）
pub struct App {
    pub paths: VaultPaths,
    pub logger: Arc<dyn Log>,
    store: Option<VaultStore>,
}

impl App {
    /// 開いたストア。open_store = false で組み立てた場合はエラー。
    pub fn store(&self) -> Result<&VaultStore, Error> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::env("vault store is not open"))
    }
}

/// アプリディレクトリが解決できた場合のみログファイルを使う
pub fn log_file_path(paths: &VaultPaths) -> Option<PathBuf> {
    paths
        .dir
        .as_ref()
        .map(|dir| dir.join("logs").join(LOG_FILENAME))
}

/// 配線: パスを解決し、必要ならストアを開いて変更通知をログへ流す
pub fn wire_app(home_dir: Option<String>, open: bool) -> App {
    let paths = resolve_paths(&PathResolverInput { home_dir });
    let logger: Arc<dyn Log> = match log_file_path(&paths) {
        Some(path) => Arc::new(FileJsonLog::new(Arc::new(StdFileSystem), path)),
        None => Arc::new(NoopLog),
    };

    let store = open.then(|| {
        let store = open_store(&paths, Arc::clone(&logger));
        let notify_log = Arc::clone(&logger);
        store.set_change_callback(move || {
            let _ = notify_log.log(
                &LogRecord::now(LogLevel::Info, "vault updated")
                    .layer("cli")
                    .kind("notify"),
            );
        });
        store
    });

    App {
        paths,
        logger,
        store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_under_app_dir() {
        let paths = VaultPaths::in_dir("/tmp/vaul-app");
        assert_eq!(
            log_file_path(&paths),
            Some(PathBuf::from("/tmp/vaul-app/logs/vaul.jsonl"))
        );
    }

    #[test]
    fn test_log_file_path_none_when_degraded_to_bare_names() {
        let paths = VaultPaths::bare(vaul::PathFallback::NoConfigDir);
        assert_eq!(log_file_path(&paths), None);
    }

    #[test]
    fn test_wire_app_logs_notifications() {
        let tmp = tempfile::tempdir().unwrap();
        let app = wire_app(Some(tmp.path().to_string_lossy().to_string()), true);

        app.store().unwrap().add_command("ls").unwrap();

        let log = std::fs::read_to_string(tmp.path().join("logs").join(LOG_FILENAME)).unwrap();
        assert!(log.contains("\"vault updated\""));
        assert!(log.contains("\"command added\""));
    }

    #[test]
    fn test_wire_app_without_store() {
        let tmp = tempfile::tempdir().unwrap();
        let app = wire_app(Some(tmp.path().to_string_lossy().to_string()), false);
        assert!(app.store().is_err());
        assert_eq!(app.paths.dir.as_deref(), Some(tmp.path()));
    }
}
