//! 標準の保存先パス解決（CLI オプション・環境変数・プラットフォームの設定ディレクトリ）
//!
//! 解決は失敗しない。設定ディレクトリが見つからない・作れない場合は
//! カレントディレクトリへフォールバックし、その理由を VaultPaths に残す。

use crate::domain::paths::APP_DIR_NAME;
use crate::domain::{PathFallback, VaultPaths};
use crate::ports::outbound::{PathResolverInput, VaultPathResolver};
use common::ports::outbound::{EnvResolver, FileSystem};
use std::path::PathBuf;
use std::sync::Arc;

/// アプリディレクトリそのものを指す環境変数
pub const VAUL_HOME_ENV: &str = "VAUL_HOME";

/// 標準パス解決実装
pub struct StdVaultPathResolver {
    env: Arc<dyn EnvResolver>,
    fs: Arc<dyn FileSystem>,
}

impl StdVaultPathResolver {
    pub fn new(env: Arc<dyn EnvResolver>, fs: Arc<dyn FileSystem>) -> Self {
        Self { env, fs }
    }

    /// アプリディレクトリを決める
    ///
    /// 優先順位:
    /// 1. コマンドラインオプション -d/--home-dir
    /// 2. 環境変数 VAUL_HOME
    /// 3. プラットフォームの設定ディレクトリ/vaul
    fn app_dir(&self, input: &PathResolverInput) -> Option<PathBuf> {
        if let Some(ref home) = input.home_dir {
            if !home.is_empty() {
                return Some(PathBuf::from(home));
            }
        }
        if let Some(home) = self.env.var(VAUL_HOME_ENV) {
            return Some(PathBuf::from(home));
        }
        self.config_root().map(|root| root.join(APP_DIR_NAME))
    }

    /// $XDG_CONFIG_HOME（絶対パスのときのみ）、なければ $HOME/.config
    #[cfg(all(unix, not(target_os = "macos")))]
    fn config_root(&self) -> Option<PathBuf> {
        if let Some(xdg) = self.env.var("XDG_CONFIG_HOME") {
            let xdg = PathBuf::from(xdg);
            if xdg.is_absolute() {
                return Some(xdg);
            }
        }
        self.env
            .var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
    }

    #[cfg(target_os = "macos")]
    fn config_root(&self) -> Option<PathBuf> {
        self.env
            .var("HOME")
            .map(|home| PathBuf::from(home).join("Library").join("Application Support"))
    }

    #[cfg(windows)]
    fn config_root(&self) -> Option<PathBuf> {
        self.env.var("APPDATA").map(PathBuf::from)
    }

    #[cfg(not(any(unix, windows)))]
    fn config_root(&self) -> Option<PathBuf> {
        None
    }
}

impl VaultPathResolver for StdVaultPathResolver {
    fn resolve(&self, input: &PathResolverInput) -> VaultPaths {
        let (dir, fallback) = match self.app_dir(input) {
            Some(dir) => (dir, None),
            None => {
                let cwd = self
                    .env
                    .current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."));
                (cwd.join(APP_DIR_NAME), Some(PathFallback::NoConfigDir))
            }
        };

        if let Err(e) = self.fs.create_dir_all(&dir) {
            return VaultPaths::bare(PathFallback::CreateDirFailed {
                dir,
                reason: e.to_string(),
            });
        }
        VaultPaths::in_dir(&dir).with_fallback(fallback)
    }
}
