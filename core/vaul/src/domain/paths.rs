//! 解決済みの保存先パス
//!
//! パス解決は常に何らかのパスを返す。フォールバックした場合は `fallback` に理由を残し、
//! 呼び出し側がログに出せるようにする。

use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "vaul";
pub const COMMANDS_FILENAME: &str = "commands.json";
pub const CATEGORIES_FILENAME: &str = "categories.json";

/// どのフォールバックを通ったか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFallback {
    /// 設定ディレクトリが見つからず、カレントディレクトリ配下にアプリディレクトリを置いた
    NoConfigDir,
    /// アプリディレクトリを作成できず、カレントディレクトリ直下のファイル名を使う
    CreateDirFailed { dir: PathBuf, reason: String },
}

impl std::fmt::Display for PathFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathFallback::NoConfigDir => {
                write!(f, "no user config directory; using the current directory")
            }
            PathFallback::CreateDirFailed { dir, reason } => write!(
                f,
                "cannot create '{}' ({}); using bare file names in the current directory",
                dir.display(),
                reason
            ),
        }
    }
}

/// commands.json / categories.json の保存先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    /// アプリディレクトリ（ファイル名のみにフォールバックした場合は None）
    pub dir: Option<PathBuf>,
    pub commands: PathBuf,
    pub categories: PathBuf,
    pub fallback: Option<PathFallback>,
}

impl VaultPaths {
    /// 指定ディレクトリ配下の 2 ファイル
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dir: Some(dir.to_path_buf()),
            commands: dir.join(COMMANDS_FILENAME),
            categories: dir.join(CATEGORIES_FILENAME),
            fallback: None,
        }
    }

    /// カレントディレクトリ相対のファイル名のみ
    pub fn bare(fallback: PathFallback) -> Self {
        Self {
            dir: None,
            commands: PathBuf::from(COMMANDS_FILENAME),
            categories: PathBuf::from(CATEGORIES_FILENAME),
            fallback: Some(fallback),
        }
    }

    pub fn with_fallback(mut self, fallback: Option<PathFallback>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}
