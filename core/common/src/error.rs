//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。CLI は `exit_code()` で終了コードに変換する。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル I/O の失敗
    #[error("{0}")]
    Io(String),

    /// JSON のシリアライズ・パース失敗
    #[error("json: {0}")]
    Json(String),

    /// 環境（環境変数・カレントディレクトリ）の解決失敗
    #[error("env: {0}")]
    Env(String),

    /// 指定 ID のレコードが存在しない
    #[error("not found: {0}")]
    NotFound(String),

    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// プロセスの終了コード（sysexits.h の値）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::NotFound(_) => 66,
            Error::Env(_) => 70,
            Error::Io(_) => 74,
        }
    }

    /// 使い方（usage）を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::io_msg("disk full");
        assert_eq!(err.exit_code(), 74);
        assert!(!err.is_usage());

        let err = Error::not_found("command abc");
        assert_eq!(err.to_string(), "not found: command abc");
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<Vec<u32>>("{ invalid json }").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.exit_code(), 65);
    }
}
