//! Outbound ポート: ストアが外界（ファイル・パス解決）を使うための trait

pub mod path_resolver;
pub mod record_repository;

pub use path_resolver::{PathResolverInput, VaultPathResolver};
pub use record_repository::RecordRepository;
