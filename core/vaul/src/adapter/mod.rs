//! アダプター（vaul の Outbound ポートの標準実装）

pub mod json_file_repository;
pub mod std_path_resolver;

pub use json_file_repository::JsonFileRepository;
pub use std_path_resolver::{StdVaultPathResolver, VAUL_HOME_ENV};
