//! ドメイン型（レコード・保存先パス）

pub mod category;
pub mod command;
pub mod paths;

pub use category::{Category, CategoryCount};
pub use command::Command;
pub use paths::{PathFallback, VaultPaths};
