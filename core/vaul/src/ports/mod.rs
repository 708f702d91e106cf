//! Ports & Adapters のポート定義
//!
//! - outbound: レコードの永続化・保存先の解決（common の FileSystem / Clock / IdGenerator / Log も利用）

pub mod outbound;
