//! ユースケース（ストア本体と変更通知）

pub mod change_notifier;
pub mod vault_store;

pub use change_notifier::{ChangeCallback, ChangeNotifier};
pub use vault_store::{VaultPorts, VaultStore};
