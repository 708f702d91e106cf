//! 変更通知（単一スロットのコールバック）

use std::sync::{Arc, Mutex, PoisonError};

/// 永続化済みの変更を知らせる引数なしコールバック
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// コールバックを 1 つだけ保持し、変更時に同期的に呼び出す
#[derive(Default)]
pub struct ChangeNotifier {
    slot: Mutex<Option<ChangeCallback>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// コールバックを設定する（既存のものは置き換え）
    pub fn set(&self, callback: ChangeCallback) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// 設定済みならコールバックを呼ぶ。未設定なら何もしない。
    ///
    /// スロットのロックは呼び出し前に解放する（コールバック内から set / clear できる）。
    pub fn notify(&self) {
        let callback = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("is_set", &self.is_set())
            .finish()
    }
}
