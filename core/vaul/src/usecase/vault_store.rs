//! コマンド・カテゴリのストア
//!
//! メモリ上の 2 つの順序付きコレクションを唯一の正とし、変更のたびに
//! commands.json / categories.json へ全件を書き直す。
//!
//! - コマンドは新しいものが先頭（追加は先頭へ挿入）、カテゴリは作成順（末尾へ追加）
//! - 保存に失敗した変更はメモリ上でも取り消し、エラーを呼び出し側へ返す
//! - 変更通知は保存成功後、内部ロックを解放してから同期的に呼ぶ
//! - Command.category が既存の Category を指すかは検証しない

use crate::domain::{Category, CategoryCount, Command};
use crate::ports::outbound::RecordRepository;
use crate::usecase::change_notifier::ChangeNotifier;
use common::error::Error;
use common::ports::outbound::{Clock, IdGenerator, Log, LogLevel, LogRecord};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// VaultStore が使う Outbound ポート一式
pub struct VaultPorts {
    pub commands: Arc<dyn RecordRepository<Command>>,
    pub categories: Arc<dyn RecordRepository<Category>>,
    pub ids: Arc<dyn IdGenerator>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

#[derive(Debug, Clone, Default)]
struct VaultState {
    commands: Vec<Command>,
    categories: Vec<Category>,
}

/// コマンド・カテゴリのストア（スレッド間で共有可能）
pub struct VaultStore {
    state: Mutex<VaultState>,
    commands_repo: Arc<dyn RecordRepository<Command>>,
    categories_repo: Arc<dyn RecordRepository<Category>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    notifier: ChangeNotifier,
}

impl VaultStore {
    /// ポートを受け取り、両ファイルを読み込んだストアを返す
    pub fn open(ports: VaultPorts) -> Self {
        let store = Self {
            state: Mutex::new(VaultState::default()),
            commands_repo: ports.commands,
            categories_repo: ports.categories,
            ids: ports.ids,
            clock: ports.clock,
            log: ports.log,
            notifier: ChangeNotifier::new(),
        };
        store.reload();
        store
    }

    /// 両ファイルを読み直す。無い・壊れているファイルは空として扱う。
    pub fn reload(&self) {
        let mut state = self.lock();
        state.commands = self.load_records(self.commands_repo.as_ref(), "commands");
        state.categories = self.load_records(self.categories_repo.as_ref(), "categories");
    }

    pub fn commands_path(&self) -> &Path {
        self.commands_repo.location()
    }

    pub fn categories_path(&self) -> &Path {
        self.categories_repo.location()
    }

    /// 変更通知のコールバックを設定する（既存のものは置き換え）
    pub fn set_change_callback<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.set(Arc::new(callback));
    }

    pub fn clear_change_callback(&self) {
        self.notifier.clear();
    }

    // --- commands ------------------------------------------------------------------------------

    /// 未分類のコマンドを先頭に追加する
    pub fn add_command(&self, content: &str) -> Result<Command, Error> {
        self.add_command_with_category(content, "")
    }

    /// カテゴリ付きでコマンドを先頭に追加する（category_id の存在は検証しない）
    pub fn add_command_with_category(
        &self,
        content: &str,
        category_id: &str,
    ) -> Result<Command, Error> {
        let command = {
            let mut state = self.lock();
            // 先頭の createdAt が常に最新になるよう、時刻はロック内で取る
            let command =
                Command::new(self.ids.next_id(), content, self.clock.now(), category_id);
            state.commands.insert(0, command.clone());
            if let Err(e) = self.save_commands(&state.commands) {
                state.commands.remove(0);
                return Err(e);
            }
            command
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "command added")
                .field("command_id", command.id.as_str())
                .field("category", command.category.as_str()),
        );
        self.notifier.notify();
        Ok(command)
    }

    /// 現在の並び（新しい順）のスナップショット
    pub fn get_commands(&self) -> Vec<Command> {
        self.lock().commands.clone()
    }

    /// ID が一致する最初のコマンドを削除する。見つからなければ何もせず Ok。
    pub fn delete_command(&self, id: &str) -> Result<(), Error> {
        {
            let mut state = self.lock();
            let Some(pos) = state.commands.iter().position(|c| c.id == id) else {
                return Ok(());
            };
            let removed = state.commands.remove(pos);
            if let Err(e) = self.save_commands(&state.commands) {
                state.commands.insert(pos, removed);
                return Err(e);
            }
        }
        self.emit(LogRecord::now(LogLevel::Info, "command deleted").field("command_id", id));
        self.notifier.notify();
        Ok(())
    }

    /// コマンドのカテゴリを付け替える（並び順は変えない）
    pub fn set_command_category(
        &self,
        command_id: &str,
        category_id: &str,
    ) -> Result<Command, Error> {
        let updated = {
            let mut state = self.lock();
            let pos = state
                .commands
                .iter()
                .position(|c| c.id == command_id)
                .ok_or_else(|| Error::not_found(format!("command {}", command_id)))?;
            if state.commands[pos].category == category_id {
                return Ok(state.commands[pos].clone());
            }
            let previous = std::mem::replace(
                &mut state.commands[pos].category,
                category_id.to_string(),
            );
            if let Err(e) = self.save_commands(&state.commands) {
                state.commands[pos].category = previous;
                return Err(e);
            }
            state.commands[pos].clone()
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "command recategorized")
                .field("command_id", command_id)
                .field("category", category_id),
        );
        self.notifier.notify();
        Ok(updated)
    }

    // --- categories ----------------------------------------------------------------------------

    /// カテゴリを作成する。同名のカテゴリがあればそれをそのまま返す（保存・通知なし）。
    pub fn create_category(&self, name: &str, color: &str) -> Result<Category, Error> {
        let category = {
            let mut state = self.lock();
            if let Some(existing) = state.categories.iter().find(|c| c.name == name) {
                return Ok(existing.clone());
            }
            let category = Category::new(self.ids.next_id(), name, color, self.clock.now());
            state.categories.push(category.clone());
            if let Err(e) = self.save_categories(&state.categories) {
                state.categories.pop();
                return Err(e);
            }
            category
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "category created")
                .field("category_id", category.id.as_str())
                .field("name", category.name.as_str()),
        );
        self.notifier.notify();
        Ok(category)
    }

    /// 現在の並び（作成順）のスナップショット
    pub fn get_categories(&self) -> Vec<Category> {
        self.lock().categories.clone()
    }

    /// 名前・色を変更する。他のカテゴリと同名にはできない。
    pub fn update_category(&self, id: &str, name: &str, color: &str) -> Result<Category, Error> {
        let updated = {
            let mut state = self.lock();
            let pos = state
                .categories
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| Error::not_found(format!("category {}", id)))?;
            if state.categories.iter().any(|c| c.id != id && c.name == name) {
                return Err(Error::invalid_argument(format!(
                    "category name already exists: {}",
                    name
                )));
            }
            let current = &state.categories[pos];
            if current.name == name && current.color == color {
                return Ok(current.clone());
            }
            let previous = current.clone();
            state.categories[pos].name = name.to_string();
            state.categories[pos].color = color.to_string();
            if let Err(e) = self.save_categories(&state.categories) {
                state.categories[pos] = previous;
                return Err(e);
            }
            state.categories[pos].clone()
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "category updated")
                .field("category_id", id)
                .field("name", name),
        );
        self.notifier.notify();
        Ok(updated)
    }

    /// カテゴリを削除し、所属していたコマンドを reassign_to（空文字なら未分類）へ移す。
    /// 見つからなければ何もせず Ok。
    pub fn delete_category(&self, id: &str, reassign_to: &str) -> Result<(), Error> {
        let moved = {
            let mut state = self.lock();
            let Some(pos) = state.categories.iter().position(|c| c.id == id) else {
                return Ok(());
            };
            let snapshot = VaultState::clone(&state);
            state.categories.remove(pos);
            let moved = reassign(&mut state.commands, id, reassign_to);
            self.persist_all(&mut state, snapshot, moved > 0)?;
            moved
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "category deleted")
                .field("category_id", id)
                .field("reassign_to", reassign_to)
                .field("moved", moved),
        );
        self.notifier.notify();
        Ok(())
    }

    /// source のコマンドをすべて target へ移し、source を削除する。
    /// target が無ければ NotFound、source が無ければ何もせず Ok。
    pub fn merge_categories(&self, source_id: &str, target_id: &str) -> Result<(), Error> {
        if source_id == target_id {
            return Ok(());
        }
        let moved = {
            let mut state = self.lock();
            if !state.categories.iter().any(|c| c.id == target_id) {
                return Err(Error::not_found(format!("category {}", target_id)));
            }
            let Some(pos) = state.categories.iter().position(|c| c.id == source_id) else {
                return Ok(());
            };
            let snapshot = VaultState::clone(&state);
            state.categories.remove(pos);
            let moved = reassign(&mut state.commands, source_id, target_id);
            self.persist_all(&mut state, snapshot, moved > 0)?;
            moved
        };
        self.emit(
            LogRecord::now(LogLevel::Info, "categories merged")
                .field("source", source_id)
                .field("target", target_id)
                .field("moved", moved),
        );
        self.notifier.notify();
        Ok(())
    }

    /// カテゴリごとのコマンド数（カテゴリの並び順、最後に未分類 ""）
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let state = self.lock();
        let count_of = |id: &str| state.commands.iter().filter(|c| c.category == id).count();
        let mut counts: Vec<CategoryCount> = state
            .categories
            .iter()
            .map(|cat| CategoryCount {
                category_id: cat.id.clone(),
                count: count_of(&cat.id),
            })
            .collect();
        counts.push(CategoryCount {
            category_id: String::new(),
            count: count_of(""),
        });
        counts
    }

    // --- persistence ---------------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, VaultState> {
        // 変更は保存失敗時に巻き戻すため、poison されても状態は一貫している
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_records<T>(&self, repo: &dyn RecordRepository<T>, what: &str) -> Vec<T> {
        match repo.load() {
            Ok(Some(records)) => {
                self.emit(
                    LogRecord::now(LogLevel::Debug, "store loaded")
                        .field("file", what)
                        .field("path", repo.location().display().to_string())
                        .field("count", records.len()),
                );
                records
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                self.emit(
                    LogRecord::now(LogLevel::Warn, "store load failed; starting empty")
                        .field("file", what)
                        .field("path", repo.location().display().to_string())
                        .field("error", e.to_string()),
                );
                Vec::new()
            }
        }
    }

    fn save_records<T>(
        &self,
        repo: &dyn RecordRepository<T>,
        records: &[T],
        what: &str,
    ) -> Result<(), Error> {
        repo.save(records).map_err(|e| {
            self.emit(
                LogRecord::now(LogLevel::Error, "store save failed")
                    .field("file", what)
                    .field("path", repo.location().display().to_string())
                    .field("error", e.to_string()),
            );
            e
        })
    }

    fn save_commands(&self, commands: &[Command]) -> Result<(), Error> {
        self.save_records(self.commands_repo.as_ref(), commands, "commands")
    }

    fn save_categories(&self, categories: &[Category]) -> Result<(), Error> {
        self.save_records(self.categories_repo.as_ref(), categories, "categories")
    }

    /// commands → categories の順に保存する。
    /// 失敗したらメモリを snapshot に戻し、書き込み済みの commands.json も元に戻す。
    fn persist_all(
        &self,
        state: &mut VaultState,
        snapshot: VaultState,
        commands_changed: bool,
    ) -> Result<(), Error> {
        if commands_changed {
            if let Err(e) = self.save_commands(&state.commands) {
                *state = snapshot;
                return Err(e);
            }
        }
        if let Err(e) = self.save_categories(&state.categories) {
            if commands_changed && self.save_commands(&snapshot.commands).is_err() {
                self.emit(LogRecord::now(
                    LogLevel::Error,
                    "commands file could not be restored after failed category save",
                ));
            }
            *state = snapshot;
            return Err(e);
        }
        Ok(())
    }

    fn emit(&self, record: LogRecord) {
        let _ = self.log.log(&record.layer("usecase").kind("store"));
    }
}

/// from に属するコマンドを to へ付け替え、件数を返す
fn reassign(commands: &mut [Command], from: &str, to: &str) -> usize {
    let mut moved = 0;
    for command in commands.iter_mut().filter(|c| c.category == from) {
        command.category = to.to_string();
        moved += 1;
    }
    moved
}
