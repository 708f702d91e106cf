//! ストアのテスト用ヘルパ（一時ディレクトリ・連番 ID・刻み時計・記録ログ）

use crate::adapter::JsonFileRepository;
use crate::domain::VaultPaths;
use crate::usecase::{VaultPorts, VaultStore};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::adapter::StdFileSystem;
use common::error::Error;
use common::ports::outbound::{Clock, FileSystem, IdGenerator, Log, LogLevel, LogRecord};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// 呼ばれるたびに 1 秒進む時計
pub struct StepClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// "id-1", "id-2", ... を返す IdGenerator
pub struct SeqIds {
    next: AtomicUsize,
}

impl SeqIds {
    pub fn new() -> Self {
        Self {
            next: AtomicUsize::new(1),
        }
    }
}

impl IdGenerator for SeqIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// 受け取った LogRecord を蓄積する Log
#[derive(Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 一時ディレクトリ上のストア。`open` を再度呼ぶと再起動相当になる。
pub struct Fixture {
    pub tmp: TempDir,
    pub log: Arc<RecordingLog>,
    ids: Arc<SeqIds>,
    clock: Arc<StepClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tmp: tempfile::tempdir().unwrap(),
            log: Arc::new(RecordingLog::default()),
            ids: Arc::new(SeqIds::new()),
            clock: Arc::new(StepClock::new()),
        }
    }

    pub fn paths(&self) -> VaultPaths {
        VaultPaths::in_dir(self.tmp.path())
    }

    pub fn open(&self) -> VaultStore {
        self.open_with_clock(Arc::clone(&self.clock) as Arc<dyn Clock>)
    }

    /// 時計だけ差し替えて開く
    pub fn open_with_clock(&self, clock: Arc<dyn Clock>) -> VaultStore {
        let paths = self.paths();
        let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
        VaultStore::open(VaultPorts {
            commands: Arc::new(JsonFileRepository::new(Arc::clone(&fs), paths.commands)),
            categories: Arc::new(JsonFileRepository::new(fs, paths.categories)),
            ids: Arc::clone(&self.ids) as Arc<dyn IdGenerator>,
            clock,
            log: Arc::clone(&self.log) as Arc<dyn Log>,
        })
    }

    /// 保存先ファイルをディレクトリに差し替え、以降の保存を失敗させる
    pub fn break_file(&self, path: &std::path::Path) {
        if path.exists() {
            std::fs::remove_file(path).unwrap();
        }
        std::fs::create_dir(path).unwrap();
    }
}

/// 変更通知の回数を数えるコールバックを設定する
pub fn count_notifications(store: &VaultStore) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    store.set_change_callback(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    count
}

pub fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
