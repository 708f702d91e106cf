//! UUID v4 で ID を生成する IdGenerator の標準実装

use crate::ports::outbound::IdGenerator;
use uuid::Uuid;

/// UUID v4（ハイフン区切り 36 文字）を返す標準実装
#[derive(Debug, Clone, Default)]
pub struct StdIdGenerator;

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
