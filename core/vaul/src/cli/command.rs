//! vaul のサブコマンド enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner が match でディスパッチする。

/// `category create` で色を省略したときの色
pub const DEFAULT_CATEGORY_COLOR: &str = "#78b4ff";

/// vaul のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// ヘルプ表示（コマンド未指定時も含む）
    Help,

    /// コマンドを追加（add <content...> [-c id]）
    Add {
        content: String,
        category: Option<String>,
    },
    /// コマンド一覧（list [-c id]）。新しい順。
    List { category: Option<String> },
    /// コマンド削除（delete <id>）
    Delete { id: String },

    /// カテゴリ作成（category create <name> [--color c]）
    CategoryCreate { name: String, color: String },
    /// カテゴリ一覧とコマンド数（category list）
    CategoryList,
    /// カテゴリ変更（category update <id> <name> [--color c]）。色省略時は現在の色のまま。
    CategoryUpdate {
        id: String,
        name: String,
        color: Option<String>,
    },
    /// カテゴリ削除（category delete <id> [--reassign id]）
    CategoryDelete { id: String, reassign_to: String },
    /// カテゴリ統合（category merge <source> <target>）
    CategoryMerge { source: String, target: String },

    /// コマンドのカテゴリ付け替え（assign <command-id> [category-id]）。省略で未分類。
    Assign {
        command_id: String,
        category_id: String,
    },

    /// 保存先パスの表示
    Paths,
}

impl CliCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            CliCommand::Help => "help",
            CliCommand::Add { .. } => "add",
            CliCommand::List { .. } => "list",
            CliCommand::Delete { .. } => "delete",
            CliCommand::CategoryCreate { .. } => "category create",
            CliCommand::CategoryList => "category list",
            CliCommand::CategoryUpdate { .. } => "category update",
            CliCommand::CategoryDelete { .. } => "category delete",
            CliCommand::CategoryMerge { .. } => "category merge",
            CliCommand::Assign { .. } => "assign",
            CliCommand::Paths => "paths",
        }
    }

    /// ストアを開く必要があるか（help / paths は不要）
    pub fn needs_store(&self) -> bool {
        !matches!(self, CliCommand::Help | CliCommand::Paths)
    }
}
