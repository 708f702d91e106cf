//! VaultStore の結合テスト（一時ディレクトリ上の実ファイルを使う）

mod support;
