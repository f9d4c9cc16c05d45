/*
 * optlight プレイグラウンド - メインエントリーポイント
 *
 * オプショナル値のレッスンページを実行するCLIツールのエントリーポイントです。
 * コマンドライン引数の解析とログの初期化を行い、処理ロジックを呼び出します。
 */

use clap::Parser;
use log::{debug, error};

mod cli;
mod config;
mod pages;

fn main() -> anyhow::Result<()> {
    // コマンドライン引数の解析
    let cli = cli::Cli::parse();

    // ロギングの初期化
    cli::setup_logging(cli.verbose, cli.quiet);
    debug!("optlight プレイグラウンド v{} を起動しています", optlight_core::VERSION);

    let result = cli::run_playground(&cli);
    if let Err(e) = &result {
        error!("実行に失敗しました: {:#}", e);
    }
    result
}
