/*
 * optlight プレイグラウンド - コマンドライン引数処理モジュール
 *
 * コマンドライン引数を解析し、レッスンページの実行や演習の呼び出しに変換します。
 */

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use optlight_core::core::parse;
use optlight_core::{has_feature, Absent, Optional, VERSION};

use crate::config::{self, PlaygroundConfig};
use crate::pages::{self, PAGES};

/// オプショナル値のレッスンを実行するプレイグラウンド
#[derive(Parser, Debug)]
#[command(name = "optlight")]
#[command(version = VERSION)]
#[command(about = "オプショナル値のレッスンを実行するプレイグラウンド", long_about = None)]
pub struct Cli {
    /// 詳細なログ出力を有効にする
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 不要な出力を抑制する
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// 設定ファイルへのパス
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// ページ見出しのカラー表示を無効にする
    #[arg(long, global = true)]
    pub no_color: bool,

    /// サブコマンド
    #[command(subcommand)]
    pub command: Commands,
}

/// プレイグラウンドのサブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// レッスンページの一覧を表示
    List,

    /// レッスンページを実行
    Run(RunArgs),

    /// 演習：値を2乗する。値がなければ -1
    Square(SquareArgs),
}

/// runサブコマンドの引数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// 実行するページ名（省略時は設定ファイルの順序）
    pub pages: Vec<String>,

    /// すべてのページを定義順に実行
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,
}

/// squareサブコマンドの引数
#[derive(Args, Debug)]
pub struct SquareArgs {
    /// 2乗する整数
    #[arg(allow_negative_numbers = true)]
    pub value: Option<String>,
}

/// ログ設定を初期化
pub fn setup_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default().filter_or(
        "OPTLIGHT_LOG",
        if verbose {
            "debug"
        } else if quiet {
            "error"
        } else {
            "info"
        },
    );

    env_logger::Builder::from_env(env)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_module_path(verbose)
        .init();
}

/// CLIからプレイグラウンドを実行
pub fn run_playground(cli: &Cli) -> Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if cli.no_color {
        config.general.color = false;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::List => list(&mut out)?,
        Commands::Run(args) => run(args, &config, &mut out)?,
        Commands::Square(args) => square(args, &mut out)?,
    }

    out.flush().context("標準出力への書き込みに失敗しました")?;
    Ok(())
}

/// listコマンドの処理
fn list(out: &mut dyn Write) -> Result<()> {
    for page in PAGES {
        if !has_feature(page.feature) {
            warn!("ページ '{}' は未知の機能 '{}' を参照しています", page.id, page.feature);
            continue;
        }
        writeln!(out, "{:<16} {} [{}]", page.id, page.title, page.feature)?;
    }
    Ok(())
}

/// runコマンドの処理
fn run(args: &RunArgs, config: &PlaygroundConfig, out: &mut dyn Write) -> Result<()> {
    let ids: Vec<String> = if args.all {
        PAGES.iter().map(|page| page.id.to_string()).collect()
    } else if args.pages.is_empty() {
        config.general.pages.clone()
    } else {
        args.pages.clone()
    };

    info!("{} ページを実行します", ids.len());
    pages::run_pages(&ids, config, out)
}

/// squareコマンドの処理
fn square(args: &SquareArgs, out: &mut dyn Write) -> Result<()> {
    let number: Optional<i64> = match &args.value {
        Some(text) => {
            let number = parse(text);
            if number.is_absent() {
                warn!("整数として解釈できないため nil として扱います: {:?}", text);
            }
            number
        }
        None => Absent,
    };
    writeln!(out, "{}", pages::square_or_negative_one(number)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_square(value: Option<&str>) -> String {
        let mut out = Vec::<u8>::new();
        let args = SquareArgs {
            value: value.map(str::to_string),
        };
        square(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["optlight", "--no-color", "run", "basic", "guard"]).unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.pages, vec!["basic", "guard"]),
            _ => panic!("runコマンドとして解析されるべきです"),
        }
    }

    #[test]
    fn test_all_conflicts_with_pages() {
        assert!(Cli::try_parse_from(["optlight", "run", "--all", "basic"]).is_err());
    }

    #[test]
    fn test_square_command() {
        assert_eq!(render_square(Some("7")), "49\n");
        assert_eq!(render_square(Some("seven")), "-1\n");
        assert_eq!(render_square(None), "-1\n");
        assert_eq!(render_square(Some("-3")), "9\n");
    }

    #[test]
    fn test_square_accepts_negative_number() {
        let cli = Cli::try_parse_from(["optlight", "square", "-3"]).unwrap();
        match cli.command {
            Commands::Square(args) => assert_eq!(args.value.as_deref(), Some("-3")),
            _ => panic!("squareコマンドとして解析されるべきです"),
        }
    }

    #[test]
    fn test_square_overflow_is_error() {
        let mut out = Vec::<u8>::new();
        let args = SquareArgs {
            value: Some("9999999999".to_string()),
        };
        assert!(square(&args, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_command() {
        let mut out = Vec::<u8>::new();
        list(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), PAGES.len());
        assert!(output.contains("chaining"));
    }

    #[test]
    fn test_run_uses_configured_order() {
        let mut config = PlaygroundConfig::default();
        config.general.color = false;
        config.general.pages = vec!["exercise".to_string(), "basic".to_string()];

        let mut out = Vec::<u8>::new();
        let args = RunArgs { pages: Vec::new(), all: false };
        run(&args, &config, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let exercise = output.find("## Do: Square It").unwrap();
        let basic = output.find("## Basic Example").unwrap();
        assert!(exercise < basic);
    }
}
