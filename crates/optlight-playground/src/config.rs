/*
 * optlight プレイグラウンド - 設定ファイル処理モジュール
 *
 * optlight.toml を読み込み、ページの実行順序とレッスンの入力値を決定します。
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// 設定ファイルを明示しなかった場合に探すファイル名
pub const DEFAULT_CONFIG_FILE: &str = "optlight.toml";

/// プレイグラウンドの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaygroundConfig {
    /// 一般設定
    #[serde(default)]
    pub general: GeneralConfig,

    /// レッスンの入力値
    #[serde(default)]
    pub lesson: LessonConfig,
}

/// 一般設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// ページ見出しをカラー表示する
    #[serde(default = "default_true")]
    pub color: bool,

    /// `run` でページ名を省略したときの実行順序
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
}

/// レッスンの入力値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonConfig {
    /// 整数に変換する文字列
    #[serde(default = "default_number_text")]
    pub number_text: String,

    /// 強制アンラップの例で必ず存在する値
    #[serde(default = "default_forced_value")]
    pub forced_value: i64,

    /// 名前が存在しない場合の代わりの名前
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,

    /// 年齢が存在しない場合の代わりの年齢
    #[serde(default = "default_fallback_age")]
    pub fallback_age: u32,

    /// 演習で2乗する値
    #[serde(default = "default_exercise_input")]
    pub exercise_input: i64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            pages: default_pages(),
        }
    }
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            number_text: default_number_text(),
            forced_value: default_forced_value(),
            fallback_name: default_fallback_name(),
            fallback_age: default_fallback_age(),
            exercise_input: default_exercise_input(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_pages() -> Vec<String> {
    crate::pages::PAGES.iter().map(|page| page.id.to_string()).collect()
}

fn default_number_text() -> String {
    "45".to_string()
}

fn default_forced_value() -> i64 {
    12
}

fn default_fallback_name() -> String {
    "Slow Freddy".to_string()
}

fn default_fallback_age() -> u32 {
    40
}

fn default_exercise_input() -> i64 {
    7
}

/// 設定ファイルを読み込む
///
/// `path` が指定されていればそのファイルを必ず読み込みます。
/// 指定がなければカレントディレクトリの `optlight.toml` を探し、
/// 存在しなければデフォルト設定を返します。
pub fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                debug!("設定ファイルが見つからないためデフォルト設定を使用します");
                return Ok(PlaygroundConfig::default());
            }
            candidate
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("設定ファイルの形式が不正です: {}", path.display()))?;
    info!("設定ファイルを読み込みました: {}", path.display());
    Ok(config)
}

/// TOML文字列から設定を解析する
pub fn parse_config(text: &str) -> Result<PlaygroundConfig> {
    Ok(toml::from_str(text)?)
}
