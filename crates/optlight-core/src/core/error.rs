//! # optlightのエラー処理モジュール
//!
//! 値の不在そのものはエラーではありません。このモジュールが扱うのは、
//! 「必ず存在するはず」という前提が破られた場合の契約違反と、
//! それを `?` で伝播したい呼び出し側のためのエラー型です。

use std::panic::Location;

use thiserror::Error;

/// 結果型のエイリアス
pub type Result<T, E = OptionalError> = std::result::Result<T, E>;

/// オプショナル値の操作で発生するエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionalError {
    /// 存在するはずの値が存在しなかった
    #[error("値が存在しません: {context}")]
    UnexpectedAbsent {
        /// 値を要求した箇所の説明
        context: String,
    },

    /// 初期化前の `LateInit` が参照された
    #[error("LateInit '{name}' は初期化される前に参照されました")]
    Uninitialized {
        /// 変数名
        name: &'static str,
    },

    /// すでに初期化済みの `LateInit` を再度初期化しようとした
    #[error("LateInit '{name}' はすでに初期化されています")]
    AlreadyInitialized {
        /// 変数名
        name: &'static str,
    },
}

impl OptionalError {
    /// 値の不在エラーを作成
    pub fn absent(context: impl Into<String>) -> Self {
        Self::UnexpectedAbsent {
            context: context.into(),
        }
    }

    /// 契約違反（致命的エラー）として扱うべきかどうか
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::AlreadyInitialized { .. })
    }
}

/// 契約違反を報告してその場で処理を停止する
///
/// 呼び出し元の位置をログに残してから `panic!` します。
/// 呼び出し側で回復することは想定していません。
#[track_caller]
#[cold]
pub(crate) fn contract_violation(error: OptionalError) -> ! {
    debug_assert!(error.is_contract_violation(), "回復可能なエラーです: {}", error);
    let location = Location::caller();
    log::error!("契約違反 ({}:{}): {}", location.file(), location.line(), error);
    panic!("{}", error)
}
