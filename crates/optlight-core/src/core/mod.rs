//! # optlightのコアモジュール
//!
//! オプショナル値とその扱い方を提供します。
//! 型本体、チェーン、アンラップ戦略、遅延初期化、値の生成元で構成されています。

/// オプショナル型の定義モジュール
pub mod optional;

/// オプショナルチェーンを提供するモジュール
pub mod chain;

/// 名前付きのアンラップ戦略を提供するモジュール
pub mod bind;

/// 遅延初期化される値を提供するモジュール
pub mod late_init;

/// オプショナル値の生成元を提供するモジュール
pub mod source;

/// エラー処理関連の機能を提供するモジュール
pub mod error;

pub use self::optional::{Absent, IntoIter, Optional, Present};

pub use self::chain::{Chain, ChainMut};

pub use self::bind::{
    bind_multiple, bind_or_early_return, defer, require_or_default, require_or_fail, Binding,
    Bindings, Deferred,
};

pub use self::late_init::LateInit;

pub use self::source::{downcast, element, from_result, last, lookup, parse, Lookup};

pub use self::error::{OptionalError, Result};
