//! optlight: オプショナル値のライブラリ
//!
//! 値の有無を表す [`core::Optional`] と、その値を安全に取り出すための
//! チェーンとアンラップ戦略を提供します。

/// コアモジュール：オプショナル値とその操作を提供
pub mod core;

pub use crate::core::{Absent, Optional, Present};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// アンラップ戦略が利用可能かどうかを確認する
///
/// プレイグラウンドのページ一覧は、この関数で認められた機能を扱うページだけを表示します。
pub fn has_feature(feature_name: &str) -> bool {
    matches!(
        feature_name,
        "force_unwrap"
            | "nil_coalescing"
            | "optional_binding"
            | "guard_binding"
            | "optional_chaining"
            | "chain_assignment"
            | "late_init"
    )
}
