//! # optlightのアンラップ戦略
//!
//! 強制アンラップ、デフォルト値による置き換え、条件付き束縛、
//! 早期リターンによる束縛（`guard let`）を名前付きの関数として提供します。
//!
//! 早期リターン系の関数はエラーを返しません。値が存在しない場合は
//! 呼び出し側が用意した終端処理の結果を [`ControlFlow::Break`] で返し、
//! 呼び出し側がそれをそのまま `return` します。
//!
//! ```
//! use std::ops::ControlFlow;
//! use optlight_core::core::{bind_or_early_return, Optional};
//!
//! fn is_cat_name(cat_name: Optional<&str>) -> String {
//!     let cat_name = match bind_or_early_return(cat_name, || "Cat name was nil!".to_string()) {
//!         ControlFlow::Continue(name) => name,
//!         ControlFlow::Break(early) => return early,
//!     };
//!     cat_name.to_string()
//! }
//!
//! assert_eq!(is_cat_name(Optional::absent()), "Cat name was nil!");
//! assert_eq!(is_cat_name(Optional::present("Tom")), "Tom");
//! ```

use std::ops::ControlFlow;

use crate::core::optional::{Absent, Optional, Present};

/// 値が必ず存在することを要求する
///
/// [`Optional::force_unwrap`] と同じ契約で、存在しなければ処理を停止します。
#[track_caller]
pub fn require_or_fail<T>(optional: Optional<T>) -> T {
    optional.force_unwrap()
}

/// 値が存在しなければデフォルト値を使う
pub fn require_or_default<T>(optional: Optional<T>, default: T) -> T {
    optional.unwrap_or(default)
}

/// 値を束縛する。存在しなければ `on_absent` の結果で早期リターンさせる
pub fn bind_or_early_return<T, B>(
    optional: Optional<T>,
    on_absent: impl FnOnce() -> B,
) -> ControlFlow<B, T> {
    match optional {
        Present(value) => ControlFlow::Continue(value),
        Absent => ControlFlow::Break(on_absent()),
    }
}

/// 複数の値を左から順に束縛する
///
/// 最初に見つかった `Absent` で評価を打ち切り、`on_any_absent` を1回だけ
/// 呼び出します。それ以降の束縛は評価されません。すべて存在した場合のみ、
/// 元の順序で値を返します。
pub fn bind_multiple<L, B>(
    bindings: L,
    on_any_absent: impl FnOnce() -> B,
) -> ControlFlow<B, L::Values>
where
    L: Bindings,
{
    bind_or_early_return(bindings.resolve_all(), on_any_absent)
}

/// 束縛の対象になる値
pub trait Binding {
    /// 束縛される値の型
    type Value;

    /// 値を評価する
    fn resolve(self) -> Optional<Self::Value>;
}

impl<T> Binding for Optional<T> {
    type Value = T;

    fn resolve(self) -> Optional<T> {
        self
    }
}

/// 必要になるまで評価を遅らせる束縛
#[derive(Debug, Clone, Copy)]
pub struct Deferred<F>(F);

/// 評価を遅らせる束縛を作成する
pub fn defer<T, F>(evaluate: F) -> Deferred<F>
where
    F: FnOnce() -> Optional<T>,
{
    Deferred(evaluate)
}

impl<T, F> Binding for Deferred<F>
where
    F: FnOnce() -> Optional<T>,
{
    type Value = T;

    fn resolve(self) -> Optional<T> {
        (self.0)()
    }
}

/// 束縛の並び
pub trait Bindings {
    /// すべて存在した場合に得られる値の並び
    type Values;

    /// 左から順に評価し、最初の `Absent` で打ち切る
    fn resolve_all(self) -> Optional<Self::Values>;
}

impl<B: Binding> Bindings for Vec<B> {
    type Values = Vec<B::Value>;

    fn resolve_all(self) -> Optional<Self::Values> {
        let mut values = Vec::with_capacity(self.len());
        for binding in self {
            match binding.resolve() {
                Present(value) => values.push(value),
                Absent => return Absent,
            }
        }
        Present(values)
    }
}

// タプルに対するBindingsトレイトの実装
macro_rules! impl_bindings_for_tuples {
    ($($name:ident),+) => {
        impl<$($name: Binding),+> Bindings for ($($name,)+) {
            type Values = ($($name::Value,)+);

            #[allow(non_snake_case)]
            fn resolve_all(self) -> Optional<Self::Values> {
                let ($($name,)+) = self;
                $(
                    let $name = match $name.resolve() {
                        Present(value) => value,
                        Absent => return Absent,
                    };
                )+
                Present(($($name,)+))
            }
        }
    };
}

impl_bindings_for_tuples!(A);
impl_bindings_for_tuples!(A, B);
impl_bindings_for_tuples!(A, B, C);
impl_bindings_for_tuples!(A, B, C, D);
impl_bindings_for_tuples!(A, B, C, D, E);
impl_bindings_for_tuples!(A, B, C, D, E, F);

/// `guard let` 相当の束縛
///
/// 値が存在しなければ `else` ブロックを実行します。`else` ブロックは
/// `return` などで必ず脱出しなければなりません（`let else` と同じ規則）。
///
/// ```
/// use optlight_core::{guard_present, core::Optional};
///
/// fn square_or_negative_one(number: Optional<i64>) -> i64 {
///     let number = guard_present!(number, else { return -1; });
///     number * number
/// }
///
/// assert_eq!(square_or_negative_one(Optional::present(7)), 49);
/// assert_eq!(square_or_negative_one(Optional::absent()), -1);
/// ```
#[macro_export]
macro_rules! guard_present {
    ($optional:expr, else $on_absent:block) => {{
        let $crate::core::Optional::Present(value) = $crate::core::Optional::from($optional) else $on_absent;
        value
    }};
}
