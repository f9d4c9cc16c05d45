//! # optlightのオプショナル型
//!
//! 「型 `T` の値、またはその不在」を表す [`Optional`] を定義します。
//! 値は常に `Absent` か `Present` のどちらか一方で、構築後にその場で
//! 書き換える操作はありません（`map` / `flat_map` / `filter` は新しい値を返します）。

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::chain::{Chain, ChainMut};
use crate::core::error::{contract_violation, OptionalError, Result};

/// 値が存在するかしないかを表現する型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    /// 値が存在しない
    Absent,
    /// 値が1つだけ存在する
    Present(T),
}

pub use Optional::{Absent, Present};

impl<T> Optional<T> {
    /// 値を持つオプショナルを作成
    pub const fn present(value: T) -> Self {
        Present(value)
    }

    /// 値を持たないオプショナルを作成
    pub const fn absent() -> Self {
        Absent
    }

    /// 値が存在するかどうか
    pub const fn is_present(&self) -> bool {
        matches!(self, Present(_))
    }

    /// 値が存在しないかどうか
    pub const fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// 値が存在し、かつ条件を満たすかどうか
    pub fn is_present_and(self, predicate: impl FnOnce(T) -> bool) -> bool {
        match self {
            Present(value) => predicate(value),
            Absent => false,
        }
    }

    /// 参照のオプショナルに変換
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// 可変参照のオプショナルに変換
    pub fn as_mut(&mut self) -> Optional<&mut T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// 値を強制的に取り出す
    ///
    /// 値が存在しない場合は契約違反として `panic!` します。
    /// 直前の検査や構築の仕方から存在が保証できる場合にだけ使用してください。
    #[track_caller]
    pub fn force_unwrap(self) -> T {
        match self {
            Present(value) => value,
            Absent => contract_violation(OptionalError::absent("force_unwrap")),
        }
    }

    /// メッセージ付きで値を強制的に取り出す
    #[track_caller]
    pub fn expect_present(self, message: &str) -> T {
        match self {
            Present(value) => value,
            Absent => contract_violation(OptionalError::absent(message)),
        }
    }

    /// 値を取り出す。存在しない場合は `UnexpectedAbsent` を返す
    pub fn try_unwrap(self, context: &str) -> Result<T> {
        self.ok_or_else(|| OptionalError::absent(context))
    }

    /// 値を取り出す。存在しない場合は `default` を返す
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Present(value) => value,
            Absent => default,
        }
    }

    /// 値を取り出す。存在しない場合のみ `supplier` を呼び出す
    pub fn unwrap_or_else(self, supplier: impl FnOnce() -> T) -> T {
        match self {
            Present(value) => value,
            Absent => supplier(),
        }
    }

    /// 値を取り出す。存在しない場合は `T::default()` を返す
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// 値に関数を適用する
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Present(value) => Present(transform(value)),
            Absent => Absent,
        }
    }

    /// オプショナルを返す関数を適用し、結果をそのまま返す
    pub fn flat_map<U>(self, transform: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
        match self {
            Present(value) => transform(value),
            Absent => Absent,
        }
    }

    /// 条件を満たす値だけを残す
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Present(value) if predicate(&value) => Present(value),
            _ => Absent,
        }
    }

    /// 値が存在しない場合に `other` を使う（`a ?? b`）
    pub fn or(self, other: Optional<T>) -> Self {
        match self {
            Present(value) => Present(value),
            Absent => other,
        }
    }

    /// 値が存在しない場合にのみ代わりのオプショナルを計算する
    pub fn or_else(self, other: impl FnOnce() -> Optional<T>) -> Self {
        match self {
            Present(value) => Present(value),
            Absent => other(),
        }
    }

    /// 2つの値が両方存在する場合にペアにする
    pub fn zip<U>(self, other: Optional<U>) -> Optional<(T, U)> {
        match (self, other) {
            (Present(a), Present(b)) => Present((a, b)),
            _ => Absent,
        }
    }

    /// `Result` に変換する
    pub fn ok_or<E>(self, error: E) -> std::result::Result<T, E> {
        match self {
            Present(value) => Ok(value),
            Absent => Err(error),
        }
    }

    /// `Result` に変換する。エラーは値が存在しない場合にのみ計算される
    pub fn ok_or_else<E>(self, error: impl FnOnce() -> E) -> std::result::Result<T, E> {
        match self {
            Present(value) => Ok(value),
            Absent => Err(error()),
        }
    }

    /// 値を取り出し、自身を `Absent` にする
    pub fn take(&mut self) -> Optional<T> {
        std::mem::replace(self, Absent)
    }

    /// 値を読み取り用のチェーンの起点にする
    pub fn chain(self) -> Chain<T> {
        Chain::new(self)
    }

    /// 値を代入用のチェーンの起点にする
    pub fn chain_mut(&mut self) -> ChainMut<'_, T> {
        ChainMut::new(self)
    }

    /// 値を参照するイテレータ（要素数は0または1）
    pub fn iter(&self) -> IntoIter<&T> {
        self.as_ref().into_iter()
    }
}

impl<T> Optional<Optional<T>> {
    /// 入れ子のオプショナルを平坦化する
    pub fn flatten(self) -> Optional<T> {
        self.flat_map(|inner| inner)
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Absent
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Present(value),
            None => Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Present(value) => Some(value),
            Absent => None,
        }
    }
}

/// 値が存在すれば `Optional(値)`、存在しなければ `nil` と表示する
impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Present(value) => write!(f, "Optional({})", value),
            Absent => write!(f, "nil"),
        }
    }
}

/// [`Optional`] の所有イテレータ
#[derive(Debug, Clone)]
pub struct IntoIter<T> {
    inner: Optional<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.take().into()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.inner.is_present());
        (n, Some(n))
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = IntoIter<&'a T>;

    fn into_iter(self) -> IntoIter<&'a T> {
        self.iter()
    }
}

// シリアライズ形式は Option<T> と同じ（Absent は null）
impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Option::<&T>::from(self.as_ref()).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Optional::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_presence() {
        let value = Optional::present(12);
        assert!(value.is_present());
        assert!(!value.is_absent());

        let none: Optional<i32> = Optional::absent();
        assert!(none.is_absent());
        assert!(!none.is_present());
        assert_eq!(Optional::<i32>::default(), Absent);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Present(3), Present(3));
        assert_ne!(Present(3), Present(4));
        assert_ne!(Present(3), Absent);
        assert_eq!(Optional::<i32>::Absent, Absent);
    }

    #[test]
    fn test_force_unwrap_present() {
        let value = Present("Fast Freddy");
        assert_eq!(value.force_unwrap(), "Fast Freddy");
        assert_eq!(value.force_unwrap(), "Fast Freddy");
    }

    #[test]
    #[should_panic(expected = "値が存在しません: force_unwrap")]
    fn test_force_unwrap_absent() {
        let value: Optional<i32> = Absent;
        value.force_unwrap();
    }

    #[test]
    #[should_panic(expected = "値が存在しません: 年齢が必要です")]
    fn test_expect_present_absent() {
        let age: Optional<u32> = Absent;
        age.expect_present("年齢が必要です");
    }

    #[test]
    fn test_try_unwrap() {
        assert_eq!(Present(1).try_unwrap("x"), Ok(1));
        assert_eq!(
            Optional::<i32>::Absent.try_unwrap("age"),
            Err(OptionalError::absent("age"))
        );
    }

    #[test]
    fn test_unwrap_or() {
        let name: Optional<&str> = Absent;
        assert_eq!(name.unwrap_or("Slow Freddy"), "Slow Freddy");
        assert_eq!(Present("Freddy").unwrap_or("Slow Freddy"), "Freddy");
        assert_eq!(Optional::<String>::Absent.unwrap_or_default(), "");
    }

    #[test]
    fn test_unwrap_or_else_is_lazy() {
        let calls = Cell::new(0);
        let supplier = || {
            calls.set(calls.get() + 1);
            30
        };

        assert_eq!(Present(5).unwrap_or_else(supplier), 5);
        assert_eq!(calls.get(), 0);

        assert_eq!(Absent.unwrap_or_else(supplier), 30);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_map_and_flat_map() {
        assert_eq!(Present(4).map(|x| x * x), Present(16));
        assert_eq!(
            Present("45").flat_map(|s| Optional::from(s.parse::<i32>().ok())),
            Present(45)
        );
        assert_eq!(
            Present("abc").flat_map(|s| Optional::from(s.parse::<i32>().ok())),
            Absent
        );
    }

    #[test]
    fn test_absent_never_invokes_transforms() {
        let calls = Cell::new(0);
        let none: Optional<i32> = Absent;

        let bump = || calls.set(calls.get() + 1);

        assert_eq!(
            none.map(|x| {
                bump();
                x
            }),
            Absent
        );
        assert_eq!(
            none.flat_map(|x| {
                bump();
                Present(x)
            }),
            Absent
        );
        assert_eq!(
            none.filter(|_| {
                bump();
                true
            }),
            Absent
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_filter() {
        let even = |x: &i32| x % 2 == 0;
        assert_eq!(Present(4).filter(even), Present(4));
        assert_eq!(Present(5).filter(even), Absent);
        assert_eq!(Absent.filter(even), Absent);
    }

    #[test]
    #[should_panic(expected = "変換に失敗")]
    fn test_transform_panic_propagates() {
        Present(1).map(|_: i32| -> i32 { panic!("変換に失敗") });
    }

    #[test]
    fn test_coalescing() {
        let age: Optional<u32> = Absent;
        assert_eq!(age.or(Present(30)), Present(30));
        assert_eq!(Present(21).or(Present(30)), Present(21));
        assert_eq!(age.or_else(|| Present(40)).force_unwrap(), 40);
    }

    #[test]
    fn test_zip_and_flatten() {
        assert_eq!(Present(1).zip(Present("a")), Present((1, "a")));
        assert_eq!(Present(1).zip(Optional::<&str>::Absent), Absent);
        assert_eq!(Present(Present(100)).flatten(), Present(100));
        assert_eq!(Present(Optional::<i32>::Absent).flatten(), Absent);
    }

    #[test]
    fn test_take_leaves_absent() {
        let mut value = Present(String::from("Rex"));
        assert_eq!(value.take(), Present(String::from("Rex")));
        assert_eq!(value, Absent);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Optional::from(Some(3)), Present(3));
        assert_eq!(Optional::<i32>::from(None), Absent);
        assert_eq!(Option::from(Present(3)), Some(3));
    }

    #[test]
    fn test_iteration() {
        let values: Vec<i32> = Present(7).into_iter().collect();
        assert_eq!(values, vec![7]);
        assert_eq!(Optional::<i32>::Absent.into_iter().count(), 0);

        let borrowed = Present(String::from("Tom"));
        for name in &borrowed {
            assert_eq!(name, "Tom");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Present(45).to_string(), "Optional(45)");
        assert_eq!(Optional::<i32>::Absent.to_string(), "nil");
    }

    #[test]
    fn test_serde_mapping() {
        assert_eq!(serde_json::to_string(&Present(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Optional::<i32>::Absent).unwrap(), "null");

        let parsed: Optional<String> = serde_json::from_str("\"Freddy\"").unwrap();
        assert_eq!(parsed, Present(String::from("Freddy")));
        let parsed: Optional<String> = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Absent);
    }
}
