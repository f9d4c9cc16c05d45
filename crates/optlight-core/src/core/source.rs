//! # オプショナル値の生成元
//!
//! 値が存在しないかもしれない計算（文字列の解析、辞書の検索、
//! ダウンキャスト、失敗しうる構築）の結果を [`Optional`] として受け取る関数群です。

use std::any::Any;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

use crate::core::optional::Optional;

/// 文字列を解析する。解析できなければ `Absent`
///
/// 前後の空白は取り除かないため、`" 45"` は `Absent` になります。
pub fn parse<T: FromStr>(text: &str) -> Optional<T> {
    text.parse().ok().into()
}

/// 失敗しうる構築の結果からエラーを捨てて値だけを取り出す
pub fn from_result<T, E>(result: Result<T, E>) -> Optional<T> {
    result.ok().into()
}

/// 型を指定してダウンキャストする
pub fn downcast<T: Any>(value: &dyn Any) -> Optional<&T> {
    value.downcast_ref::<T>().into()
}

/// インデックスで要素を取得する。範囲外なら `Absent`
pub fn element<T>(items: &[T], index: usize) -> Optional<&T> {
    items.get(index).into()
}

/// 最後の要素を取得する。空なら `Absent`
pub fn last<T>(items: &[T]) -> Optional<&T> {
    items.last().into()
}

/// キーで値を検索できるコレクション
pub trait Lookup<Q: ?Sized> {
    /// 値の型
    type Value;

    /// キーで値を検索する
    fn lookup(&self, key: &Q) -> Optional<&Self::Value>;
}

impl<K, V, Q, S> Lookup<Q> for HashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Optional<&V> {
        self.get(key).into()
    }
}

impl<K, V, Q> Lookup<Q> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Optional<&V> {
        self.get(key).into()
    }
}

/// コレクションからキーで値を検索する
pub fn lookup<'a, M, Q>(map: &'a M, key: &Q) -> Optional<&'a M::Value>
where
    M: Lookup<Q>,
    Q: ?Sized,
{
    map.lookup(key)
}
