//! # optlightのオプショナルチェーン
//!
//! オプショナルを返すアクセサを左から順に適用し、途中で `Absent` に
//! なった時点で残りのアクセサを一切呼び出さずに打ち切る仕組みです。
//! 各ステップは [`Optional::flat_map`] そのものです。
//!
//! 結果は必ず [`Optional`] に包まれて返されます。すべてのステップが
//! 成功した場合でも、裸の値にはなりません。

use crate::core::optional::{Absent, Optional, Present};

/// 読み取り用のオプショナルチェーン
///
/// ```
/// use optlight_core::core::{Chain, Optional};
///
/// struct Residence { rooms: Optional<u32> }
/// struct Person { residence: Optional<Residence> }
///
/// let john = Person { residence: Optional::present(Residence { rooms: Optional::present(3) }) };
/// let rooms = Chain::new(john.residence.as_ref())
///     .then(|r| r.rooms.as_ref())
///     .map(|n| *n)
///     .resolve();
/// assert_eq!(rooms, Optional::present(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "チェーンは resolve() するまで結果を返しません"]
pub struct Chain<T> {
    current: Optional<T>,
}

impl<T> Chain<T> {
    /// ルートのオプショナルからチェーンを開始する
    pub fn new(root: Optional<T>) -> Self {
        Self { current: root }
    }

    /// オプショナルを返すアクセサを適用する
    ///
    /// 現在の値が `Absent` の場合、`accessor` は呼び出されません。
    pub fn then<U>(self, accessor: impl FnOnce(T) -> Optional<U>) -> Chain<U> {
        Chain {
            current: self.current.flat_map(accessor),
        }
    }

    /// 必ず値を返すメンバーアクセスを適用する
    pub fn map<U>(self, accessor: impl FnOnce(T) -> U) -> Chain<U> {
        Chain {
            current: self.current.map(accessor),
        }
    }

    /// ここまでの評価で値が途切れていないかどうか
    pub fn is_present(&self) -> bool {
        self.current.is_present()
    }

    /// チェーンを評価した結果を返す
    pub fn resolve(self) -> Optional<T> {
        self.current
    }
}

impl<T> From<Optional<T>> for Chain<T> {
    fn from(root: Optional<T>) -> Self {
        Self::new(root)
    }
}

/// 代入用のオプショナルチェーン
///
/// 最後のステップを代入先として使います。そこまでのプレフィックスが
/// `Present` に解決された場合だけ書き込みが行われ、`Present(())` が返ります。
/// プレフィックスが `Absent` の場合は何も書き込まれず `Absent` が返ります。
#[derive(Debug)]
#[must_use = "代入用チェーンは assign / update / resolve で終端する必要があります"]
pub struct ChainMut<'a, T> {
    target: Optional<&'a mut T>,
}

impl<'a, T> ChainMut<'a, T> {
    /// ルートのオプショナルから代入用チェーンを開始する
    pub fn new(root: &'a mut Optional<T>) -> Self {
        Self {
            target: root.as_mut(),
        }
    }

    /// オプショナルな可変参照を返すアクセサを適用する
    pub fn then<U>(
        self,
        accessor: impl FnOnce(&'a mut T) -> Optional<&'a mut U>,
    ) -> ChainMut<'a, U> {
        ChainMut {
            target: self.target.flat_map(accessor),
        }
    }

    /// 必ず存在するメンバーへ進む
    pub fn field<U>(self, project: impl FnOnce(&'a mut T) -> &'a mut U) -> ChainMut<'a, U> {
        ChainMut {
            target: self.target.map(project),
        }
    }

    /// チェーンの終端に値を代入する
    pub fn assign(self, value: T) -> Optional<()> {
        self.update(move |place| *place = value)
    }

    /// チェーンの終端に値を代入する
    ///
    /// 右辺の `make` はプレフィックスが `Present` に解決された場合にのみ
    /// 評価されます。
    pub fn assign_with(self, make: impl FnOnce() -> T) -> Optional<()> {
        self.update(move |place| *place = make())
    }

    /// チェーンの終端に対して変更操作を行い、その戻り値を返す
    pub fn update<R>(self, operation: impl FnOnce(&mut T) -> R) -> Optional<R> {
        match self.target {
            Present(place) => Present(operation(place)),
            Absent => Absent,
        }
    }

    /// 解決された代入先を返す
    pub fn resolve(self) -> Optional<&'a mut T> {
        self.target
    }
}
