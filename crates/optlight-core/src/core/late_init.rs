//! # 遅延初期化される値
//!
//! 宣言時には値を持たず、使用される時点までには必ず初期化されている
//! ことが前提の値です。初期化前に参照すると契約違反として処理を停止します。

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::core::error::{contract_violation, OptionalError, Result};
use crate::core::optional::{Absent, Optional, Present};

/// 遅延初期化される値
pub struct LateInit<T> {
    name: &'static str,
    slot: Optional<T>,
}

impl<T> LateInit<T> {
    /// 未初期化の値を作成
    ///
    /// `name` はエラーメッセージとログに使われます。
    pub const fn new(name: &'static str) -> Self {
        Self { name, slot: Absent }
    }

    /// 初期化済みの値を作成
    pub const fn with_value(name: &'static str, value: T) -> Self {
        Self {
            name,
            slot: Present(value),
        }
    }

    /// 変数名を取得
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 初期化済みかどうか
    pub fn is_initialized(&self) -> bool {
        self.slot.is_present()
    }

    /// 一度だけ初期化する
    pub fn initialize(&mut self, value: T) -> Result<()> {
        if self.slot.is_present() {
            return Err(OptionalError::AlreadyInitialized { name: self.name });
        }
        log::debug!("LateInit '{}' を初期化しました", self.name);
        self.slot = Present(value);
        Ok(())
    }

    /// 値を上書きし、以前の値を返す
    pub fn set(&mut self, value: T) -> Optional<T> {
        std::mem::replace(&mut self.slot, Present(value))
    }

    /// 値を参照する。未初期化なら処理を停止する
    #[track_caller]
    pub fn get(&self) -> &T {
        match &self.slot {
            Present(value) => value,
            Absent => contract_violation(OptionalError::Uninitialized { name: self.name }),
        }
    }

    /// 値を可変参照する。未初期化なら処理を停止する
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        let name = self.name;
        match &mut self.slot {
            Present(value) => value,
            Absent => contract_violation(OptionalError::Uninitialized { name }),
        }
    }

    /// 値を参照する。未初期化なら `Absent`
    pub fn try_get(&self) -> Optional<&T> {
        self.slot.as_ref()
    }

    /// 値を取り出し、未初期化の状態に戻す
    pub fn take(&mut self) -> Optional<T> {
        self.slot.take()
    }

    /// 中身をオプショナルとして取り出す
    pub fn into_inner(self) -> Optional<T> {
        self.slot
    }
}

impl<T> Deref for LateInit<T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for LateInit<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for LateInit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LateInit")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish()
    }
}
