//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象。
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// 版本号（事件流长度，用于乐观锁和并发控制）
///
/// # 示例
///
/// ```
/// use ledger_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(!v2.is_new());
///
/// assert!(v2 > v1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(usize);

impl Version {
    /// 初始版本（聚合尚无任何事件）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// 追加 `count` 个事件之后的版本
    pub const fn advance(&self, count: usize) -> Self {
        Self(self.0 + count)
    }

    pub const fn value(&self) -> usize {
        self.0
    }

    pub const fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
