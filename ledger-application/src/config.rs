//! 账本配置（LedgerConfig）
//!
//! 以 JSON 文档描述，缺省字段取默认值：
//!
//! ```rust
//! use ledger_application::config::{LedgerConfig, MissingRowPolicy};
//!
//! let cfg = LedgerConfig::from_json(r#"{"missing_row_policy":"ignore"}"#).unwrap();
//! assert_eq!(cfg.missing_row_policy, MissingRowPolicy::Ignore);
//! assert_eq!(cfg.event_channel_capacity, 1024);
//! ```
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 读模型收到针对不存在行的更新时的处理方式（更新总是被丢弃）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRowPolicy {
    /// 丢弃并输出 warn 日志
    #[default]
    LogAndIgnore,
    /// 静默丢弃
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// 事件广播缓冲区容量，至少为 1
    pub event_channel_capacity: usize,
    pub missing_row_policy: MissingRowPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 1024,
            missing_row_policy: MissingRowPolicy::default(),
        }
    }
}

impl LedgerConfig {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 实际使用的广播容量
    pub fn channel_capacity(&self) -> usize {
        self.event_channel_capacity.max(1)
    }
}
