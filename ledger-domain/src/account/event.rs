use crate::domain_event::DomainEvent;
use serde::{Deserialize, Serialize};

/// 账户事件
///
/// 读侧应当容忍未来新增的变体，因此标记为 `non_exhaustive`。
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    AccountCreated {
        id: String,
        #[serde(default)]
        balance: i64,
    },
    BalanceChanged {
        id: String,
        amount: i64,
    },
}

impl AccountEvent {
    pub fn created(id: impl Into<String>) -> Self {
        Self::AccountCreated {
            id: id.into(),
            balance: 0,
        }
    }

    pub fn balance_changed(id: impl Into<String>, amount: i64) -> Self {
        Self::BalanceChanged {
            id: id.into(),
            amount,
        }
    }
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::AccountCreated { .. } => "AccountEvent.AccountCreated",
            Self::BalanceChanged { .. } => "AccountEvent.BalanceChanged",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            Self::AccountCreated { id, .. } | Self::BalanceChanged { id, .. } => id,
        }
    }
}
