use super::{AccountCommand, AccountEvent};
use crate::aggregate::Aggregate;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// 账户聚合状态
///
/// 零值 `{ id: None, balance: 0 }` 表示账户尚不存在。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: Option<String>,
    balance: i64,
}

impl Account {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn exists(&self) -> bool {
        self.id.is_some()
    }
}

impl Aggregate for Account {
    const TYPE: &'static str = "account";
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = DomainError;

    fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::CreateAccount(cmd) => {
                if self.exists() {
                    return Err(DomainError::already_exists(cmd.id));
                }
                Ok(vec![AccountEvent::created(cmd.id)])
            }
            AccountCommand::Deposit(cmd) => {
                if !self.exists() {
                    return Err(DomainError::not_found(cmd.id));
                }
                Ok(vec![AccountEvent::balance_changed(cmd.id, cmd.amount)])
            }
        }
    }

    fn apply(self, event: &Self::Event) -> Self {
        match event {
            AccountEvent::AccountCreated { id, balance } => Self {
                id: Some(id.clone()),
                balance: *balance,
            },
            AccountEvent::BalanceChanged { amount, .. } => Self {
                balance: self.balance.saturating_add(*amount),
                ..self
            },
        }
    }
}
