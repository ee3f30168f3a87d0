use crate::aggregate::AggregateCommand;
use serde::{Deserialize, Serialize};

/// 开户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccount {
    pub id: String,
}

/// 存款（金额不做符号与大小校验）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub amount: i64,
}

/// 账户聚合可执行的全部命令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountCommand {
    CreateAccount(CreateAccount),
    Deposit(Deposit),
}

impl AggregateCommand for AccountCommand {
    fn aggregate_id(&self) -> &str {
        match self {
            Self::CreateAccount(c) => &c.id,
            Self::Deposit(c) => &c.id,
        }
    }
}

impl From<CreateAccount> for AccountCommand {
    fn from(value: CreateAccount) -> Self {
        Self::CreateAccount(value)
    }
}

impl From<Deposit> for AccountCommand {
    fn from(value: Deposit) -> Self {
        Self::Deposit(value)
    }
}
