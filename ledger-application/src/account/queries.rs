use crate::{dto::Dto, query::Query};
use serde::{Deserialize, Serialize};

/// 查询账户余额
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRequest {
    pub id: String,
}

/// 余额；未知账户为 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub amount: i64,
}

impl Dto for BalanceResponse {}

impl Query for BalanceRequest {
    const NAME: &'static str = "BalanceRequest";
    type Dto = BalanceResponse;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountQuery {
    Balance(BalanceRequest),
}

impl From<BalanceRequest> for AccountQuery {
    fn from(value: BalanceRequest) -> Self {
        Self::Balance(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountQueryResult {
    Balance(BalanceResponse),
}
