//! 账户读模型（AccountView）
//!
//! 订阅账户事件并维护 `标识 → 余额` 的反规范化视图，供余额查询直接读取。
//! 每一行的更新在 DashMap 分片锁内完成，读者看不到半更新的行。
//!
//! 每行记录已折叠到的事件序号，重复投递的事件会被跳过；
//! 重建时在写锁内折叠出一张新表再整体替换，期间的投递与查询等待重建完成。
//!
use crate::config::MissingRowPolicy;
use crate::{
    account::queries::{BalanceRequest, BalanceResponse},
    context::AppContext,
    error::AppError,
    query_handler::QueryHandler,
};
use async_trait::async_trait;
use dashmap::DashMap;
use ledger_domain::account::AccountEvent;
use ledger_domain::domain_event::EventEnvelope;
use ledger_domain::error::DomainResult;
use ledger_domain::eventing::{EventHandler, HandledEventType};
use ledger_domain::persist::EventLog;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct Row {
    balance: i64,
    sequence: usize,
}

type Rows = DashMap<String, Row>;

#[derive(Debug, Default)]
pub struct AccountView {
    rows: RwLock<Rows>,
    missing_row_policy: MissingRowPolicy,
}

impl AccountView {
    pub fn new(missing_row_policy: MissingRowPolicy) -> Self {
        Self {
            rows: RwLock::new(DashMap::new()),
            missing_row_policy,
        }
    }

    /// 把一条已提交事件折叠进视图
    pub async fn apply(&self, envelope: &EventEnvelope<AccountEvent>) {
        let rows = self.rows.read().await;
        self.fold(&rows, envelope);
    }

    fn fold(&self, rows: &Rows, envelope: &EventEnvelope<AccountEvent>) {
        let sequence = envelope.sequence();
        match &envelope.payload {
            AccountEvent::AccountCreated { id, balance } => {
                let mut row = rows.entry(id.clone()).or_insert(Row {
                    balance: *balance,
                    sequence: 0,
                });
                if row.sequence >= sequence {
                    tracing::debug!(id = %id, sequence, "duplicate event skipped");
                    return;
                }
                *row = Row {
                    balance: *balance,
                    sequence,
                };
                tracing::info!(id = %id, balance, "added account");
            }
            AccountEvent::BalanceChanged { id, amount } => match rows.get_mut(id) {
                Some(row) if row.sequence >= sequence => {
                    tracing::debug!(id = %id, sequence, "duplicate event skipped");
                }
                Some(mut row) => {
                    row.balance = row.balance.saturating_add(*amount);
                    row.sequence = sequence;
                    tracing::info!(id = %id, amount, balance = row.balance, "changed amount");
                }
                None => {
                    if self.missing_row_policy == MissingRowPolicy::LogAndIgnore {
                        tracing::warn!(id = %id, amount, "balance change for unknown account dropped");
                    }
                }
            },
            _ => {}
        }
    }

    /// 当前余额，未知账户为 0
    pub async fn balance(&self, id: &str) -> i64 {
        self.rows
            .read()
            .await
            .get(id)
            .map(|row| row.balance)
            .unwrap_or(0)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// 按事件日志重新折叠全部账户并替换现有视图
    ///
    /// 读取日志失败时保留原视图。
    pub async fn rebuild<L>(&self, event_log: &L) -> DomainResult<()>
    where
        L: EventLog<AccountEvent>,
    {
        let mut rows = self.rows.write().await;

        let fresh = Rows::new();
        let ids = event_log.aggregate_ids().await?;
        for id in &ids {
            for envelope in event_log.load(id).await? {
                self.fold(&fresh, &envelope);
            }
        }

        *rows = fresh;
        tracing::info!(accounts = ids.len(), "account view rebuilt");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<AccountEvent> for AccountView {
    fn handler_name(&self) -> &str {
        "account_view"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::All
    }

    async fn handle(&self, event: &EventEnvelope<AccountEvent>) -> anyhow::Result<()> {
        self.apply(event).await;
        Ok(())
    }
}

#[async_trait]
impl QueryHandler<BalanceRequest> for AccountView {
    async fn handle(&self, _ctx: &AppContext, q: BalanceRequest) -> Result<BalanceResponse, AppError> {
        Ok(BalanceResponse {
            amount: self.balance(&q.id).await,
        })
    }
}
