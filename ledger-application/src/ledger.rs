//! 账本门面（Ledger）
//!
//! 启动时显式构造、关闭时随作用域释放的进程内存储对象。
//! 负责装配事件日志、事件总线、账户读模型、聚合根以及命令/查询总线，
//! 对外只暴露 `submit_command` / `submit_query` 两个入口。
//!
use crate::{
    account::{
        AccountCommandHandler, AccountQuery, AccountQueryResult, AccountView, BalanceRequest,
    },
    command_bus::CommandBus,
    config::LedgerConfig,
    context::AppContext,
    error::AppError,
    inmemory_command_bus::InMemoryCommandBus,
    inmemory_query_bus::InMemoryQueryBus,
    query_bus::QueryBus,
};
use futures_core::stream::BoxStream;
use ledger_domain::account::{Account, AccountCommand, AccountEvent, CreateAccount, Deposit};
use ledger_domain::aggregate_root::AggregateRoot;
use ledger_domain::domain_event::EventEnvelope;
use ledger_domain::error::DomainResult;
use ledger_domain::eventing::{EventBus, InMemoryEventBus};
use ledger_domain::persist::{EventSourcedRepository, InMemoryEventLog};
use std::sync::Arc;

pub type AccountEventLog = InMemoryEventLog<AccountEvent>;
pub type AccountEventBus = InMemoryEventBus<AccountEvent>;
pub type AccountRepository = EventSourcedRepository<AccountEventLog, AccountEventBus>;

pub struct Ledger {
    event_log: Arc<AccountEventLog>,
    event_bus: Arc<AccountEventBus>,
    account_view: Arc<AccountView>,
    command_bus: InMemoryCommandBus,
    query_bus: InMemoryQueryBus,
}

impl Ledger {
    /// 按配置装配全部组件并注册处理器
    pub fn new(config: LedgerConfig) -> Result<Self, AppError> {
        let event_log = Arc::new(AccountEventLog::new());
        let account_view = Arc::new(AccountView::new(config.missing_row_policy));
        let event_bus = Arc::new(
            AccountEventBus::new(config.channel_capacity()).with_handler(account_view.clone()),
        );

        let root = Arc::new(AggregateRoot::<Account, _>::new(
            EventSourcedRepository::new(event_log.clone(), event_bus.clone()),
        ));
        let handler = Arc::new(AccountCommandHandler::new(root));

        let command_bus = InMemoryCommandBus::new();
        command_bus.register::<CreateAccount, _>(handler.clone())?;
        command_bus.register::<Deposit, _>(handler)?;

        let query_bus = InMemoryQueryBus::new();
        query_bus.register::<BalanceRequest, _>(account_view.clone())?;

        tracing::info!(
            event_channel_capacity = config.channel_capacity(),
            missing_row_policy = ?config.missing_row_policy,
            projections = ?event_bus.handler_names(),
            "ledger ready"
        );

        Ok(Self {
            event_log,
            event_bus,
            account_view,
            command_bus,
            query_bus,
        })
    }

    /// 提交账户命令；返回时事件已追加并投递到读模型
    pub async fn submit_command(
        &self,
        ctx: &AppContext,
        command: AccountCommand,
    ) -> Result<(), AppError> {
        match command {
            AccountCommand::CreateAccount(cmd) => self.command_bus.dispatch(ctx, cmd).await,
            AccountCommand::Deposit(cmd) => self.command_bus.dispatch(ctx, cmd).await,
        }
    }

    pub async fn submit_query(
        &self,
        ctx: &AppContext,
        query: AccountQuery,
    ) -> Result<AccountQueryResult, AppError> {
        match query {
            AccountQuery::Balance(q) => {
                let resp = self.query_bus.dispatch(ctx, q).await?;
                Ok(AccountQueryResult::Balance(resp))
            }
        }
    }

    /// 已提交事件的实时流，仅包含订阅之后发布的事件
    pub async fn subscribe(&self) -> BoxStream<'static, DomainResult<EventEnvelope<AccountEvent>>> {
        self.event_bus.subscribe().await
    }

    pub fn event_log(&self) -> &Arc<AccountEventLog> {
        &self.event_log
    }

    pub fn account_view(&self) -> &Arc<AccountView> {
        &self.account_view
    }

    pub fn command_bus(&self) -> &InMemoryCommandBus {
        &self.command_bus
    }

    pub fn query_bus(&self) -> &InMemoryQueryBus {
        &self.query_bus
    }
}
