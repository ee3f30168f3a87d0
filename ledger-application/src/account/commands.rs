use crate::{command::Command, command_handler::CommandHandler, context::AppContext, error::AppError};
use async_trait::async_trait;
use ledger_domain::account::{Account, CreateAccount, Deposit};
use ledger_domain::aggregate_root::AggregateRoot;
use ledger_domain::persist::AggregateRepository;
use std::sync::Arc;

impl Command for CreateAccount {
    const NAME: &'static str = "CreateAccount";
}

impl Command for Deposit {
    const NAME: &'static str = "Deposit";
}

/// 账户命令处理器：把命令交给聚合根编排器执行
pub struct AccountCommandHandler<R>
where
    R: AggregateRepository<Account>,
{
    root: Arc<AggregateRoot<Account, R>>,
}

impl<R> AccountCommandHandler<R>
where
    R: AggregateRepository<Account>,
{
    pub fn new(root: Arc<AggregateRoot<Account, R>>) -> Self {
        Self { root }
    }
}

#[async_trait]
impl<R> CommandHandler<CreateAccount> for AccountCommandHandler<R>
where
    R: AggregateRepository<Account> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreateAccount) -> Result<(), AppError> {
        self.root.execute(cmd.into(), ctx.biz.clone()).await?;
        Ok(())
    }
}

#[async_trait]
impl<R> CommandHandler<Deposit> for AccountCommandHandler<R>
where
    R: AggregateRepository<Account> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: Deposit) -> Result<(), AppError> {
        self.root.execute(cmd.into(), ctx.biz.clone()).await?;
        Ok(())
    }
}
