use anyhow::Context;
use ledger_application::account::{AccountQuery, AccountQueryResult, BalanceRequest};
use ledger_application::context::AppContext;
use ledger_application::{Ledger, LedgerConfig};
use ledger_domain::account::{CreateAccount, Deposit};
use ledger_domain::domain_event::BusinessContext;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> anyhow::Result<LedgerConfig> {
    match std::env::var("LEDGER_CONFIG") {
        Ok(raw) => LedgerConfig::from_json(&raw).context("parse LEDGER_CONFIG"),
        Err(_) => Ok(LedgerConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let ledger = Ledger::new(load_config()?)?;
    let ctx = AppContext::from(
        BusinessContext::builder()
            .maybe_actor_type(Some("cli".into()))
            .maybe_actor_id(Some("demo".into()))
            .build(),
    );

    ledger
        .submit_command(&ctx, CreateAccount { id: "1".into() }.into())
        .await?;
    ledger
        .submit_command(
            &ctx,
            Deposit {
                id: "1".into(),
                amount: 100,
            }
            .into(),
        )
        .await?;

    let query = AccountQuery::from(BalanceRequest { id: "1".into() });
    let AccountQueryResult::Balance(resp) = ledger.submit_query(&ctx, query).await?;
    tracing::info!(id = "1", amount = resp.amount, "balance");

    Ok(())
}
