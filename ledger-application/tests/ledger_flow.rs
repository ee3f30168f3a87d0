use futures_util::StreamExt;
use ledger_application::account::{AccountQuery, AccountQueryResult, BalanceRequest};
use ledger_application::context::AppContext;
use ledger_application::error::AppError;
use ledger_application::{Ledger, LedgerConfig, MissingRowPolicy};
use ledger_domain::account::{Account, AccountCommand, AccountEvent, CreateAccount, Deposit};
use ledger_domain::aggregate::Aggregate;
use ledger_domain::domain_event::{BusinessContext, EventEnvelope};
use ledger_domain::error::DomainError;
use ledger_domain::persist::EventLog;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

fn ledger() -> Ledger {
    Ledger::new(LedgerConfig::default()).unwrap()
}

fn create(id: &str) -> AccountCommand {
    CreateAccount { id: id.into() }.into()
}

fn deposit(id: &str, amount: i64) -> AccountCommand {
    Deposit {
        id: id.into(),
        amount,
    }
    .into()
}

async fn balance(ledger: &Ledger, id: &str) -> i64 {
    let query: AccountQuery = BalanceRequest { id: id.into() }.into();
    match ledger
        .submit_query(&AppContext::default(), query)
        .await
        .unwrap()
    {
        AccountQueryResult::Balance(resp) => resp.amount,
    }
}

async fn replayed_balance(ledger: &Ledger, id: &str) -> i64 {
    let events = ledger.event_log().load(id).await.unwrap();
    Account::replay(events.iter().map(|e| &e.payload)).balance()
}

#[tokio::test]
async fn create_then_deposit_is_visible_to_queries() {
    let ledger = ledger();
    let ctx = AppContext::default();
    ledger.submit_command(&ctx, create("1")).await.unwrap();
    ledger.submit_command(&ctx, deposit("1", 100)).await.unwrap();

    assert_eq!(balance(&ledger, "1").await, 100);
    assert_eq!(replayed_balance(&ledger, "1").await, 100);
}

#[tokio::test]
async fn double_create_reports_already_exists() {
    let ledger = ledger();
    let ctx = AppContext::default();
    ledger.submit_command(&ctx, create("1")).await.unwrap();

    let err = ledger.submit_command(&ctx, create("1")).await.unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::AlreadyExists { .. })
    ));

    let events = ledger.event_log().load("1").await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0].payload,
        AccountEvent::AccountCreated { .. }
    ));
}

#[tokio::test]
async fn deposit_before_create_reports_not_found() {
    let ledger = ledger();
    let err = ledger
        .submit_command(&AppContext::default(), deposit("2", 50))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
    assert!(ledger.event_log().load("2").await.unwrap().is_empty());
    assert_eq!(balance(&ledger, "2").await, 0);
}

#[tokio::test]
async fn unknown_account_reads_zero() {
    let ledger = ledger();
    assert_eq!(balance(&ledger, "missing").await, 0);
}

#[tokio::test]
async fn negative_deposit_is_accepted() {
    let ledger = ledger();
    let ctx = AppContext::default();
    ledger.submit_command(&ctx, create("1")).await.unwrap();
    ledger.submit_command(&ctx, deposit("1", -25)).await.unwrap();
    assert_eq!(balance(&ledger, "1").await, -25);
}

#[tokio::test]
async fn projection_matches_replay_for_every_account() {
    let ledger = ledger();
    let ctx = AppContext::default();
    for (id, amounts) in [("a", vec![5, 10]), ("b", vec![-3]), ("c", vec![])] {
        ledger.submit_command(&ctx, create(id)).await.unwrap();
        for amount in amounts {
            ledger.submit_command(&ctx, deposit(id, amount)).await.unwrap();
        }
    }

    let ids = ledger.event_log().aggregate_ids().await.unwrap();
    assert_eq!(ids.len(), 3);
    for id in ids {
        assert_eq!(
            replayed_balance(&ledger, &id).await,
            ledger.account_view().balance(&id).await
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deposits_are_all_applied() {
    let ledger = Arc::new(ledger());
    ledger
        .submit_command(&AppContext::default(), create("1"))
        .await
        .unwrap();
    ledger
        .submit_command(&AppContext::default(), deposit("1", 7))
        .await
        .unwrap();

    let mut set = JoinSet::new();
    for _ in 0..100 {
        let ledger = ledger.clone();
        set.spawn(async move {
            let ctx = AppContext::default();
            ledger.submit_command(&ctx, deposit("1", 1)).await
        });
    }
    while let Some(res) = set.join_next().await {
        res.unwrap().unwrap();
    }

    assert_eq!(balance(&ledger, "1").await, 107);
    assert_eq!(replayed_balance(&ledger, "1").await, 107);
    assert_eq!(ledger.event_log().load("1").await.unwrap().len(), 102);
}

#[tokio::test]
async fn subscribers_receive_committed_envelopes() {
    let ledger = ledger();
    let mut stream = ledger.subscribe().await;

    let ctx = AppContext::from(
        BusinessContext::builder()
            .maybe_correlation_id(Some("cor-7".into()))
            .build(),
    );
    ledger.submit_command(&ctx, create("1")).await.unwrap();
    ledger.submit_command(&ctx, deposit("1", 3)).await.unwrap();

    let first = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(first.payload, AccountEvent::created("1"));
    assert_eq!(first.sequence(), 1);
    assert_eq!(first.context.correlation_id(), Some("cor-7"));

    let second = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(second.payload, AccountEvent::balance_changed("1", 3));
    assert_eq!(second.sequence(), 2);
}

#[tokio::test]
async fn rejected_command_publishes_nothing() {
    let ledger = ledger();
    let mut stream = ledger.subscribe().await;
    let err = ledger
        .submit_command(&AppContext::default(), deposit("1", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));

    let next = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(next.is_err());
}

#[tokio::test]
async fn rebuild_restores_the_read_model() {
    let ledger = ledger();
    let ctx = AppContext::default();
    ledger.submit_command(&ctx, create("1")).await.unwrap();
    ledger.submit_command(&ctx, deposit("1", 40)).await.unwrap();
    ledger.submit_command(&ctx, create("2")).await.unwrap();

    // 模拟读模型丢失更新
    ledger
        .account_view()
        .apply(&EventEnvelope::new(
            Account::TYPE,
            3,
            AccountEvent::balance_changed("1", 1_000),
            BusinessContext::default(),
        ))
        .await;
    assert_eq!(balance(&ledger, "1").await, 1_040);

    ledger
        .account_view()
        .rebuild(ledger.event_log())
        .await
        .unwrap();
    assert_eq!(balance(&ledger, "1").await, 40);
    assert_eq!(balance(&ledger, "2").await, 0);
    assert_eq!(ledger.account_view().len().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rebuild_during_concurrent_deposits_keeps_view_consistent() {
    let ledger = Arc::new(ledger());
    let ctx = AppContext::default();
    for id in ["1", "2"] {
        ledger.submit_command(&ctx, create(id)).await.unwrap();
    }

    let mut set = JoinSet::new();
    for i in 0..200 {
        let ledger = ledger.clone();
        set.spawn(async move {
            let id = if i % 2 == 0 { "1" } else { "2" };
            let ctx = AppContext::default();
            ledger.submit_command(&ctx, deposit(id, 1)).await
        });
    }
    for _ in 0..10 {
        ledger
            .account_view()
            .rebuild(ledger.event_log())
            .await
            .unwrap();
        tokio::task::yield_now().await;
    }
    while let Some(res) = set.join_next().await {
        res.unwrap().unwrap();
    }

    for id in ["1", "2"] {
        assert_eq!(replayed_balance(&ledger, id).await, 100);
        assert_eq!(ledger.account_view().balance(id).await, 100);
    }
}

#[tokio::test]
async fn ignore_policy_still_drops_orphan_updates() {
    let config = LedgerConfig {
        missing_row_policy: MissingRowPolicy::Ignore,
        ..LedgerConfig::default()
    };
    let ledger = Ledger::new(config).unwrap();
    ledger
        .account_view()
        .apply(&EventEnvelope::new(
            Account::TYPE,
            2,
            AccountEvent::balance_changed("ghost", 9),
            BusinessContext::default(),
        ))
        .await;
    assert_eq!(balance(&ledger, "ghost").await, 0);
    assert!(ledger.account_view().is_empty().await);
}

#[tokio::test]
async fn buses_expose_registered_tags() {
    let ledger = ledger();
    assert_eq!(
        ledger.command_bus().registered_commands(),
        vec!["CreateAccount", "Deposit"]
    );
    assert_eq!(ledger.query_bus().registered_queries(), vec!["BalanceRequest"]);
}
