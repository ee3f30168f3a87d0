//! 内存版事件总线（InMemoryEventBus）
//!
//! 满足 `EventBus` 协议的进程内实现：
//! - `publish`：按注册顺序同步调用匹配的处理器，全部返回后再广播给事件流订阅者；
//! - `subscribe`：基于 `tokio::sync::broadcast` 返回 `'static` 生命周期事件流；
//! - 处理器在启动时一次性注册，之后只读。
//!
//! 注意：事件到达总线时已经提交，处理器失败只记录日志，不会中断其余处理器。

use crate::domain_event::{DomainEvent, EventEnvelope};
use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::{EventBus, EventHandler};
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

pub struct InMemoryEventBus<E> {
    tx: broadcast::Sender<EventEnvelope<E>>,
    handlers: Vec<Arc<dyn EventHandler<E>>>,
}

impl<E> InMemoryEventBus<E>
where
    E: DomainEvent,
{
    /// 创建一个内存总线，`capacity` 为广播缓冲区容量（至少为 1）
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            handlers: Vec::new(),
        }
    }

    /// 注册一个同步处理器（如读模型投影）
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler<E>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// 已注册处理器名称（按投递顺序）
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.handler_name()).collect()
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryEventBus<E>
where
    E: DomainEvent,
{
    async fn publish(&self, event: &EventEnvelope<E>) -> Result<()> {
        for handler in &self.handlers {
            if !handler.handled_event_type().matches(event.event_type()) {
                continue;
            }
            if let Err(err) = handler.handle(event).await {
                tracing::error!(
                    handler = handler.handler_name(),
                    event_id = event.metadata.event_id(),
                    event_type = event.event_type(),
                    error = %err,
                    "event handler failed"
                );
            }
        }

        // 若当前无订阅者，broadcast 的 send 会返回错误，这里视为非致命并忽略
        let _ = self.tx.send(event.clone());
        Ok(())
    }

    async fn subscribe(&self) -> BoxStream<'static, Result<EventEnvelope<E>>> {
        let rx = self.tx.subscribe();
        let stream =
            BroadcastStream::new(rx).map(|r| r.map_err(|e| DomainError::event_bus(e.to_string())));
        Box::pin(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountEvent;
    use crate::domain_event::BusinessContext;
    use crate::eventing::HandledEventType;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        handled: HandledEventType,
        seen: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventHandler<AccountEvent> for Recorder {
        fn handler_name(&self) -> &str {
            self.name
        }

        fn handled_event_type(&self) -> HandledEventType {
            self.handled.clone()
        }

        async fn handle(&self, event: &EventEnvelope<AccountEvent>) -> anyhow::Result<()> {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event.event_type()));
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(())
        }
    }

    fn envelope(sequence: usize, payload: AccountEvent) -> EventEnvelope<AccountEvent> {
        EventEnvelope::new("account", sequence, payload, BusinessContext::default())
    }

    #[tokio::test]
    async fn publish_fans_out_to_matching_handlers_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let bus = InMemoryEventBus::<AccountEvent>::new(16)
            .with_handler(Arc::new(Recorder {
                name: "all",
                handled: HandledEventType::All,
                seen: seen.clone(),
                fail: true,
            }))
            .with_handler(Arc::new(Recorder {
                name: "created",
                handled: HandledEventType::One("AccountEvent.AccountCreated".into()),
                seen: seen.clone(),
                fail: false,
            }));
        assert_eq!(bus.handler_names(), vec!["all", "created"]);

        bus.publish_batch(&[
            envelope(1, AccountEvent::created("1")),
            envelope(2, AccountEvent::balance_changed("1", 5)),
        ])
        .await
        .unwrap();

        // 第一个处理器失败不影响后续处理器
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "all:AccountEvent.AccountCreated",
                "created:AccountEvent.AccountCreated",
                "all:AccountEvent.BalanceChanged",
            ]
        );
    }

    #[tokio::test]
    async fn subscribers_receive_published_envelopes() {
        let bus = InMemoryEventBus::<AccountEvent>::new(8);
        let mut stream = bus.subscribe().await;

        let env = envelope(1, AccountEvent::created("1"));
        bus.publish(&env).await.unwrap();

        let got = stream.next().await.unwrap().unwrap();
        assert_eq!(got, env);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = InMemoryEventBus::<AccountEvent>::new(0);
        bus.publish(&envelope(1, AccountEvent::created("1")))
            .await
            .unwrap();
    }

    #[test]
    fn handled_event_type_matching() {
        assert!(HandledEventType::All.matches("x"));
        assert!(HandledEventType::One("x".into()).matches("x"));
        assert!(!HandledEventType::One("x".into()).matches("y"));
        assert!(HandledEventType::Many(vec!["x".into(), "y".into()]).matches("y"));
    }
}
