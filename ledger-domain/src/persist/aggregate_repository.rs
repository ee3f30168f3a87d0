//! 聚合仓储
//!
//! 基于事件日志的聚合仓储：加载时从零值重放全部事件，
//! 保存时原子追加新事件并按顺序发布给事件总线的订阅者。
//!
use crate::{
    aggregate::Aggregate,
    domain_event::{BusinessContext, EventEnvelope},
    eventing::EventBus,
    persist::EventLog,
    value_object::Version,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AggregateRepository<A>: Send + Sync
where
    A: Aggregate,
{
    /// 重放事件得到聚合当前状态及其版本；未知标识返回零值与初始版本
    async fn load(&self, aggregate_id: &str) -> Result<(A, Version), A::Error>;

    /// 以 `expected` 为期望版本追加事件并发布，返回已提交的事件信封
    async fn save(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<A::Event>,
        context: BusinessContext,
    ) -> Result<Vec<EventEnvelope<A::Event>>, A::Error>;
}

#[async_trait]
impl<A, T> AggregateRepository<A> for Arc<T>
where
    A: Aggregate,
    T: AggregateRepository<A> + ?Sized,
{
    async fn load(&self, aggregate_id: &str) -> Result<(A, Version), A::Error> {
        (**self).load(aggregate_id).await
    }

    async fn save(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<A::Event>,
        context: BusinessContext,
    ) -> Result<Vec<EventEnvelope<A::Event>>, A::Error> {
        (**self).save(aggregate_id, expected, events, context).await
    }
}

/// 基于事件日志 + 事件总线的聚合仓储实现。
/// - 使用 `EventLog` 读取/追加事件
/// - 追加成功后通过 `EventBus` 发布，发布完成后才返回
pub struct EventSourcedRepository<L, B> {
    event_log: Arc<L>,
    event_bus: Arc<B>,
}

impl<L, B> EventSourcedRepository<L, B> {
    pub fn new(event_log: Arc<L>, event_bus: Arc<B>) -> Self {
        Self {
            event_log,
            event_bus,
        }
    }

    pub fn event_log(&self) -> &Arc<L> {
        &self.event_log
    }

    pub fn event_bus(&self) -> &Arc<B> {
        &self.event_bus
    }
}

#[async_trait]
impl<A, L, B> AggregateRepository<A> for EventSourcedRepository<L, B>
where
    A: Aggregate,
    L: EventLog<A::Event>,
    B: EventBus<A::Event>,
{
    async fn load(&self, aggregate_id: &str) -> Result<(A, Version), A::Error> {
        let envelopes = self.event_log.load(aggregate_id).await?;
        let version = Version::from_value(envelopes.len());
        let aggregate = A::replay(envelopes.iter().map(|e| &e.payload));

        Ok((aggregate, version))
    }

    async fn save(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<A::Event>,
        context: BusinessContext,
    ) -> Result<Vec<EventEnvelope<A::Event>>, A::Error> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let envelopes: Vec<EventEnvelope<A::Event>> = events
            .into_iter()
            .enumerate()
            .map(|(i, e)| EventEnvelope::new(A::TYPE, expected.value() + i + 1, e, context.clone()))
            .collect();

        self.event_log
            .append(aggregate_id, expected, envelopes.clone())
            .await?;

        self.event_bus.publish_batch(&envelopes).await?;

        Ok(envelopes)
    }
}
