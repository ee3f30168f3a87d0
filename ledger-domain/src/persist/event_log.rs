use crate::domain_event::{DomainEvent, EventEnvelope};
use crate::error::{DomainError, DomainResult as Result};
use crate::value_object::Version;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// 事件日志：按聚合标识保存只追加的有序事件流
#[async_trait]
pub trait EventLog<E>: Send + Sync
where
    E: DomainEvent,
{
    /// 读取指定聚合的全部事件（按追加顺序），未知标识返回空列表
    async fn load(&self, aggregate_id: &str) -> Result<Vec<EventEnvelope<E>>>;

    /// 原子追加一批事件，返回追加后的版本
    ///
    /// 当前事件流长度与 `expected` 不一致时返回 `ConcurrencyConflict`，
    /// 任一事件不属于 `aggregate_id` 时返回 `AggregateIdMismatch`，两种情况均不写入任何事件。
    async fn append(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<Version>;

    /// 列出所有已有事件的聚合标识
    async fn aggregate_ids(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<E, T> EventLog<E> for Arc<T>
where
    E: DomainEvent,
    T: EventLog<E> + ?Sized,
{
    async fn load(&self, aggregate_id: &str) -> Result<Vec<EventEnvelope<E>>> {
        (**self).load(aggregate_id).await
    }

    async fn append(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<Version> {
        (**self).append(aggregate_id, expected, events).await
    }

    async fn aggregate_ids(&self) -> Result<Vec<String>> {
        (**self).aggregate_ids().await
    }
}

/// 进程内事件日志
///
/// 每个聚合一条事件流；检查版本与追加在同一个分片写锁内完成，
/// 因此一批事件要么全部可见，要么全部不可见。
pub struct InMemoryEventLog<E> {
    streams: DashMap<String, Vec<EventEnvelope<E>>>,
}

impl<E> Default for InMemoryEventLog<E> {
    fn default() -> Self {
        Self {
            streams: DashMap::new(),
        }
    }
}

impl<E> InMemoryEventLog<E>
where
    E: DomainEvent,
{
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E> EventLog<E> for InMemoryEventLog<E>
where
    E: DomainEvent,
{
    async fn load(&self, aggregate_id: &str) -> Result<Vec<EventEnvelope<E>>> {
        Ok(self
            .streams
            .get(aggregate_id)
            .map(|s| s.value().clone())
            .unwrap_or_default())
    }

    async fn append(
        &self,
        aggregate_id: &str,
        expected: Version,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<Version> {
        if let Some(orphan) = events.iter().find(|e| e.aggregate_id() != aggregate_id) {
            return Err(DomainError::AggregateIdMismatch {
                expected: aggregate_id.to_string(),
                found: orphan.aggregate_id().to_string(),
            });
        }

        if events.is_empty() {
            return Ok(expected);
        }

        // 只有版本校验通过才创建事件流条目
        let count = events.len();
        let rejected = match self.streams.entry(aggregate_id.to_string()) {
            Entry::Occupied(mut stream) => {
                let actual = stream.get().len();
                if actual == expected.value() {
                    stream.get_mut().extend(events);
                    None
                } else {
                    Some(actual)
                }
            }
            Entry::Vacant(slot) => {
                if expected.is_new() {
                    slot.insert(events);
                    None
                } else {
                    Some(0)
                }
            }
        };

        if let Some(actual) = rejected {
            tracing::warn!(
                aggregate_id,
                expected = expected.value(),
                actual,
                "append rejected: stream moved since load"
            );
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id: aggregate_id.to_string(),
                expected: expected.value(),
                actual,
            });
        }

        let version = expected.advance(count);
        tracing::debug!(aggregate_id, count, version = version.value(), "events appended");

        Ok(version)
    }

    async fn aggregate_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.streams.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
