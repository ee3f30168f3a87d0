use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::business_context::BusinessContext;
use super::domain_event_trait::DomainEvent;
use super::metadata::Metadata;

/// 事件信封，包含事件载荷、元数据与业务上下文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    pub metadata: Metadata,
    pub payload: E,
    pub context: BusinessContext,
}

impl<E> EventEnvelope<E>
where
    E: DomainEvent,
{
    /// 封装一个即将追加的事件，`sequence` 为它在事件流中的位置（从 1 开始）
    pub fn new(
        aggregate_type: &str,
        sequence: usize,
        payload: E,
        context: BusinessContext,
    ) -> Self {
        let metadata = Metadata::builder()
            .event_id(Uuid::new_v4().to_string())
            .event_type(payload.event_type().to_string())
            .aggregate_id(payload.aggregate_id().to_string())
            .aggregate_type(aggregate_type.to_string())
            .sequence(sequence)
            .occurred_at(Utc::now())
            .build();

        Self {
            metadata,
            payload,
            context,
        }
    }

    pub fn aggregate_id(&self) -> &str {
        self.metadata.aggregate_id()
    }

    pub fn event_type(&self) -> &str {
        self.metadata.event_type()
    }

    pub fn sequence(&self) -> usize {
        self.metadata.sequence()
    }
}
