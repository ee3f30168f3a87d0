//! 事件处理器（EventHandler）
//!
//! 定义消费某类/多类/全部事件的处理逻辑与元信息（名称、订阅类型）。
//!
use crate::domain_event::EventEnvelope;
use async_trait::async_trait;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandledEventType {
    One(String),
    Many(Vec<String>),
    All,
}

impl HandledEventType {
    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::One(t) => t == event_type,
            Self::Many(ts) => ts.iter().any(|t| t == event_type),
        }
    }
}

/// 事件处理器：处理某一类型的事件
#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    /// 处理器名称（用于日志与审计）
    fn handler_name(&self) -> &str;
    /// 返回该处理器支持的事件类型
    fn handled_event_type(&self) -> HandledEventType;
    /// 处理事件
    async fn handle(&self, event: &EventEnvelope<E>) -> anyhow::Result<()>;
}
