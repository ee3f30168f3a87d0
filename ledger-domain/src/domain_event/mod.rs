//! 领域事件（Domain Event）与事件信封
//!
//! 定义事件载荷需要实现的最小接口（`DomainEvent`），以及追加到事件日志时
//! 包裹载荷的 `EventEnvelope`（元数据 + 业务上下文）。

mod business_context;
mod domain_event_trait;
mod event_envelope;
mod metadata;

pub use business_context::BusinessContext;
pub use domain_event_trait::DomainEvent;
pub use event_envelope::EventEnvelope;
pub use metadata::Metadata;
