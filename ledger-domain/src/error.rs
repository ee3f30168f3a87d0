//! 领域层统一错误定义
//!
//! 覆盖聚合规则、事件日志并发控制与事件系统三类错误，
//! 便于应用层统一转换为 `AppError`。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 领域规则 ---
    #[error("aggregate already exists: {aggregate_id}")]
    AlreadyExists { aggregate_id: String },
    #[error("aggregate not found: {aggregate_id}")]
    NotFound { aggregate_id: String },

    // --- 事件日志 ---
    #[error("concurrency conflict: aggregate={aggregate_id}, expected={expected}, actual={actual}")]
    ConcurrencyConflict {
        aggregate_id: String,
        expected: usize,
        actual: usize,
    },
    #[error("aggregate id mismatch: expected={expected}, found={found}")]
    AggregateIdMismatch { expected: String, found: String },

    // --- 事件系统 ---
    #[error("event bus error: {reason}")]
    EventBus { reason: String },
}

impl DomainError {
    pub fn already_exists(aggregate_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            aggregate_id: aggregate_id.into(),
        }
    }

    pub fn not_found(aggregate_id: impl Into<String>) -> Self {
        Self::NotFound {
            aggregate_id: aggregate_id.into(),
        }
    }

    pub fn event_bus(reason: impl Into<String>) -> Self {
        Self::EventBus {
            reason: reason.into(),
        }
    }

    /// 是否为并发冲突（调用方可据此决定是否重试）
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
