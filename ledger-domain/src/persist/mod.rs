//! 持久化与事件溯源（persist）
//!
//! 定义事件日志与聚合仓储：
//! - 事件按聚合标识追加与读取，带乐观并发校验（`EventLog`）；
//! - 进程内事件日志实现（`InMemoryEventLog`）；
//! - 通过重放事件加载聚合、追加并发布新事件的聚合仓储（`EventSourcedRepository`）。
//!
//! 持久化后端可通过实现 `EventLog` 接入，本模块只提供内存实现。
//!
mod aggregate_repository;
mod event_log;

pub use aggregate_repository::{AggregateRepository, EventSourcedRepository};
pub use event_log::{EventLog, InMemoryEventLog};
