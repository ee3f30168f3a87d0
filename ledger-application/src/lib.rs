//! 账户账本应用层（ledger-application）
//!
//! 在领域层之上提供 CQRS 入口：
//! - 命令/查询抽象与各自的单处理器总线（按 `NAME` 路由）；
//! - 应用上下文、错误与配置；
//! - 账户用例（命令处理器、余额查询、读模型投影）；
//! - `Ledger` 门面，负责装配并对外提供 `submit_command` / `submit_query`。
//!
pub mod account;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod ledger;
pub mod query;
pub mod query_bus;
pub mod query_handler;

pub use config::{LedgerConfig, MissingRowPolicy};
pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
pub use ledger::Ledger;
