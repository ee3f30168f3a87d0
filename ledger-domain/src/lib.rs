//! 账户账本领域层（ledger-domain）
//!
//! 提供事件溯源写侧的通用抽象与一个具体的账户聚合：
//! - 聚合（`aggregate`）：纯函数式的 `execute/apply`，状态只由事件折叠得到；
//! - 领域事件（`domain_event`）：事件载荷、信封、元数据与业务上下文；
//! - 事件日志与仓储（`persist`）：按聚合标识追加/读取事件，带乐观并发校验；
//! - 聚合根编排器（`aggregate_root`）：按标识串行化“加载 → 决策 → 追加 → 发布”；
//! - 事件系统（`eventing`）：同步投递到订阅处理器，并提供广播事件流；
//! - 账户聚合（`account`）：开户与存款两种命令。
//!
//! 本 crate 只依赖内存实现，持久化后端可通过实现 `EventLog` 接入。
//!
pub mod account;
pub mod aggregate;
pub mod aggregate_root;
pub mod domain_event;
pub mod error;
pub mod eventing;
pub mod persist;
pub mod value_object;
