//! 事件子系统（eventing）
//!
//! 提供事件发布/订阅的基础抽象与内存实现：
//! - `EventBus`：统一发布/订阅接口；
//! - `EventHandler`：消费已提交事件的处理器（例如读模型投影）；
//! - `InMemoryEventBus`：同步投递给已注册处理器，并通过广播通道提供事件流。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod handler;

pub use bus::EventBus;
pub use bus_inmemory::InMemoryEventBus;
pub use handler::{EventHandler, HandledEventType};
