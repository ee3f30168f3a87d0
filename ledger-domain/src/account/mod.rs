//! 账户聚合（Account）
//!
//! 写侧唯一的业务聚合：开户（`CreateAccount`）与存款（`Deposit`）。
//! 余额只存在于由事件折叠出的内存状态中。
//!
mod aggregate;
mod command;
mod event;

pub use aggregate::Account;
pub use command::{AccountCommand, CreateAccount, Deposit};
pub use event::AccountEvent;
