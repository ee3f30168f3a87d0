//! 账户用例：命令处理、余额查询与读模型
//!
mod commands;
mod queries;
mod view;

pub use commands::AccountCommandHandler;
pub use queries::{AccountQuery, AccountQueryResult, BalanceRequest, BalanceResponse};
pub use view::AccountView;
