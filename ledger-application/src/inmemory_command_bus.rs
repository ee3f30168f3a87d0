use crate::{
    command::Command, command_bus::CommandBus, command_handler::CommandHandler,
    context::AppContext, error::AppError,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type CmdHandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'a>>;

type CmdHandlerFn =
    Arc<dyn for<'a> Fn(Box<dyn Any + Send>, &'a AppContext) -> CmdHandlerFuture<'a> + Send + Sync>;

fn erase<F>(f: F) -> CmdHandlerFn
where
    F: for<'a> Fn(Box<dyn Any + Send>, &'a AppContext) -> CmdHandlerFuture<'a>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// 基于内存的 CommandBus 实现
/// - 以命令的 `NAME` 为键注册处理器，每个命令至多一个处理器
/// - 运行时以类型擦除（Any）方式进行调度
pub struct InMemoryCommandBus {
    handlers: DashMap<&'static str, CmdHandlerFn>,
}

impl Default for InMemoryCommandBus {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器，同名命令重复注册返回 `DuplicateHandler`
    pub fn register<C, H>(&self, handler: Arc<H>) -> Result<(), AppError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let f = erase(move |boxed_cmd, ctx| {
            let handler = handler.clone();

            Box::pin(async move {
                // 键与闭包同一泛型 C，只有两个命令类型声明了相同的 NAME 时才会失败
                match boxed_cmd.downcast::<C>() {
                    Ok(cmd) => handler.handle(ctx, *cmd).await,
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: type_name::<C>(),
                        found: "unknown",
                    }),
                }
            })
        });

        match self.handlers.entry(C::NAME) {
            Entry::Occupied(_) => Err(AppError::DuplicateHandler {
                bus: "command",
                message: C::NAME,
            }),
            Entry::Vacant(slot) => {
                slot.insert(f);
                tracing::debug!(command = C::NAME, "command handler registered");
                Ok(())
            }
        }
    }

    /// 获取已注册的命令名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch<C>(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>
    where
        C: Command,
    {
        let Some(f) = self.handlers.get(C::NAME).map(|h| h.value().clone()) else {
            tracing::warn!(command = C::NAME, "no command handler registered");
            return Err(AppError::NoHandlerRegistered(C::NAME));
        };

        tracing::debug!(command = C::NAME, "dispatching command");
        (f)(Box::new(cmd), ctx).await
    }
}
