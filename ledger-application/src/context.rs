use ledger_domain::domain_event::BusinessContext;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息。
/// 业务语境（`BusinessContext`）会被写入命令产生的每个事件信封。
///
/// ```rust
/// use ledger_application::context::AppContext;
/// use ledger_domain::domain_event::BusinessContext;
///
/// let ctx = AppContext {
///     biz: BusinessContext::builder()
///         .maybe_correlation_id(Some("cor-123".into()))
///         .maybe_actor_type(Some("user".into()))
///         .maybe_actor_id(Some("u-1".into()))
///         .build(),
/// };
/// assert_eq!(ctx.biz.correlation_id(), Some("cor-123"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    /// 业务语境（链路追踪、审计主体、操作因果）
    pub biz: BusinessContext,
}

impl From<BusinessContext> for AppContext {
    fn from(biz: BusinessContext) -> Self {
        Self { biz }
    }
}
