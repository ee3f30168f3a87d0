use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
pub trait DomainEvent:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 事件类型（形如 `AccountEvent.AccountCreated`），用于订阅匹配与日志
    fn event_type(&self) -> &'static str;

    /// 事件所属聚合的标识
    fn aggregate_id(&self) -> &str;
}
