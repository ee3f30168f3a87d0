use crate::dto::Dto;

/// 应用层查询（Query）
///
/// 表达只读意图，不改变领域状态。
/// - 结果返回 [`Dto`](crate::dto::Dto)；
/// - 查询直连读模型（投影），不经过聚合重放。
pub trait Query: Send + Sync + 'static {
    /// 查询的稳定名称，同时作为查询总线的路由键
    const NAME: &'static str;

    /// 查询返回的数据传输对象
    type Dto: Dto;
}
