//! 聚合根编排器（AggregateRoot）
//!
//! 封装从“加载聚合 → 执行命令 → 追加并发布事件”的标准流程，
//! 以仓储实现（`AggregateRepository`）为依赖，便于在应用层直接调用。
//!
//! 同一聚合标识上的命令按到达顺序串行执行，不同标识之间互不阻塞。
//! 锁表只保留正在被使用的标识，命令结束后空闲的锁即被回收。
//!
use crate::{
    aggregate::{Aggregate, AggregateCommand},
    domain_event::{BusinessContext, EventEnvelope},
    persist::AggregateRepository,
};
use dashmap::DashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// 面向应用层的聚合根编排器。
///
/// - `A`：聚合类型（实现 `Aggregate`）
/// - `R`：聚合仓储（实现 `AggregateRepository<A>`）
pub struct AggregateRoot<A, R>
where
    A: Aggregate,
    R: AggregateRepository<A>,
{
    repo: R,
    // 每个聚合标识一把锁，覆盖 load → execute → save 全过程
    locks: LockTable,
    _marker: PhantomData<fn() -> A>,
}

impl<A, R> AggregateRoot<A, R>
where
    A: Aggregate,
    R: AggregateRepository<A>,
{
    /// 创建编排器实例
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            locks: DashMap::new(),
            _marker: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 执行聚合命令：
    /// 1. 取得目标标识的锁；
    /// 2. 重放事件得到当前状态与版本；
    /// 3. 执行命令得到新事件，失败时不写入任何事件；
    /// 4. 调用仓储追加并发布，返回事件信封。
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(aggregate_type = A::TYPE, aggregate_id = command.aggregate_id())
    )]
    pub async fn execute(
        &self,
        command: A::Command,
        context: BusinessContext,
    ) -> Result<Vec<EventEnvelope<A::Event>>, A::Error> {
        let aggregate_id = command.aggregate_id().to_string();
        let lease = LockLease::acquire(&self.locks, &aggregate_id);
        let _guard = lease.lock().await;

        let (aggregate, version) = self.repo.load(&aggregate_id).await?;

        let events = match aggregate.execute(command) {
            Ok(events) => events,
            Err(err) => {
                tracing::debug!(error = %err, "command rejected");
                return Err(err);
            }
        };

        let envelopes = self
            .repo
            .save(&aggregate_id, version, events, context)
            .await?;
        tracing::debug!(
            count = envelopes.len(),
            version = version.advance(envelopes.len()).value(),
            tracked_locks = self.tracked_locks(),
            "command committed"
        );

        Ok(envelopes)
    }

    /// 当前锁表中的标识数量（仅包含仍有命令在执行或等待的标识）
    pub fn tracked_locks(&self) -> usize {
        self.locks.len()
    }
}

/// 对某个标识锁的一次租用，释放时若已无其他持有者则从锁表中移除
struct LockLease<'a> {
    locks: &'a LockTable,
    aggregate_id: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> LockLease<'a> {
    fn acquire(locks: &'a LockTable, aggregate_id: &'a str) -> Self {
        let lock = locks.entry(aggregate_id.to_string()).or_default().clone();
        Self {
            locks,
            aggregate_id,
            lock,
        }
    }

    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        // 锁表与本租约各持有一份；计数更高说明仍有命令在等待
        self.locks.remove_if(self.aggregate_id, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2
        });
    }
}
