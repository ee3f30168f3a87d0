//! 聚合（Aggregate）抽象
//!
//! 约束一个聚合的核心行为：
//! - `execute` 将命令转换为事件（不改变状态）；
//! - `apply` 是纯函数 `(state, event) -> state`；
//! - `replay` 从零值开始按顺序折叠事件，重建当前状态。
//!
use crate::domain_event::DomainEvent;
use crate::error::DomainError;
use std::error::Error;
use std::fmt;

/// 携带目标聚合标识的命令
pub trait AggregateCommand: fmt::Debug + Send + Sync + 'static {
    fn aggregate_id(&self) -> &str;
}

/// 聚合根接口
///
/// 聚合本身是不可变值：`Default` 即“尚不存在”的零值，
/// 所有状态变化都经由事件折叠完成。
pub trait Aggregate: Default + Clone + fmt::Debug + Send + Sync + 'static {
    const TYPE: &'static str;

    /// 该聚合支持的命令类型
    type Command: AggregateCommand;
    /// 该聚合产生的领域事件类型
    type Event: DomainEvent;
    /// 命令执行或持久化环节的错误类型
    type Error: Error + From<DomainError> + Send + Sync + 'static;

    /// 执行命令，返回产生的事件列表
    fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// 应用事件，返回新的聚合状态
    fn apply(self, event: &Self::Event) -> Self;

    /// 从零值开始折叠事件序列
    fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Event>,
    {
        events
            .into_iter()
            .fold(Self::default(), |state, event| state.apply(event))
    }
}

#[cfg(test)]
mod tests {
    use super::{Aggregate, AggregateCommand};
    use crate::domain_event::DomainEvent;
    use crate::error::DomainError;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    #[derive(Debug)]
    enum CounterCommand {
        Add { id: String, amount: i32 },
        Sub { id: String, amount: i32 },
    }

    impl AggregateCommand for CounterCommand {
        fn aggregate_id(&self) -> &str {
            match self {
                Self::Add { id, .. } | Self::Sub { id, .. } => id,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum CounterEvent {
        Added { id: String, amount: i32 },
        Subtracted { id: String, amount: i32 },
    }

    impl DomainEvent for CounterEvent {
        fn event_type(&self) -> &'static str {
            match self {
                Self::Added { .. } => "CounterEvent.Added",
                Self::Subtracted { .. } => "CounterEvent.Subtracted",
            }
        }

        fn aggregate_id(&self) -> &str {
            match self {
                Self::Added { id, .. } | Self::Subtracted { id, .. } => id,
            }
        }
    }

    impl Aggregate for Counter {
        const TYPE: &'static str = "counter";
        type Command = CounterCommand;
        type Event = CounterEvent;
        type Error = DomainError;

        fn execute(&self, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
            match command {
                CounterCommand::Add { id, amount } => Ok(vec![CounterEvent::Added { id, amount }]),
                CounterCommand::Sub { id, amount } => {
                    if self.value < amount {
                        return Err(DomainError::not_found(id));
                    }
                    Ok(vec![CounterEvent::Subtracted { id, amount }])
                }
            }
        }

        fn apply(self, event: &Self::Event) -> Self {
            match event {
                CounterEvent::Added { amount, .. } => Self {
                    value: self.value + amount,
                },
                CounterEvent::Subtracted { amount, .. } => Self {
                    value: self.value - amount,
                },
            }
        }
    }

    #[test]
    fn replay_folds_from_default() {
        let events = vec![
            CounterEvent::Added {
                id: "c-1".into(),
                amount: 3,
            },
            CounterEvent::Subtracted {
                id: "c-1".into(),
                amount: 1,
            },
        ];
        let state = Counter::replay(&events);
        assert_eq!(state.value, 2);
        assert_eq!(Counter::replay(&events), state);
        assert_eq!(Counter::replay(std::iter::empty()), Counter::default());
    }

    #[test]
    fn execute_does_not_mutate_state() {
        let state = Counter { value: 1 };
        let events = state
            .execute(CounterCommand::Add {
                id: "c-1".into(),
                amount: 5,
            })
            .unwrap();
        assert_eq!(state.value, 1);
        assert_eq!(events.len(), 1);

        let err = state
            .execute(CounterCommand::Sub {
                id: "c-1".into(),
                amount: 5,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
