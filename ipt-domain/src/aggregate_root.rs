//! 聚合命令编排
//!
//! 封装“执行命令 → 应用事件 → 封装事件信封”的标准流程，
//! 以及按顺序重放事件重建聚合状态。
//!
use crate::{
    aggregate::Aggregate,
    domain_event::{EventContext, EventEnvelope},
    entity::Entity,
};

/// 对聚合执行命令：
/// 1. 执行命令得到新事件（校验失败时聚合保持不变）；
/// 2. 依次应用事件到聚合状态；
/// 3. 返回携带上下文的事件信封。
pub fn handle<A>(
    aggregate: &mut A,
    command: A::Command,
    context: EventContext,
) -> Result<Vec<EventEnvelope<A>>, A::Error>
where
    A: Aggregate,
{
    let events = aggregate.execute(command)?;

    for event in &events {
        aggregate.apply(event);
    }

    Ok(events
        .into_iter()
        .map(|event| EventEnvelope::new(aggregate.id(), event, context.clone()))
        .collect())
}

/// 由给定标识新建聚合，并按顺序重放事件
pub fn rehydrate<A>(id: A::Id, events: &[A::Event]) -> A
where
    A: Aggregate,
{
    let mut aggregate = <A as Entity>::new(id);
    for event in events {
        aggregate.apply(event);
    }
    aggregate
}
