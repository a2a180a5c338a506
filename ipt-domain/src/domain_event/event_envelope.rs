use crate::aggregate::Aggregate;
use crate::domain_event::DomainEvent;
use chrono::{DateTime, Utc};

use super::event_context::EventContext;
use super::metadata::Metadata;

/// 事件信封，包含事件载荷、元数据与业务上下文
#[derive(Debug, Clone)]
pub struct EventEnvelope<A>
where
    A: Aggregate,
{
    pub metadata: Metadata,
    pub payload: A::Event,
    pub context: EventContext,
}

impl<A> EventEnvelope<A>
where
    A: Aggregate,
{
    /// 以当前时间封装事件
    pub fn new(aggregate_id: &A::Id, payload: A::Event, context: EventContext) -> Self {
        Self::at(aggregate_id, payload, context, Utc::now())
    }

    /// 以指定发生时间封装事件
    pub fn at(
        aggregate_id: &A::Id,
        payload: A::Event,
        context: EventContext,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        let metadata = Metadata::builder()
            .aggregate_id(aggregate_id.to_string())
            .aggregate_type(A::TYPE.to_string())
            .aggregate_revision(payload.aggregate_revision())
            .occurred_at(occurred_at)
            .build();

        Self {
            metadata,
            payload,
            context,
        }
    }
}
