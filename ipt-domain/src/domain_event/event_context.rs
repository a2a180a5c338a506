use bon::Builder;
use serde::{Deserialize, Serialize};

/// 触发事件的业务上下文
#[derive(Builder, Default, Debug, Clone, Serialize, Deserialize)]
pub struct EventContext {
    /// 关联ID
    correlation_id: Option<String>,
    /// 触发事件的主体ID（例如执行发布操作的用户邮箱）
    actor_id: Option<String>,
    /// 触发方式（如 `manual`、`auto-publish`）
    trigger: Option<String>,
}

impl EventContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }
}
