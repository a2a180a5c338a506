use serde::{Deserialize, Serialize};

/// 字段变更：记录一次状态迁移的旧值与新值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChanged<T> {
    pub old: T,
    pub new: T,
}

impl<T> FieldChanged<T> {
    pub fn new(old: T, new: T) -> Self {
        Self { old, new }
    }

    pub fn old_value(&self) -> &T {
        &self.old
    }

    pub fn new_value(&self) -> &T {
        &self.new
    }

    /// 拆分为 `(old, new)`
    pub fn into_parts(self) -> (T, T) {
        (self.old, self.new)
    }
}

impl<T> FieldChanged<T>
where
    T: PartialEq,
{
    /// 仅当值确有变化时构造，否则返回 `None`
    pub fn between(old: T, new: T) -> Option<Self> {
        (old != new).then_some(Self { old, new })
    }

    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }
}
