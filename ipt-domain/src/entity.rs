//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与修订号（revision）。
//! 修订号随每个已应用的领域事件递增，与业务上的“数据集版本”无关。
//!
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与修订号的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 使用给定标识创建实体（聚合）
    fn new(id: Self::Id) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前修订号（已应用的事件数）
    fn revision(&self) -> usize;
}
