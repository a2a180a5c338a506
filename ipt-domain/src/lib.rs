//! IPT 领域层基础库（ipt-domain）
//!
//! 为资源（Resource）等领域模型提供通用的 DDD 构件：
//! - 实体（`entity`）与聚合（`aggregate`）建模
//! - 领域事件（`domain_event`）：事件载荷、信封、元数据与上下文
//! - 命令编排（`aggregate_root`）：执行命令、应用事件并封装信封
//! - 规约（`specification`）与值对象（`value_object`）
//!
//! 本 crate 不涉及持久化与传输，仅定义领域层接口与统一错误类型。
//!
pub mod aggregate;
pub mod aggregate_root;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod specification;
pub mod value_object;

// 允许在本 crate 内部通过 ::ipt_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ipt_domain 路径。
extern crate self as ipt_domain;
