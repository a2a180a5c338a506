//! IPT 资源模型（ipt-resource）
//!
//! 以 `Resource` 聚合为中心，描述一个已发布的生物多样性数据集：
//! - 版本号运算与版本历史（`version`、`version_history`）；
//! - DOI 及其状态，对备用标识符列表与引用标识符的同步（`identifier`）；
//! - 引用字符串生成（`citation`）；
//! - 数据源与扩展映射的集合管理（`mapping`）；
//! - 以命令/事件驱动的发布与 DOI 生命周期（`resource::ResourceCommand`）。
//!
//! 持久化、注册中心调用与 EML 解析均不在本 crate 范围内，相关协作者仅以数据形式出现。
//!
pub mod citation;
pub mod constants;
pub mod identifier;
pub mod mapping;
pub mod metadata;
pub mod party;
pub mod resource;
pub mod shared;
pub mod status;
pub mod version;
pub mod version_history;

pub use identifier::{Doi, IdentifierStatus};
pub use resource::{Resource, ResourceCommand, ResourceEvent, ShortName};
pub use shared::SharedResource;
pub use status::PublicationStatus;
pub use version::ResourceVersion;
pub use version_history::VersionHistory;
