//! 资源聚合
//!
//! `Resource` 描述一个已发布（或待发布）的生物多样性数据集：元数据、映射配置、
//! 版本与版本历史、DOI 及其状态。按职责拆分为若干 `impl` 块：
//! - `versioning`：版本运算与版本历史；
//! - `identifiers`：DOI 与备用标识符/引用标识符同步；
//! - `mappings`：数据源与扩展映射集合；
//! - `aggregate`：命令/事件。
//!
mod aggregate;
mod identifiers;
mod mappings;
mod versioning;

pub use aggregate::{ResourceCommand, ResourceEvent};

use crate::constants::GBIF_SUPPORTED_LICENSES;
use crate::identifier::{Doi, IdentifierStatus};
use crate::mapping::{ExtensionMapping, Source};
use crate::metadata::Eml;
use crate::party::{Organisation, User};
use crate::status::{PublicationMode, PublicationStatus, UpdateFrequency};
use crate::version::ResourceVersion;
use crate::version_history::VersionHistoryLog;
use chrono::{DateTime, Utc};
use ipt_domain::entity::Entity;
use ipt_domain::error::{DomainError, DomainResult};
use ipt_domain::value_object::ValueObject;
use ipt_macros::{entity, entity_id};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// 资源短名，资源在平台内的唯一标识
///
/// 排序大小写不敏感（`Birds` 与 `birds` 相邻），相同时再按原文比较以保持全序。
#[entity_id]
pub struct ShortName(String);

impl ShortName {
    /// 构造并校验：非空，仅含字母数字、`-`、`_`
    pub fn parse(value: &str) -> DomainResult<Self> {
        Self::new(value.trim().to_string()).validated()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ShortName {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "short name must not be empty".into(),
            });
        }
        if let Some(c) = self
            .0
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
        {
            return Err(DomainError::InvalidValue {
                reason: format!("short name '{}' contains invalid character '{c}'", self.0),
            });
        }
        Ok(())
    }
}

impl PartialOrd for ShortName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .to_lowercase()
            .cmp(&other.0.to_lowercase())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// 资源聚合根
#[entity(id = ShortName)]
#[derive(Clone)]
pub struct Resource {
    eml: Eml,
    /// 无核心映射时由用户填写的核心类型
    core_type: Option<String>,
    subtype: Option<String>,
    update_frequency: Option<UpdateFrequency>,
    status: PublicationStatus,
    publication_mode: PublicationMode,
    citation_auto_generated: bool,

    eml_version: Option<ResourceVersion>,
    replaced_eml_version: Option<ResourceVersion>,
    last_published: Option<DateTime<Utc>>,
    next_published: Option<DateTime<Utc>>,
    records_published: u64,

    /// GBIF 注册键，仅在已注册时有意义
    key: Option<Uuid>,
    organisation: Option<Organisation>,

    creator: Option<User>,
    created: Option<DateTime<Utc>>,
    modifier: Option<User>,
    modified: Option<DateTime<Utc>>,
    metadata_modified: Option<DateTime<Utc>>,
    mappings_modified: Option<DateTime<Utc>>,
    sources_modified: Option<DateTime<Utc>>,
    managers: BTreeSet<User>,

    /// 以规范化名称为键，因此天然按名称排序
    sources: BTreeMap<String, Arc<Source>>,
    mappings: Vec<ExtensionMapping>,

    change_summary: Option<String>,
    version_history: VersionHistoryLog,
    identifier_status: IdentifierStatus,
    doi: Option<Doi>,
    doi_organisation_key: Option<Uuid>,
}

impl Resource {
    /// 以短名新建资源，元数据标题缺省为短名
    pub fn create(short_name: ShortName) -> Self {
        let mut resource = <Self as Entity>::new(ShortName::default());
        resource.set_short_name(short_name);
        resource
    }

    pub fn short_name(&self) -> &ShortName {
        &self.id
    }

    /// 设置短名；元数据标题为空时以短名填充
    pub fn set_short_name(&mut self, short_name: ShortName) {
        if self.eml.title().trim().is_empty() {
            self.eml.set_title(short_name.as_str());
        }
        self.id = short_name;
    }

    pub fn eml(&self) -> &Eml {
        &self.eml
    }

    pub fn eml_mut(&mut self) -> &mut Eml {
        &mut self.eml
    }

    pub fn set_eml(&mut self, eml: Eml) {
        self.eml = eml;
    }

    pub fn title(&self) -> &str {
        self.eml.title()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.eml.set_title(title);
    }

    /// 日志用：标题与短名不同（大小写不敏感）时附上短名
    pub fn title_and_short_name(&self) -> String {
        let title = self.eml.title();
        if title.eq_ignore_ascii_case(self.id.as_str()) {
            title.to_string()
        } else {
            format!("{title} ({})", self.id)
        }
    }

    /// 空白视为未设置
    pub fn set_core_type(&mut self, core_type: Option<String>) {
        self.core_type = core_type.filter(|t| !t.trim().is_empty());
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// 以小写保存，空白视为未设置
    pub fn set_subtype(&mut self, subtype: Option<&str>) {
        self.subtype = subtype
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase);
    }

    pub fn update_frequency(&self) -> Option<UpdateFrequency> {
        self.update_frequency
    }

    /// 按标识符设置维护频率，无法识别时清空
    pub fn set_update_frequency(&mut self, identifier: &str) {
        self.update_frequency = UpdateFrequency::from_identifier(identifier);
    }

    pub fn status(&self) -> PublicationStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PublicationStatus) {
        self.status = status;
    }

    pub fn is_publicly_available(&self) -> bool {
        self.status.is_publicly_available()
    }

    pub fn is_registered(&self) -> bool {
        self.key.is_some() && self.status == PublicationStatus::Registered
    }

    pub fn publication_mode(&self) -> PublicationMode {
        self.publication_mode
    }

    pub fn set_publication_mode(&mut self, mode: PublicationMode) {
        self.publication_mode = mode;
    }

    /// 自动发布已开启且设置了维护频率
    pub fn uses_auto_publishing(&self) -> bool {
        self.publication_mode == PublicationMode::AutoPublishOn && self.update_frequency.is_some()
    }

    pub fn is_citation_auto_generated(&self) -> bool {
        self.citation_auto_generated
    }

    pub fn set_citation_auto_generated(&mut self, auto_generated: bool) {
        self.citation_auto_generated = auto_generated;
    }

    pub fn last_published(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }

    pub fn set_last_published(&mut self, last_published: Option<DateTime<Utc>>) {
        self.last_published = last_published;
    }

    pub fn is_published(&self) -> bool {
        self.last_published.is_some()
    }

    pub fn next_published(&self) -> Option<DateTime<Utc>> {
        self.next_published
    }

    pub fn set_next_published(&mut self, next_published: Option<DateTime<Utc>>) {
        self.next_published = next_published;
    }

    pub fn records_published(&self) -> u64 {
        self.records_published
    }

    pub fn set_records_published(&mut self, records: u64) {
        self.records_published = records;
    }

    pub fn has_published_data(&self) -> bool {
        self.records_published > 0
    }

    pub fn key(&self) -> Option<Uuid> {
        self.key
    }

    pub fn set_key(&mut self, key: Option<Uuid>) {
        self.key = key;
    }

    pub fn organisation(&self) -> Option<&Organisation> {
        self.organisation.as_ref()
    }

    pub fn set_organisation(&mut self, organisation: Option<Organisation>) {
        self.organisation = organisation;
    }

    pub fn creator(&self) -> Option<&User> {
        self.creator.as_ref()
    }

    /// 同时在修改人缺失时以创建人填充
    pub fn set_creator(&mut self, creator: User) {
        if self.modifier.is_none() {
            self.modifier = Some(creator.clone());
        }
        self.creator = Some(creator);
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// 同时在修改时间缺失时以创建时间填充
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = Some(created);
        self.modified.get_or_insert(created);
    }

    pub fn modifier(&self) -> Option<&User> {
        self.modifier.as_ref()
    }

    pub fn set_modifier(&mut self, modifier: User) {
        self.modifier = Some(modifier);
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    pub fn set_modified(&mut self, modified: DateTime<Utc>) {
        self.modified = Some(modified);
    }

    pub fn metadata_modified(&self) -> Option<DateTime<Utc>> {
        self.metadata_modified
    }

    pub fn set_metadata_modified(&mut self, at: DateTime<Utc>) {
        self.metadata_modified = Some(at);
        self.modified = Some(at);
    }

    pub fn mappings_modified(&self) -> Option<DateTime<Utc>> {
        self.mappings_modified
    }

    pub fn set_mappings_modified(&mut self, at: DateTime<Utc>) {
        self.mappings_modified = Some(at);
        self.modified = Some(at);
    }

    pub fn sources_modified(&self) -> Option<DateTime<Utc>> {
        self.sources_modified
    }

    pub fn set_sources_modified(&mut self, at: DateTime<Utc>) {
        self.sources_modified = Some(at);
        self.modified = Some(at);
    }

    pub fn managers(&self) -> &BTreeSet<User> {
        &self.managers
    }

    pub fn add_manager(&mut self, manager: User) -> bool {
        self.managers.insert(manager)
    }

    pub fn remove_manager(&mut self, manager: &User) -> bool {
        self.managers.remove(manager)
    }

    /// 即将发布版本的变更说明
    pub fn change_summary(&self) -> Option<&str> {
        self.change_summary.as_deref()
    }

    pub fn set_change_summary(&mut self, summary: Option<String>) {
        self.change_summary = summary;
    }

    /// 许可协议是否为 GBIF 支持的协议之一
    pub fn is_assigned_gbif_supported_license(&self) -> bool {
        self.eml.license_url().is_some_and(|url| {
            let url = url.trim();
            GBIF_SUPPORTED_LICENSES
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(url))
        })
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Resource {}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource {}", self.id)
    }
}
