use super::Resource;
use crate::identifier::{Doi, IdentifierStatus};
use crate::status::PublicationStatus;
use crate::version::ResourceVersion;
use crate::version_history::{VersionHistory, VersionHistoryLog};
use ipt_domain::error::{DomainError, DomainResult};

impl Resource {
    /// 当前版本：已设置的版本，其次元数据版本，最后为 `1.0`
    pub fn version(&self) -> ResourceVersion {
        self.eml_version
            .or_else(|| self.eml.version())
            .unwrap_or(ResourceVersion::INITIAL)
    }

    /// 下一次发布将使用的版本
    ///
    /// 从未发布过时沿用元数据版本。DOI 处于“待公开”状态时，以下两种情况升主版本：
    /// 1. 尚未分配过 DOI，且资源公开可见（公开或已注册）；
    /// 2. 已分配过 DOI（新 DOI 将替换旧 DOI）。
    ///
    /// 其余情况升次版本。
    pub fn next_version(&self) -> ResourceVersion {
        if self.last_published.is_none() {
            return self.eml.version().unwrap_or(ResourceVersion::INITIAL);
        }

        let current = self.version();
        if self.doi.is_some() && self.identifier_status == IdentifierStatus::PublicPendingPublication
        {
            let assigned = self.is_already_assigned_doi();
            if !assigned && self.status.is_publicly_available() {
                return current.next_major();
            }
            if assigned {
                return current.next_major();
            }
        }
        current.next_minor()
    }

    /// 设置当前版本；新版本晚于当前版本时，先把当前版本记为被替换版本
    ///
    /// 被替换版本与最近一次发布不一致时返回 `InvalidArgument`，且不做任何修改。
    pub fn set_version(&mut self, version: ResourceVersion) -> DomainResult<()> {
        if let Some(current) = self.eml_version.or_else(|| self.eml.version()) {
            if version.is_newer_than(&current) {
                self.set_replaced_version(Some(current))?;
            }
        }
        self.eml_version = Some(version);
        self.eml.set_version(Some(version));
        Ok(())
    }

    /// 被本次（或最近一次）发布替换的版本，未设置时为 `1.0`
    pub fn replaced_version(&self) -> ResourceVersion {
        self.replaced_eml_version
            .unwrap_or(ResourceVersion::INITIAL)
    }

    /// 版本历史非空时，被替换版本必须等于最近一次发布的版本
    pub fn set_replaced_version(&mut self, version: Option<ResourceVersion>) -> DomainResult<()> {
        if let Some(version) = version {
            self.ensure_replaces_last_published(&version)?;
        }
        self.replaced_eml_version = version;
        Ok(())
    }

    pub(super) fn ensure_replaces_last_published(
        &self,
        version: &ResourceVersion,
    ) -> DomainResult<()> {
        match self.last_published_version() {
            Some(last) if last != *version => Err(DomainError::InvalidArgument {
                reason: format!(
                    "replaced version {version} must equal last published version {last}"
                ),
            }),
            _ => Ok(()),
        }
    }

    pub fn version_history(&self) -> &VersionHistoryLog {
        &self.version_history
    }

    /// 同版本记录已存在时不做修改并返回 `false`
    pub fn add_version_history(&mut self, entry: VersionHistory) -> bool {
        self.version_history.add(entry)
    }

    pub fn remove_version_history(&mut self, version: &ResourceVersion) -> usize {
        self.version_history.remove(version)
    }

    pub fn find_version_history(&self, version: &ResourceVersion) -> Option<&VersionHistory> {
        self.version_history.find(version)
    }

    /// 最近一次发布带有 DOI 且 DOI 已公开
    ///
    /// 只有公开状态的 DOI 才算正式分配。
    pub fn is_already_assigned_doi(&self) -> bool {
        self.assigned_doi().is_some()
    }

    /// 最近一次发布所分配的公开 DOI
    pub fn assigned_doi(&self) -> Option<&Doi> {
        self.version_history
            .latest()
            .filter(|latest| latest.status() == IdentifierStatus::Public)
            .and_then(VersionHistory::doi)
    }

    pub fn last_published_version(&self) -> Option<ResourceVersion> {
        self.version_history.latest().map(VersionHistory::version)
    }

    /// 空白视为无
    pub fn last_published_version_change_summary(&self) -> Option<&str> {
        self.version_history
            .latest()
            .and_then(VersionHistory::change_summary)
            .filter(|summary| !summary.trim().is_empty())
    }

    /// 最近一次发布时的可见性；无历史时，已注册资源为 `Registered`，否则为 `Private`
    pub fn last_published_version_publication_status(&self) -> PublicationStatus {
        match self.version_history.latest() {
            Some(latest) => latest.publication_status(),
            None if self.status == PublicationStatus::Registered => PublicationStatus::Registered,
            None => PublicationStatus::Private,
        }
    }

    pub fn is_last_published_version_public(&self) -> bool {
        self.version_history
            .latest()
            .is_some_and(|latest| latest.publication_status() == PublicationStatus::Public)
    }
}
