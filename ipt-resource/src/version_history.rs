//! 版本历史
//!
//! 每次成功发布在历史头部追加一条记录，记录不可变；
//! 版本号按数值比较，同一数值至多出现一次（`1.1` 与 `1.10` 视为同一版本）。
//!
use crate::identifier::{Doi, IdentifierStatus};
use crate::status::PublicationStatus;
use crate::version::ResourceVersion;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单个已发布版本的快照
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionHistory {
    version: ResourceVersion,
    /// 发布时资源的可见性
    #[builder(default)]
    publication_status: PublicationStatus,
    doi: Option<Doi>,
    /// 发布时 DOI 的状态
    #[builder(default)]
    status: IdentifierStatus,
    #[builder(into)]
    change_summary: Option<String>,
    released: Option<DateTime<Utc>>,
    #[builder(default)]
    records_published: u64,
}

impl VersionHistory {
    pub fn version(&self) -> ResourceVersion {
        self.version
    }

    pub fn publication_status(&self) -> PublicationStatus {
        self.publication_status
    }

    pub fn doi(&self) -> Option<&Doi> {
        self.doi.as_ref()
    }

    pub fn status(&self) -> IdentifierStatus {
        self.status
    }

    pub fn change_summary(&self) -> Option<&str> {
        self.change_summary.as_deref()
    }

    pub fn released(&self) -> Option<DateTime<Utc>> {
        self.released
    }

    pub fn records_published(&self) -> u64 {
        self.records_published
    }
}

/// 版本历史列表（最新在前）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<VersionHistory>", into = "Vec<VersionHistory>")]
pub struct VersionHistoryLog {
    entries: Vec<VersionHistory>,
}

impl VersionHistoryLog {
    /// 在头部插入；同版本记录已存在时不做任何修改并返回 `false`
    pub fn add(&mut self, entry: VersionHistory) -> bool {
        if self.find(&entry.version).is_some() {
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    /// 移除所有版本号相同的记录，返回移除数量
    pub fn remove(&mut self, version: &ResourceVersion) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.version != *version);
        before - self.entries.len()
    }

    pub fn find(&self, version: &ResourceVersion) -> Option<&VersionHistory> {
        self.entries.iter().find(|e| e.version == *version)
    }

    /// 最近一次发布
    pub fn latest(&self) -> Option<&VersionHistory> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VersionHistory> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[VersionHistory] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<VersionHistory>> for VersionHistoryLog {
    /// 保持给定顺序，重复版本仅保留首次出现的记录
    fn from(entries: Vec<VersionHistory>) -> Self {
        let mut log = Self::default();
        for entry in entries {
            if log.find(&entry.version).is_none() {
                log.entries.push(entry);
            }
        }
        log
    }
}

impl From<VersionHistoryLog> for Vec<VersionHistory> {
    fn from(log: VersionHistoryLog) -> Self {
        log.entries
    }
}

impl<'a> IntoIterator for &'a VersionHistoryLog {
    type Item = &'a VersionHistory;
    type IntoIter = std::slice::Iter<'a, VersionHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str) -> VersionHistory {
        VersionHistory::builder()
            .version(version.parse().unwrap())
            .build()
    }

    #[test]
    fn add_is_idempotent_per_version() {
        let mut log = VersionHistoryLog::default();
        assert!(log.add(entry("1.0")));
        assert!(log.add(entry("1.1")));
        assert!(!log.add(entry("1.1")));
        assert!(!log.add(entry("1.00")));

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().unwrap().version().to_string(), "1.1");
    }

    #[test]
    fn remove_and_find_ignore_trailing_zeros() {
        let mut log = VersionHistoryLog::default();
        log.add(entry("1.0"));
        log.add(entry("2.0"));

        assert!(log.find(&"2".parse().unwrap()).is_some());
        assert_eq!(log.remove(&"1.00".parse().unwrap()), 1);
        assert_eq!(log.remove(&"1.0".parse().unwrap()), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn versions_match_numerically() {
        let mut log = VersionHistoryLog::default();
        assert!(log.add(entry("1.1")));
        assert!(log.add(entry("1.01")));
        assert!(!log.add(entry("1.10")));
        assert_eq!(log.len(), 2);

        assert_eq!(log.find(&"1.10".parse().unwrap()).unwrap().version().to_string(), "1.1");
        assert_eq!(log.find(&"1.01".parse().unwrap()).unwrap().version().to_string(), "1.01");
        assert_eq!(log.remove(&"1.10".parse().unwrap()), 1);
        assert_eq!(log.latest().unwrap().version().to_string(), "1.01");
    }

    #[test]
    fn deserializing_drops_duplicate_versions() {
        // 1.10 与 1.1 数值相等
        let json = r#"[
            {"version":"1.1","publication_status":"PUBLIC","doi":null,"status":"UNRESERVED","change_summary":null,"released":null,"records_published":12},
            {"version":"1.10","publication_status":"PUBLIC","doi":null,"status":"UNRESERVED","change_summary":null,"released":null,"records_published":10},
            {"version":"1.1","publication_status":"PRIVATE","doi":null,"status":"UNRESERVED","change_summary":null,"released":null,"records_published":1}
        ]"#;
        let log: VersionHistoryLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().records_published(), 12);
    }
}
