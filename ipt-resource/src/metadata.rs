//! 资源元数据（EML）中与版本、引用和标识符相关的部分
//!
use crate::constants::CITATION_PLACEHOLDER;
use crate::version::ResourceVersion;
use bon::Builder;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// EML 元数据
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eml {
    #[builder(into, default)]
    title: String,
    version: Option<ResourceVersion>,
    date_stamp: Option<DateTime<Utc>>,
    #[builder(default)]
    creators: Vec<Agent>,
    citation: Option<Citation>,
    #[builder(default)]
    alternate_identifiers: Vec<String>,
    #[builder(into)]
    license_url: Option<String>,
}

impl Eml {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn version(&self) -> Option<ResourceVersion> {
        self.version
    }

    pub fn set_version(&mut self, version: Option<ResourceVersion>) {
        self.version = version;
    }

    pub fn date_stamp(&self) -> Option<DateTime<Utc>> {
        self.date_stamp
    }

    pub fn set_date_stamp(&mut self, date_stamp: Option<DateTime<Utc>>) {
        self.date_stamp = date_stamp;
    }

    /// 发布年份；日期缺失或年份非正时为 `None`
    pub fn publication_year(&self) -> Option<i32> {
        self.date_stamp.map(|d| d.year()).filter(|y| *y > 0)
    }

    pub fn creators(&self) -> &[Agent] {
        &self.creators
    }

    pub fn add_creator(&mut self, creator: Agent) {
        self.creators.push(creator);
    }

    pub fn citation(&self) -> Option<&Citation> {
        self.citation.as_ref()
    }

    pub fn citation_mut(&mut self) -> Option<&mut Citation> {
        self.citation.as_mut()
    }

    pub fn set_citation(&mut self, citation: Option<Citation>) {
        self.citation = citation;
    }

    pub fn alternate_identifiers(&self) -> &[String] {
        &self.alternate_identifiers
    }

    /// 追加备用标识符，已存在（大小写不敏感）时忽略
    pub fn add_alternate_identifier(&mut self, identifier: impl Into<String>) -> bool {
        let identifier = identifier.into();
        if self.contains_alternate_identifier(&identifier) {
            return false;
        }
        self.alternate_identifiers.push(identifier);
        true
    }

    /// 将标识符置于首位，并去除其余位置上大小写不敏感的重复项；返回列表是否发生变化
    pub fn promote_alternate_identifier(&mut self, identifier: &str) -> bool {
        let mut reordered = Vec::with_capacity(self.alternate_identifiers.len() + 1);
        reordered.push(identifier.to_string());
        reordered.extend(
            self.alternate_identifiers
                .iter()
                .filter(|id| !id.eq_ignore_ascii_case(identifier))
                .cloned(),
        );

        let changed = reordered != self.alternate_identifiers;
        self.alternate_identifiers = reordered;
        changed
    }

    /// 移除所有大小写不敏感匹配的标识符，返回移除数量
    pub fn remove_alternate_identifier(&mut self, identifier: &str) -> usize {
        let before = self.alternate_identifiers.len();
        self.alternate_identifiers
            .retain(|id| !id.eq_ignore_ascii_case(identifier));
        before - self.alternate_identifiers.len()
    }

    pub fn contains_alternate_identifier(&self, identifier: &str) -> bool {
        self.alternate_identifiers
            .iter()
            .any(|id| id.eq_ignore_ascii_case(identifier))
    }

    pub fn license_url(&self) -> Option<&str> {
        self.license_url.as_deref()
    }

    pub fn set_license_url(&mut self, license_url: Option<String>) {
        self.license_url = license_url;
    }
}

/// 元数据中的人员/机构
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[builder(into)]
    first_name: Option<String>,
    #[builder(into)]
    last_name: Option<String>,
    #[builder(into)]
    organisation: Option<String>,
}

impl Agent {
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn organisation(&self) -> Option<&str> {
        self.organisation.as_deref()
    }
}

/// 资源引用：引用文本与引用标识符
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    text: String,
    identifier: Option<String>,
}

impl Citation {
    pub fn new(text: impl Into<String>, identifier: Option<String>) -> Self {
        Self {
            text: text.into(),
            identifier,
        }
    }

    /// 自动生成引用前的占位引用
    pub fn placeholder(identifier: Option<String>) -> Self {
        Self::new(CITATION_PLACEHOLDER, identifier)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_moves_identifier_first_without_duplicates() {
        let mut eml = Eml::builder()
            .alternate_identifiers(vec![
                "urn:lsid:birds".into(),
                "10.5072/ABC".into(),
                "https://example.org/birds".into(),
            ])
            .build();

        assert!(eml.promote_alternate_identifier("10.5072/abc"));
        assert_eq!(
            eml.alternate_identifiers(),
            ["10.5072/abc", "urn:lsid:birds", "https://example.org/birds"]
        );
        assert!(!eml.promote_alternate_identifier("10.5072/abc"));
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut eml = Eml::default();
        assert!(eml.add_alternate_identifier("10.5072/abc"));
        assert!(!eml.add_alternate_identifier("10.5072/ABC"));
        assert!(eml.add_alternate_identifier("urn:lsid:birds"));

        assert_eq!(eml.remove_alternate_identifier("10.5072/Abc"), 1);
        assert_eq!(eml.alternate_identifiers(), ["urn:lsid:birds"]);
        assert_eq!(eml.remove_alternate_identifier("10.5072/abc"), 0);
    }

    #[test]
    fn publication_year_ignores_missing_date() {
        let mut eml = Eml::builder().title("Birds").build();
        assert_eq!(eml.publication_year(), None);

        let stamp = DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        eml.set_date_stamp(Some(stamp));
        assert_eq!(eml.publication_year(), Some(2024));
    }

    #[test]
    fn agent_builder_accepts_str() {
        let agent = Agent::builder().first_name("John Paul").last_name("Smith").build();
        assert_eq!(agent.first_name(), Some("John Paul"));
        assert_eq!(agent.organisation(), None);
    }
}
