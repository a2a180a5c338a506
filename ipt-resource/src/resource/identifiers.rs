use super::Resource;
use crate::identifier::{Doi, IdentifierStatus};
use crate::metadata::Citation;
use tracing::debug;
use uuid::Uuid;

impl Resource {
    pub fn doi(&self) -> Option<&Doi> {
        self.doi.as_ref()
    }

    /// 应与 [`Resource::set_identifier_status`] 成对设置
    pub fn set_doi(&mut self, doi: Option<Doi>) {
        self.doi = doi;
    }

    pub fn identifier_status(&self) -> IdentifierStatus {
        self.identifier_status
    }

    pub fn set_identifier_status(&mut self, status: IdentifierStatus) {
        self.identifier_status = status;
    }

    /// 分配 DOI 的机构
    pub fn doi_organisation_key(&self) -> Option<Uuid> {
        self.doi_organisation_key
    }

    pub fn set_doi_organisation_key(&mut self, key: Option<Uuid>) {
        self.doi_organisation_key = key;
    }

    /// 按 DOI 状态维护元数据的备用标识符列表，返回列表是否变化
    ///
    /// - 公开或待公开：DOI 置于列表首位且不重复；
    /// - 不可用或未预留：从列表中移除 DOI；
    /// - 已预留待发布：不变。
    ///
    /// 未设置 DOI 时不做任何事。重复调用结果不变。
    pub fn update_alternate_identifier_for_doi(&mut self) -> bool {
        let Some(doi) = self.doi.as_ref().map(Doi::to_string) else {
            return false;
        };

        match self.identifier_status {
            IdentifierStatus::Public | IdentifierStatus::PublicPendingPublication => {
                let changed = self.eml.promote_alternate_identifier(&doi);
                debug!(short_name = %self.id, doi = %doi, "DOI placed first in alternate identifiers");
                changed
            }
            IdentifierStatus::Unavailable | IdentifierStatus::Unreserved => {
                let removed = self.eml.remove_alternate_identifier(&doi);
                if removed > 0 {
                    debug!(short_name = %self.id, doi = %doi, "DOI removed from alternate identifiers");
                }
                removed > 0
            }
            IdentifierStatus::ReservedPendingPublication => false,
        }
    }

    /// 按 DOI 状态维护引用标识符，返回引用是否变化
    ///
    /// - 公开或待公开：引用标识符设为 DOI 链接；
    /// - 不可用或未预留：清空引用标识符；
    /// - 已预留待发布：不变。
    ///
    /// 需要修改但资源尚无引用时，先创建占位引用并标记为自动生成。
    pub fn update_citation_identifier_for_doi(&mut self) -> bool {
        let Some(url) = self.doi.as_ref().map(Doi::url) else {
            return false;
        };

        let identifier = match self.identifier_status {
            IdentifierStatus::Public | IdentifierStatus::PublicPendingPublication => Some(url),
            IdentifierStatus::Unavailable | IdentifierStatus::Unreserved => None,
            IdentifierStatus::ReservedPendingPublication => return false,
        };

        let changed = match self.eml.citation_mut() {
            Some(citation) if citation.identifier() == identifier.as_deref() => false,
            Some(citation) => {
                citation.set_identifier(identifier.clone());
                true
            }
            None => {
                self.citation_auto_generated = true;
                self.eml
                    .set_citation(Some(Citation::placeholder(identifier.clone())));
                true
            }
        };

        if changed {
            match identifier {
                Some(url) => {
                    debug!(short_name = %self.id, doi = %url, "DOI set as citation identifier")
                }
                None => debug!(short_name = %self.id, "citation identifier cleared"),
            }
        }
        changed
    }

    /// 依次执行两项 DOI 同步，返回是否有任何变化
    pub fn sync_doi_identifiers(&mut self) -> bool {
        let alternate = self.update_alternate_identifier_for_doi();
        let citation = self.update_citation_identifier_for_doi();
        alternate || citation
    }
}

#[cfg(test)]
mod tests {
    use crate::identifier::{Doi, IdentifierStatus};
    use crate::metadata::Citation;
    use crate::resource::{Resource, ShortName};

    fn with_doi(status: IdentifierStatus) -> Resource {
        let mut resource = Resource::create(ShortName::new("birds".into()));
        resource.set_doi(Some(Doi::parse("10.5072/abc").unwrap()));
        resource.set_identifier_status(status);
        resource
    }

    #[test]
    fn nothing_happens_without_doi() {
        let mut resource = Resource::create(ShortName::new("birds".into()));
        resource.set_identifier_status(IdentifierStatus::Public);
        assert!(!resource.sync_doi_identifiers());
        assert!(resource.eml().citation().is_none());
        assert!(resource.eml().alternate_identifiers().is_empty());
    }

    #[test]
    fn public_doi_becomes_citation_identifier() {
        let mut resource = with_doi(IdentifierStatus::PublicPendingPublication);
        assert!(resource.update_citation_identifier_for_doi());

        let citation = resource.eml().citation().unwrap();
        assert_eq!(citation.identifier(), Some("https://doi.org/10.5072/abc"));
        assert_eq!(citation.text(), crate::constants::CITATION_PLACEHOLDER);
        assert!(resource.is_citation_auto_generated());
        assert!(!resource.update_citation_identifier_for_doi());
    }

    #[test]
    fn existing_citation_text_is_kept() {
        let mut resource = with_doi(IdentifierStatus::Public);
        resource
            .eml_mut()
            .set_citation(Some(Citation::new("Smith J (2020): Birds.", None)));
        resource.sync_doi_identifiers();

        let citation = resource.eml().citation().unwrap();
        assert_eq!(citation.text(), "Smith J (2020): Birds.");
        assert_eq!(citation.identifier(), Some("https://doi.org/10.5072/abc"));
        assert!(!resource.is_citation_auto_generated());
    }

    #[test]
    fn unreserved_doi_clears_citation_identifier() {
        let mut resource = with_doi(IdentifierStatus::Public);
        resource.sync_doi_identifiers();

        resource.set_identifier_status(IdentifierStatus::Unreserved);
        assert!(resource.sync_doi_identifiers());
        assert_eq!(resource.eml().citation().unwrap().identifier(), None);
        assert!(resource.eml().alternate_identifiers().is_empty());
    }

    #[test]
    fn unavailable_doi_creates_placeholder_citation() {
        let mut resource = with_doi(IdentifierStatus::Unavailable);
        assert!(resource.update_citation_identifier_for_doi());
        let citation = resource.eml().citation().unwrap();
        assert_eq!(citation.identifier(), None);
        assert!(resource.is_citation_auto_generated());
    }

    #[test]
    fn reserved_doi_leaves_metadata_untouched() {
        let mut resource = with_doi(IdentifierStatus::ReservedPendingPublication);
        resource.eml_mut().add_alternate_identifier("urn:lsid:birds");
        assert!(!resource.sync_doi_identifiers());
        assert_eq!(resource.eml().alternate_identifiers(), ["urn:lsid:birds"]);
        assert!(resource.eml().citation().is_none());
    }
}
