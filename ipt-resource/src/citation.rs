//! 资源引用生成
//!
//! 引用格式：`作者 (年份): 标题. v版本. 发布机构. Dataset/核心类型. 标识符`
//!
use crate::metadata::Agent;
use crate::resource::Resource;
use crate::version::ResourceVersion;
use ipt_domain::specification::Specification;
use http::Uri;
use tracing::error;
use url::Url;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 同时具有姓和名
#[derive(Debug, Clone, Copy)]
pub struct HasPersonalName;

impl Specification<Agent> for HasPersonalName {
    fn is_satisfied_by(&self, agent: &Agent) -> bool {
        non_blank(agent.last_name()).is_some() && non_blank(agent.first_name()).is_some()
    }
}

/// 姓名均留空，仅填写机构
#[derive(Debug, Clone, Copy)]
pub struct IsOrganisationOnly;

impl Specification<Agent> for IsOrganisationOnly {
    fn is_satisfied_by(&self, agent: &Agent) -> bool {
        non_blank(agent.last_name()).is_none()
            && non_blank(agent.first_name()).is_none()
            && non_blank(agent.organisation()).is_some()
    }
}

/// 可列为引用作者的创建者
pub fn qualifies_as_author() -> impl Specification<Agent> {
    HasPersonalName.or(IsOrganisationOnly)
}

/// 引用中的作者名：`姓 名首字母…`，或仅有机构时的机构名；不符合条件返回 `None`
///
/// ```
/// use ipt_resource::citation::author_name;
/// use ipt_resource::metadata::Agent;
///
/// let agent = Agent::builder().first_name("john paul").last_name("Smith").build();
/// assert_eq!(author_name(&agent).as_deref(), Some("Smith J P"));
/// ```
pub fn author_name(agent: &Agent) -> Option<String> {
    if !qualifies_as_author().is_satisfied_by(agent) {
        return None;
    }
    match (non_blank(agent.last_name()), non_blank(agent.first_name())) {
        (Some(last_name), Some(first_name)) => {
            let initials: Vec<String> = first_name
                .split_whitespace()
                .filter_map(|name| name.chars().next())
                .map(|initial| initial.to_uppercase().collect())
                .collect();
            Some(format!("{last_name} {}", initials.join(" ")))
        }
        _ => non_blank(agent.organisation()).map(str::to_string),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Resource {
    /// 为指定版本生成引用
    ///
    /// 主页可以是相对引用（如 `/ipt`），原样写入引用；
    /// 版本号无法解析或主页不是语法合法的 URI 时返回 `None` 并记录错误日志。
    pub fn generate_citation(&self, version: &str, homepage: &str) -> Option<String> {
        let version = match version.parse::<ResourceVersion>() {
            Ok(version) => version,
            Err(err) => {
                error!(short_name = %self.short_name(), version, error = %err, "failed to parse version for citation");
                return None;
            }
        };
        let homepage = homepage.trim();
        if let Err(err) = homepage.parse::<Uri>() {
            error!(short_name = %self.short_name(), homepage, error = %err, "failed to parse homepage for citation");
            return None;
        }
        Some(self.render_citation(&version, homepage))
    }

    /// 以已校验的主页生成引用
    pub fn citation_for(&self, version: &ResourceVersion, homepage: &Url) -> String {
        self.render_citation(version, homepage.as_str())
    }

    fn render_citation(&self, version: &ResourceVersion, homepage: &str) -> String {
        let eml = self.eml();
        let mut citation = eml
            .creators()
            .iter()
            .filter_map(author_name)
            .collect::<Vec<_>>()
            .join(", ");

        match eml.publication_year() {
            Some(year) if citation.is_empty() => citation.push_str(&format!("({year}): ")),
            Some(year) => citation.push_str(&format!(" ({year}): ")),
            None if citation.is_empty() => {}
            None => citation.push_str(": "),
        }

        match non_blank(Some(self.title())) {
            Some(title) => citation.push_str(title),
            None => citation.push_str(self.short_name().as_str()),
        }
        citation.push_str(". ");

        citation.push_str(&format!("v{version}. "));

        if let Some(publisher) = non_blank(self.organisation().and_then(|o| o.name())) {
            citation.push_str(publisher);
            citation.push_str(". ");
        }

        citation.push_str("Dataset");
        if let Some(core_type) = self.core_type() {
            citation.push('/');
            citation.push_str(&capitalize(&core_type.to_lowercase()));
        }
        citation.push_str(". ");

        let identifier = match self.doi() {
            Some(doi) => doi.url(),
            None => non_blank(eml.citation().and_then(|c| c.identifier()))
                .unwrap_or(homepage)
                .to_string(),
        };
        citation.push_str(&identifier);
        citation
    }
}
