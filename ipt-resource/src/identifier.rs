//! DOI 与标识符状态
//!
use crate::constants::DOI_RESOLVER;
use ipt_domain::error::{DomainError, DomainResult};
use ipt_domain::value_object::ValueObject;
use ipt_macros::value_object;
use std::{fmt, str::FromStr};

/// 解析时可被剥离的前缀（大小写不敏感）
const DOI_PREFIXES: [&str; 5] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// 数字对象标识符（DOI），形如 `10.1234/abcd`
///
/// 前缀与后缀统一以小写保存，因此比较与哈希均大小写不敏感。
#[value_object(default = false)]
#[derive(Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Doi {
    prefix: String,
    suffix: String,
}

impl Doi {
    /// 解析 `10.x/y`、`doi:10.x/y` 或 `https://doi.org/10.x/y`
    ///
    /// ```
    /// use ipt_resource::Doi;
    ///
    /// let doi = Doi::parse("https://doi.org/10.5072/FK2ABC").unwrap();
    /// assert_eq!(doi.to_string(), "10.5072/fk2abc");
    /// assert_eq!(doi.url(), "https://doi.org/10.5072/fk2abc");
    /// ```
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        let bare = DOI_PREFIXES
            .iter()
            .find_map(|prefix| strip_prefix_ignore_case(trimmed, prefix))
            .unwrap_or(trimmed)
            .to_lowercase();

        let Some((prefix, suffix)) = bare.split_once('/') else {
            return Err(DomainError::Parse {
                reason: format!("DOI must contain a '/': {input}"),
            });
        };

        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
        .validated()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// 可解析的 DOI 链接
    pub fn url(&self) -> String {
        format!("{DOI_RESOLVER}{self}")
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

impl ValueObject for Doi {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let registrant = self.prefix.strip_prefix("10.").unwrap_or_default();
        if registrant.is_empty() {
            return Err(DomainError::InvalidValue {
                reason: format!("DOI prefix must start with '10.': {}", self.prefix),
            });
        }
        if self.suffix.trim().is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "DOI suffix must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.prefix, self.suffix)
    }
}

impl FromStr for Doi {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Doi {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Doi> for String {
    fn from(doi: Doi) -> Self {
        doi.to_string()
    }
}

/// DOI 状态，决定 DOI 是否出现在备用标识符列表与引用标识符中
#[value_object]
#[derive(Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierStatus {
    /// 未预留
    #[default]
    Unreserved,
    /// 已预留，尚未公开
    ReservedPendingPublication,
    /// 已预留，将在下次发布时公开
    PublicPendingPublication,
    /// 已公开注册
    Public,
    /// 已注册但不可用（如资源被删除）
    Unavailable,
}

impl IdentifierStatus {
    /// DOI 是否应作为资源的对外标识出现
    pub fn exposes_doi(&self) -> bool {
        match self {
            Self::PublicPendingPublication | Self::Public => true,
            Self::Unreserved | Self::ReservedPendingPublication | Self::Unavailable => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreserved => "UNRESERVED",
            Self::ReservedPendingPublication => "RESERVED_PENDING_PUBLICATION",
            Self::PublicPendingPublication => "PUBLIC_PENDING_PUBLICATION",
            Self::Public => "PUBLIC",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for IdentifierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
