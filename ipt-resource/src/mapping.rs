//! 数据源与扩展映射
//!
//! 一个资源拥有若干数据源，每个扩展映射把一个 Darwin Core 扩展（核心或非核心）
//! 绑定到其中一个数据源。映射通过 `Arc<Source>` 共享数据源实例，
//! 覆盖同名数据源时由资源负责把映射重新指向新实例。
//!
use crate::constants::{DWC_ROWTYPE_EVENT, DWC_ROWTYPE_OCCURRENCE, DWC_ROWTYPE_TAXON};
use ipt_macros::value_object;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 数据源类型
#[value_object]
#[derive(Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    TextFile,
    Sql,
    Excel,
    Url,
}

/// 数据源，以规范化后的名称作为身份
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    name: String,
    kind: SourceKind,
}

impl Source {
    pub fn new(name: &str, kind: SourceKind) -> Self {
        Self {
            name: normalise_name(name),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Source {}

/// 数据源名称规范化：去除首尾空白、转小写，只保留字母数字与 `.`、`_`、`-`
pub fn normalise_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Darwin Core 扩展
#[value_object(default = false)]
#[derive(Hash)]
pub struct Extension {
    row_type: String,
    title: String,
    core: bool,
}

impl Extension {
    pub fn new(row_type: impl Into<String>, title: impl Into<String>, core: bool) -> Self {
        Self {
            row_type: row_type.into(),
            title: title.into(),
            core,
        }
    }

    pub fn row_type(&self) -> &str {
        &self.row_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_core(&self) -> bool {
        self.core
    }
}

/// 扩展到数据源的映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMapping {
    extension: Extension,
    source: Arc<Source>,
    #[serde(default)]
    fields: Vec<String>,
}

impl ExtensionMapping {
    pub fn new(extension: Extension, source: Arc<Source>) -> Self {
        Self {
            extension,
            source,
            fields: Vec::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    pub fn row_type(&self) -> &str {
        self.extension.row_type()
    }

    pub fn is_core(&self) -> bool {
        self.extension.is_core()
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    pub(crate) fn set_source(&mut self, source: Arc<Source>) {
        self.source = source;
    }

    /// 已映射的字段（术语名）
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// 由核心记录类型推导出的资源类型
#[value_object(default = false)]
#[derive(Copy, Hash)]
pub enum CoreRowType {
    Occurrence,
    Checklist,
    SamplingEvent,
    Other,
}

impl CoreRowType {
    /// 大小写不敏感地匹配 Darwin Core 记录类型 URI
    pub fn from_row_type(row_type: &str) -> Self {
        if row_type.eq_ignore_ascii_case(DWC_ROWTYPE_TAXON) {
            Self::Checklist
        } else if row_type.eq_ignore_ascii_case(DWC_ROWTYPE_OCCURRENCE) {
            Self::Occurrence
        } else if row_type.eq_ignore_ascii_case(DWC_ROWTYPE_EVENT) {
            Self::SamplingEvent
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Occurrence => "Occurrence",
            Self::Checklist => "Checklist",
            Self::SamplingEvent => "SamplingEvent",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for CoreRowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
