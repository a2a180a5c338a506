//! 资源模型使用的领域常量

/// Darwin Core 记录类型：观测/标本记录
pub const DWC_ROWTYPE_OCCURRENCE: &str = "http://rs.tdwg.org/dwc/terms/Occurrence";
/// Darwin Core 记录类型：分类单元（名录）
pub const DWC_ROWTYPE_TAXON: &str = "http://rs.tdwg.org/dwc/terms/Taxon";
/// Darwin Core 记录类型：采样事件
pub const DWC_ROWTYPE_EVENT: &str = "http://rs.tdwg.org/dwc/terms/Event";

/// DOI 解析服务前缀
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// 自动生成引用前的占位文本
pub const CITATION_PLACEHOLDER: &str = "Will be replaced by auto-generated citation";

/// GBIF 支持的许可协议
pub const GBIF_SUPPORTED_LICENSES: [&str; 3] = [
    "http://creativecommons.org/publicdomain/zero/1.0/legalcode",
    "http://creativecommons.org/licenses/by/4.0/legalcode",
    "http://creativecommons.org/licenses/by-nc/4.0/legalcode",
];
