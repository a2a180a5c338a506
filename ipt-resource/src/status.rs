//! 资源可见性、发布模式与维护频率
//!
use ipt_macros::value_object;
use std::fmt;

/// 资源可见性
#[value_object]
#[derive(Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    #[default]
    Private,
    Public,
    /// 已在 GBIF 注册
    Registered,
    Deleted,
}

impl PublicationStatus {
    /// 公开或已注册
    pub fn is_publicly_available(&self) -> bool {
        match self {
            Self::Public | Self::Registered => true,
            Self::Private | Self::Deleted => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Public => "PUBLIC",
            Self::Registered => "REGISTERED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 自动发布开关
#[value_object]
#[derive(Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationMode {
    AutoPublishOn,
    #[default]
    AutoPublishOff,
}

/// 数据集维护频率（EML `maintenanceUpdateFrequency`）
#[value_object(default = false)]
#[derive(Copy, Hash)]
#[serde(rename_all = "camelCase")]
pub enum UpdateFrequency {
    Daily,
    Weekly,
    Monthly,
    Biannually,
    Annually,
    AsNeeded,
    Continually,
    Irregular,
    NotPlanned,
    Unknown,
    OtherMaintenancePeriod,
}

impl UpdateFrequency {
    const ALL: [Self; 11] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Biannually,
        Self::Annually,
        Self::AsNeeded,
        Self::Continually,
        Self::Irregular,
        Self::NotPlanned,
        Self::Unknown,
        Self::OtherMaintenancePeriod,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Biannually => "biannually",
            Self::Annually => "annually",
            Self::AsNeeded => "asNeeded",
            Self::Continually => "continually",
            Self::Irregular => "irregular",
            Self::NotPlanned => "notPlanned",
            Self::Unknown => "unknown",
            Self::OtherMaintenancePeriod => "otherMaintenancePeriod",
        }
    }

    /// 按标识符查找（大小写不敏感），未知标识符返回 `None`
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.identifier().eq_ignore_ascii_case(identifier))
    }
}

impl fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
