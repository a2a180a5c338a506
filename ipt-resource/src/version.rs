//! 资源版本号
//!
//! 资源版本与 EML 版本一致，写作 `主版本.次版本`。次版本是小数点后的整数，
//! 因此 `1.9` 的下一个次版本是 `1.10` 而不是 `2.0`。
//!
use ipt_domain::error::{DomainError, DomainResult};
use ipt_domain::value_object::ValueObject;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::{cmp::Ordering, fmt, str::FromStr};

/// 次版本允许的最大位数
const MAX_SCALE: u32 = 10;

/// 资源版本号
///
/// 相等与哈希按数值：`1.0 == 1.00`，`1.1 == 1.10`，`1.01 != 1.1`。
/// 版本先后另见 [`ResourceVersion::compare_release`]，因此不实现 `Ord`。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ResourceVersion(Decimal);

impl ResourceVersion {
    /// 初始版本 `1.0`
    pub const INITIAL: Self = Self(Decimal::from_parts(10, 0, 0, false, 1));

    pub fn new(value: Decimal) -> DomainResult<Self> {
        Self(value).validated()
    }

    /// 由主、次版本构造，小数位数取次版本的位数（至少一位）
    ///
    /// ```
    /// use ipt_resource::ResourceVersion;
    ///
    /// assert_eq!(ResourceVersion::from_parts(1, 10).to_string(), "1.10");
    /// assert_eq!(ResourceVersion::from_parts(3, 0).to_string(), "3.0");
    /// ```
    pub fn from_parts(major: u32, minor: u32) -> Self {
        let minor = u64::from(minor);
        Self::compose(u64::from(major), minor, digits(minor))
    }

    fn compose(major: u64, minor: u64, scale: u32) -> Self {
        let mantissa = i128::from(major) * 10_i128.pow(scale) + i128::from(minor);
        Self(Decimal::from_i128_with_scale(mantissa, scale))
    }

    pub fn major(&self) -> u64 {
        self.0.trunc().mantissa().unsigned_abs() as u64
    }

    /// 小数部分按整数读出：`1.10` → 10，`1.9` → 9
    pub fn minor(&self) -> u64 {
        self.0.fract().mantissa().unsigned_abs() as u64
    }

    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// 次版本加一，保留当前小数位数，不足时扩展一位
    ///
    /// ```
    /// use ipt_resource::ResourceVersion;
    ///
    /// let v: ResourceVersion = "1.9".parse().unwrap();
    /// assert_eq!(v.next_minor().to_string(), "1.10");
    /// ```
    pub fn next_minor(&self) -> Self {
        let minor = self.minor() + 1;
        let scale = self.scale().max(digits(minor));
        Self::compose(self.major(), minor, scale)
    }

    /// 主版本加一，次版本归零
    pub fn next_major(&self) -> Self {
        Self::compose(self.major() + 1, 0, 1)
    }

    fn release(&self) -> (u64, u64) {
        (self.major(), self.minor())
    }

    /// 按 (主版本, 次版本) 比较先后；次版本按整数比较，所以 `1.10` 晚于 `1.9`
    pub fn compare_release(&self, other: &Self) -> Ordering {
        self.release().cmp(&other.release())
    }

    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.compare_release(other) == Ordering::Greater
    }
}

fn digits(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

impl ValueObject for ResourceVersion {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_sign_negative() {
            return Err(DomainError::InvalidValue {
                reason: format!("version must not be negative: {}", self.0),
            });
        }
        if self.0.scale() > MAX_SCALE {
            return Err(DomainError::InvalidValue {
                reason: format!("version has too many decimal places: {}", self.0),
            });
        }
        if self.major() > u64::from(u32::MAX) {
            return Err(DomainError::InvalidValue {
                reason: format!("major version out of range: {}", self.0),
            });
        }
        Ok(())
    }
}

impl PartialEq for ResourceVersion {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ResourceVersion {}

impl Hash for ResourceVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.normalize().hash(state);
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ResourceVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(Decimal::from_str(s.trim())?)
    }
}

impl TryFrom<Decimal> for ResourceVersion {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceVersion> for Decimal {
    fn from(version: ResourceVersion) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ResourceVersion {
        s.parse().unwrap()
    }

    #[test]
    fn minor_part_is_compared_as_integer() {
        assert!(v("1.10").is_newer_than(&v("1.9")));
        assert!(!v("1.9").is_newer_than(&v("1.10")));
        assert!(v("2.0").is_newer_than(&v("1.10")));
        assert_eq!(v("1.0").compare_release(&v("1.00")), Ordering::Equal);
    }

    #[test]
    fn next_minor_keeps_scale_and_grows_when_needed() {
        assert_eq!(v("1.1").next_minor().to_string(), "1.2");
        assert_eq!(v("1.9").next_minor().to_string(), "1.10");
        assert_eq!(v("1.10").next_minor().to_string(), "1.11");
        assert_eq!(v("1.99").next_minor().to_string(), "1.100");
        assert_eq!(v("3").next_minor().to_string(), "3.1");
    }

    #[test]
    fn next_major_resets_minor() {
        assert_eq!(v("1.10").next_major().to_string(), "2.0");
        assert_eq!(v("4.3").next_major(), ResourceVersion::from_parts(5, 0));
    }

    fn hash_of(version: ResourceVersion) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        version.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(v("1.0"), v("1.00"));
        assert_eq!(v("2"), v("2.0"));
        assert_eq!(v("1.1"), v("1.10"));
        assert_eq!(v("1.4"), v("1.40"));
        assert_ne!(v("1.01"), v("1.1"));
        assert_ne!(v("1.1"), v("1.2"));
        assert_eq!(hash_of(v("1.1")), hash_of(v("1.10")));
        assert_eq!(hash_of(v("3")), hash_of(v("3.000")));
        assert_eq!(ResourceVersion::INITIAL.to_string(), "1.0");
    }

    #[test]
    fn release_order_differs_from_numeric_order() {
        // 数值上 1.10 == 1.1 < 1.9，发布先后上 1.10 晚于 1.9
        assert!(v("1.10").is_newer_than(&v("1.1")));
        assert_eq!(v("1.10").compare_release(&v("1.1")), Ordering::Greater);

        let mut sorted = vec![v("1.10"), v("2.0"), v("1.9"), v("1.2")];
        sorted.sort_by(ResourceVersion::compare_release);
        assert_eq!(
            sorted.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["1.2", "1.9", "1.10", "2.0"]
        );
    }

    #[test]
    fn rejects_invalid_versions() {
        assert!(matches!(
            "-1.0".parse::<ResourceVersion>(),
            Err(DomainError::InvalidValue { .. })
        ));
        assert!(matches!(
            "one".parse::<ResourceVersion>(),
            Err(DomainError::Parse { .. })
        ));
        assert!("1.01234567890".parse::<ResourceVersion>().is_err());
    }

    #[test]
    fn serde_uses_plain_decimal_string() {
        let json = serde_json::to_string(&v("1.10")).unwrap();
        assert_eq!(json, "\"1.10\"");

        let back: ResourceVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "1.10");
        assert!(serde_json::from_str::<ResourceVersion>("\"-2.0\"").is_err());
    }
}
