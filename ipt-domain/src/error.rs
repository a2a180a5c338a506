//! 领域层统一错误定义
//!
//! 聚焦参数/命令/状态校验、解析与序列化等最小必要集合，
//! 便于在各模型中统一以 `DomainError` 返回。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 领域规则/命令与状态 ---
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
    #[error("already exists: {reason}")]
    AlreadyExists { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<rust_decimal::Error> for DomainError {
    fn from(err: rust_decimal::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn decimal_errors_map_to_parse_errors() {
        let err: DomainError = rust_decimal::Decimal::from_str("1.x").unwrap_err().into();
        assert!(matches!(err, DomainError::Parse { .. }));

        let err: DomainError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, DomainError::Serde { .. }));
    }

    #[test]
    fn display_carries_reason() {
        let err = DomainError::AlreadyExists {
            reason: "source occurrence.txt".into(),
        };
        assert_eq!(err.to_string(), "already exists: source occurrence.txt");
    }
}
