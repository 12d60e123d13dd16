//! 原生列类型定义

use serde::{Deserialize, Serialize};

/// 后端使用的原生列类型关键字
///
/// 已知关键字之外的类型（例如从表元数据中读取到的 `varchar(64)`）
/// 以 `Custom` 原样保存，渲染时不做任何改写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    Int,
    BigInt,
    Decimal,
    Varchar,
    Char,
    Text,
    LongText,
    Date,
    DateTime,
    TinyInt,
    Set,
    Enum,
    /// 其他原生类型，按原始字符串保存
    Custom(String),
}

impl NativeType {
    /// 获取类型关键字
    pub fn as_str(&self) -> &str {
        match self {
            NativeType::Int => "INT",
            NativeType::BigInt => "BIGINT",
            NativeType::Decimal => "DECIMAL",
            NativeType::Varchar => "VARCHAR",
            NativeType::Char => "CHAR",
            NativeType::Text => "TEXT",
            NativeType::LongText => "LONGTEXT",
            NativeType::Date => "DATE",
            NativeType::DateTime => "DATETIME",
            NativeType::TinyInt => "TINYINT",
            NativeType::Set => "SET",
            NativeType::Enum => "ENUM",
            NativeType::Custom(token) => token,
        }
    }

    /// 从后端报告的类型字符串构建
    ///
    /// 只有与已知关键字完全一致时才映射为对应变体，其余一律保存为 `Custom`，
    /// 保证 `as_str()` 返回的内容与输入逐字相同
    pub fn from_token(token: &str) -> Self {
        match token {
            "INT" => NativeType::Int,
            "BIGINT" => NativeType::BigInt,
            "DECIMAL" => NativeType::Decimal,
            "VARCHAR" => NativeType::Varchar,
            "CHAR" => NativeType::Char,
            "TEXT" => NativeType::Text,
            "LONGTEXT" => NativeType::LongText,
            "DATE" => NativeType::Date,
            "DATETIME" => NativeType::DateTime,
            "TINYINT" => NativeType::TinyInt,
            "SET" => NativeType::Set,
            "ENUM" => NativeType::Enum,
            other => NativeType::Custom(other.to_string()),
        }
    }

    /// 是否为取值列表类型（ENUM / SET）
    pub fn is_value_list(&self) -> bool {
        matches!(self, NativeType::Enum | NativeType::Set)
    }
}

impl std::fmt::Display for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_preserves_text() {
        assert_eq!(NativeType::from_token("VARCHAR"), NativeType::Varchar);
        assert_eq!(NativeType::from_token("varchar").as_str(), "varchar");
        assert_eq!(NativeType::from_token("varchar(64)").as_str(), "varchar(64)");
        assert!(matches!(NativeType::from_token("MEDIUMINT"), NativeType::Custom(_)));
    }

    #[test]
    fn test_value_list_types() {
        assert!(NativeType::Enum.is_value_list());
        assert!(NativeType::Set.is_value_list());
        assert!(!NativeType::Varchar.is_value_list());
    }
}
