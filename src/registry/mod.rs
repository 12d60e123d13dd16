//! 列类型注册表模块
//!
//! 提供全局只读的逻辑类型名到原生列类型的映射

use crate::error::SchemaResult;
use crate::types::NativeType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 逻辑类型名到原生类型的全局映射，进程启动后不再变化
static TYPE_MAPPING: Lazy<HashMap<&'static str, NativeType>> = Lazy::new(|| {
    HashMap::from([
        ("integer", NativeType::Int),
        ("int", NativeType::Int),
        ("bigint", NativeType::BigInt),
        ("decimal", NativeType::Decimal),
        ("string", NativeType::Varchar),
        ("varchar", NativeType::Varchar),
        ("char", NativeType::Char),
        ("text", NativeType::Text),
        ("longtext", NativeType::LongText),
        ("date", NativeType::Date),
        ("datetime", NativeType::DateTime),
        ("boolean", NativeType::TinyInt),
        ("tinyint", NativeType::TinyInt),
        ("set", NativeType::Set),
        ("enum", NativeType::Enum),
    ])
});

/// 伪类型 - 展开为一个或多个真实列操作的便捷类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoType {
    /// 无符号自增整数主键
    AutoIncrementInteger,
    /// created / updated 两个时间列
    Timestamps,
}

impl PseudoType {
    /// 按名称识别伪类型（不区分大小写）
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto_increment_integer" => Some(PseudoType::AutoIncrementInteger),
            "timestamps" => Some(PseudoType::Timestamps),
            _ => None,
        }
    }
}

/// 列类型注册表
pub struct TypeRegistry;

impl TypeRegistry {
    /// 解析逻辑类型名
    ///
    /// 不区分大小写的精确匹配，未登记的类型返回 `UnknownType`
    pub fn resolve(logical_name: &str) -> SchemaResult<NativeType> {
        TYPE_MAPPING
            .get(logical_name.to_ascii_lowercase().as_str())
            .cloned()
            .ok_or_else(|| crate::schema_error!(unknown_type, logical_name))
    }

    /// 是否为已登记的逻辑类型
    pub fn is_registered(logical_name: &str) -> bool {
        TYPE_MAPPING.contains_key(logical_name.to_ascii_lowercase().as_str())
    }

    /// 获取所有已登记的逻辑类型名（按字母排序）
    pub fn logical_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = TYPE_MAPPING.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    #[test]
    fn test_resolve_every_registered_name() {
        let expected = [
            ("integer", "INT"),
            ("int", "INT"),
            ("bigint", "BIGINT"),
            ("decimal", "DECIMAL"),
            ("string", "VARCHAR"),
            ("varchar", "VARCHAR"),
            ("char", "CHAR"),
            ("text", "TEXT"),
            ("longtext", "LONGTEXT"),
            ("date", "DATE"),
            ("datetime", "DATETIME"),
            ("boolean", "TINYINT"),
            ("tinyint", "TINYINT"),
            ("set", "SET"),
            ("enum", "ENUM"),
        ];

        for (logical, native) in expected {
            assert_eq!(TypeRegistry::resolve(logical).unwrap().as_str(), native);
            assert_eq!(TypeRegistry::resolve(&logical.to_uppercase()).unwrap().as_str(), native);
        }
        assert_eq!(TypeRegistry::logical_names().len(), expected.len());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(TypeRegistry::resolve("String").unwrap(), NativeType::Varchar);
        assert_eq!(TypeRegistry::resolve("DateTime").unwrap(), NativeType::DateTime);
        assert!(TypeRegistry::is_registered("BOOLEAN"));
    }

    #[test]
    fn test_unknown_type_fails() {
        for name in ["blob", "json", "", "timestamps", "auto_increment_integer", "integer "] {
            match TypeRegistry::resolve(name) {
                Err(SchemaError::UnknownType { type_name }) => assert_eq!(type_name, name),
                other => panic!("期望 UnknownType，实际为 {:?}", other),
            }
        }
    }

    #[test]
    fn test_pseudo_type_parse() {
        assert_eq!(PseudoType::parse("timestamps"), Some(PseudoType::Timestamps));
        assert_eq!(
            PseudoType::parse("Auto_Increment_Integer"),
            Some(PseudoType::AutoIncrementInteger)
        );
        assert_eq!(PseudoType::parse("integer"), None);
    }
}
