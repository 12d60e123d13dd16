//! 列规则构建
//!
//! 按类型应用默认约束和选项转换，生成规范化的列规则

use crate::error::SchemaResult;
use crate::registry::TypeRegistry;
use crate::types::{ColumnOptions, ColumnRule, Constraint, NativeType};

/// VARCHAR 默认长度
pub const DEFAULT_STRING_LENGTH: u32 = 200;
/// CHAR 默认长度
pub const DEFAULT_CHAR_LENGTH: u32 = 2;
/// DECIMAL 默认精度
pub const DEFAULT_DECIMAL_CONSTRAINT: &str = "10,2";

/// 取值列表规范化（ENUM / SET）
///
/// 约束为取值列表时转换为带引号的逗号分隔字符串，并强制允许为空；
/// 其他约束视为调用方提供的SQL片段，原样保留
pub fn normalize_value_list(mut options: ColumnOptions) -> ColumnOptions {
    if let Some(Constraint::Values(values)) = &options.constraint {
        options.constraint = Some(Constraint::Raw(Constraint::quote_values(values)));
        options.nullable = Some(true);
    }
    options
}

/// 只包含原生类型的规则，选项原样合并
pub fn plain_rule(native_type: NativeType, options: ColumnOptions) -> ColumnRule {
    ColumnRule::new(native_type).merge(options)
}

/// 带默认约束的规则，调用方选项中的约束优先
pub fn constrained_rule(
    native_type: NativeType,
    constraint: Constraint,
    options: ColumnOptions,
) -> ColumnRule {
    ColumnRule::new(native_type)
        .with_constraint(constraint)
        .merge(options)
}

/// DECIMAL 规则，默认有符号
pub fn decimal_rule(constraint: Option<&str>, options: ColumnOptions) -> ColumnRule {
    ColumnRule::new(NativeType::Decimal)
        .with_constraint(constraint.unwrap_or(DEFAULT_DECIMAL_CONSTRAINT))
        .with_unsigned(false)
        .merge(options)
}

/// 无符号自增整数规则
///
/// 选项可以追加其他属性，但 unsigned / auto_increment 始终为 true
pub fn auto_increment_rule(options: ColumnOptions) -> ColumnRule {
    ColumnRule::new(NativeType::Int)
        .merge(options)
        .with_unsigned(true)
        .with_auto_increment(true)
}

/// 取值列表规则（ENUM / SET）
pub fn value_list_rule(native_type: NativeType, options: ColumnOptions) -> ColumnRule {
    ColumnRule::new(native_type).merge(normalize_value_list(options))
}

/// 按逻辑类型名生成规则（追加列 / 通用分发路径）
///
/// `string` 未指定约束时使用默认长度，`enum` / `set` 的取值列表被规范化
pub fn rule_for_type(logical_type: &str, mut options: ColumnOptions) -> SchemaResult<ColumnRule> {
    let native_type = TypeRegistry::resolve(logical_type)?;

    if logical_type.eq_ignore_ascii_case("string") && options.constraint.is_none() {
        options.constraint = Some(Constraint::Length(DEFAULT_STRING_LENGTH));
    } else if native_type.is_value_list() {
        options = normalize_value_list(options);
    }

    Ok(plain_rule(native_type, options))
}

/// 按逻辑类型名生成规则（修改列路径），不应用任何类型默认值
pub fn modify_rule(logical_type: &str, options: ColumnOptions) -> SchemaResult<ColumnRule> {
    let native_type = TypeRegistry::resolve(logical_type)?;
    Ok(plain_rule(native_type, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    #[test]
    fn test_value_list_is_quoted_and_nullable() {
        let rule = value_list_rule(NativeType::Enum, ColumnOptions::new().values(["a", "b"]));
        assert_eq!(rule.constraint, Some(Constraint::Raw("'a','b'".to_string())));
        assert_eq!(rule.nullable, Some(true));
    }

    #[test]
    fn test_value_list_overrides_explicit_not_null() {
        let rule = value_list_rule(
            NativeType::Set,
            ColumnOptions::new().values(["r", "w"]).nullable(false),
        );
        assert_eq!(rule.nullable, Some(true));
    }

    #[test]
    fn test_raw_value_list_passes_through() {
        let rule = value_list_rule(NativeType::Enum, ColumnOptions::new().constraint("'x','y'"));
        assert_eq!(rule.constraint, Some(Constraint::Raw("'x','y'".to_string())));
        assert_eq!(rule.nullable, None);
    }

    #[test]
    fn test_auto_increment_flags_cannot_be_cleared() {
        let rule = auto_increment_rule(
            ColumnOptions::new().unsigned(false).auto_increment(false).extra("comment", "主键"),
        );
        assert_eq!(rule.native_type, NativeType::Int);
        assert!(rule.is_unsigned());
        assert!(rule.is_auto_increment());
        assert!(rule.extra.contains_key("comment"));
    }

    #[test]
    fn test_decimal_defaults() {
        let rule = decimal_rule(None, ColumnOptions::new());
        assert_eq!(rule.constraint, Some(Constraint::Raw("10,2".to_string())));
        assert_eq!(rule.unsigned, Some(false));

        let rule = decimal_rule(Some("8,3"), ColumnOptions::new().unsigned(true));
        assert_eq!(rule.constraint, Some(Constraint::Raw("8,3".to_string())));
        assert_eq!(rule.unsigned, Some(true));
    }

    #[test]
    fn test_rule_for_type_defaults() {
        let rule = rule_for_type("string", ColumnOptions::new()).unwrap();
        assert_eq!(rule.native_type, NativeType::Varchar);
        assert_eq!(rule.constraint, Some(Constraint::Length(200)));

        let rule = rule_for_type("string", ColumnOptions::new().length(32)).unwrap();
        assert_eq!(rule.constraint, Some(Constraint::Length(32)));

        let rule = rule_for_type("ENUM", ColumnOptions::new().values(["on", "off"])).unwrap();
        assert_eq!(rule.constraint, Some(Constraint::Raw("'on','off'".to_string())));
        assert_eq!(rule.nullable, Some(true));

        let rule = rule_for_type("varchar", ColumnOptions::new()).unwrap();
        assert_eq!(rule.constraint, None);
    }

    #[test]
    fn test_modify_rule_applies_no_defaults() {
        let rule = modify_rule("string", ColumnOptions::new()).unwrap();
        assert_eq!(rule.constraint, None);

        let err = modify_rule("jsonb", ColumnOptions::new()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }
}
