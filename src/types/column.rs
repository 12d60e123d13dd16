//! 列规则与列选项定义

use crate::types::{DataValue, NativeType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 列约束：长度、精度或取值列表
///
/// 序列化形式与调用方书写的选项一致：`50`、`"10,2"`、`["a", "b"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    /// 长度，例如 VARCHAR(200)
    Length(u32),
    /// 调用方提供的取值列表，尚未被规范化
    Values(Vec<String>),
    /// 原样输出的约束片段，例如 "10,2" 或 "'a','b'"
    Raw(String),
}

impl Constraint {
    /// 把取值列表转换为带引号、逗号分隔的字符串
    ///
    /// 与生成的DDL保持一致，取值本身不做转义
    pub fn quote_values(values: &[String]) -> String {
        format!("'{}'", values.join("','"))
    }

    /// 渲染为DDL中括号内的内容
    pub fn to_sql(&self) -> String {
        match self {
            Constraint::Length(len) => len.to_string(),
            Constraint::Raw(raw) => raw.clone(),
            Constraint::Values(values) => Self::quote_values(values),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

impl From<u32> for Constraint {
    fn from(value: u32) -> Self {
        Constraint::Length(value)
    }
}

impl From<&str> for Constraint {
    fn from(value: &str) -> Self {
        Constraint::Raw(value.to_string())
    }
}

impl From<String> for Constraint {
    fn from(value: String) -> Self {
        Constraint::Raw(value)
    }
}

impl From<Vec<String>> for Constraint {
    fn from(values: Vec<String>) -> Self {
        Constraint::Values(values)
    }
}

impl From<Vec<&str>> for Constraint {
    fn from(values: Vec<&str>) -> Self {
        Constraint::Values(values.into_iter().map(str::to_string).collect())
    }
}

/// 规范化后的列规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// 原生列类型
    pub native_type: NativeType,
    /// 长度/精度/取值列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
    /// 是否无符号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<bool>,
    /// 是否自增
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
    /// 是否允许为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// 默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DataValue>,
    /// 列位置提示（追加列时放在该列之后）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// 后端自定义的附加属性
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, DataValue>,
}

impl ColumnRule {
    /// 创建只包含原生类型的规则
    pub fn new(native_type: NativeType) -> Self {
        Self {
            native_type,
            constraint: None,
            unsigned: None,
            auto_increment: None,
            nullable: None,
            default: None,
            after: None,
            extra: IndexMap::new(),
        }
    }

    /// 设置约束
    pub fn with_constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// 设置无符号标记
    pub fn with_unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = Some(unsigned);
        self
    }

    /// 设置自增标记
    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }

    /// 合并调用方选项
    ///
    /// 调用方设置过的每一项都覆盖类型默认值，未设置的项保留默认值
    pub fn merge(mut self, options: ColumnOptions) -> Self {
        if let Some(constraint) = options.constraint {
            self.constraint = Some(constraint);
        }
        if let Some(unsigned) = options.unsigned {
            self.unsigned = Some(unsigned);
        }
        if let Some(auto_increment) = options.auto_increment {
            self.auto_increment = Some(auto_increment);
        }
        if let Some(nullable) = options.nullable {
            self.nullable = Some(nullable);
        }
        if let Some(default) = options.default {
            self.default = Some(default);
        }
        if let Some(after) = options.after {
            self.after = Some(after);
        }
        self.extra.extend(options.extra);
        self
    }

    pub fn is_unsigned(&self) -> bool {
        self.unsigned.unwrap_or(false)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment.unwrap_or(false)
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }
}

/// 调用方提供的列选项
///
/// 所有字段默认未设置；只有显式设置的项才会覆盖类型默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptions {
    #[serde(default)]
    pub constraint: Option<Constraint>,
    #[serde(default, rename = "null")]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub default: Option<DataValue>,
    #[serde(default)]
    pub unsigned: Option<bool>,
    #[serde(default)]
    pub auto_increment: Option<bool>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub extra: IndexMap<String, DataValue>,
}

impl ColumnOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置约束
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// 设置长度约束
    pub fn length(mut self, length: u32) -> Self {
        self.constraint = Some(Constraint::Length(length));
        self
    }

    /// 设置取值列表（用于 ENUM / SET）
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraint = Some(Constraint::Values(values.into_iter().map(Into::into).collect()));
        self
    }

    /// 设置是否允许为空
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// 设置默认值
    pub fn default_value(mut self, value: impl Into<DataValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 设置是否无符号
    pub fn unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = Some(unsigned);
        self
    }

    /// 设置是否自增
    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }

    /// 设置列位置提示
    pub fn after(mut self, column: &str) -> Self {
        self.after = Some(column.to_string());
        self
    }

    /// 设置附加属性
    pub fn extra(mut self, key: &str, value: impl Into<DataValue>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// 后端报告的列元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// 列名
    pub name: String,
    /// 原生类型字符串，保持后端报告的原样
    pub native_type: String,
}

impl ColumnMetadata {
    pub fn new(name: &str, native_type: &str) -> Self {
        Self {
            name: name.to_string(),
            native_type: native_type.to_string(),
        }
    }
}
