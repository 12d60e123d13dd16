//! 表定义累加器
//!
//! 按声明顺序收集一张表的列规则与键定义，在需要时一次性提交给后端

use crate::adapter::SchemaBackend;
use crate::error::SchemaResult;
use crate::registry::{PseudoType, TypeRegistry};
use crate::table::rules;
use crate::types::{ColumnOptions, ColumnRule, Constraint, NativeType};
use indexmap::IndexMap;
use rat_logger::{debug, info};
use serde::{Deserialize, Serialize};

/// 时间戳伪类型展开的列名
pub const CREATED_COLUMN: &str = "created";
pub const UPDATED_COLUMN: &str = "updated";

/// 表定义
///
/// 列的插入顺序即DDL中的列顺序；重复定义同名列时保留原位置并替换规则。
/// `materialize` 按值消费定义，因此同一个定义只能提交一次
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    name: String,
    columns: IndexMap<String, ColumnRule>,
    keys: IndexMap<String, bool>,
}

impl TableDefinition {
    /// 创建空的表定义
    pub fn new(table_name: &str) -> Self {
        Self {
            name: table_name.to_string(),
            columns: IndexMap::new(),
            keys: IndexMap::new(),
        }
    }

    // ---------- 读取 ----------

    /// 当前的列规则（有序）
    pub fn columns(&self) -> &IndexMap<String, ColumnRule> {
        &self.columns
    }

    /// 当前的键定义，值为 true 表示主键
    pub fn keys(&self) -> &IndexMap<String, bool> {
        &self.keys
    }

    /// 表名
    pub fn table_name(&self) -> &str {
        &self.name
    }

    /// 获取单个列规则
    pub fn column_rule(&self, column_name: &str) -> Option<&ColumnRule> {
        self.columns.get(column_name)
    }

    /// 是否已定义指定列
    pub fn has_column(&self, column_name: &str) -> bool {
        self.columns.contains_key(column_name)
    }

    /// 主键列名（按声明顺序）
    pub fn primary_keys(&self) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|(_, primary)| **primary)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// 以JSON形式导出当前定义
    pub fn to_json(&self) -> SchemaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::schema_error!(serialization, format!("表定义序列化失败: {}", e))
        })
    }

    // ---------- 列定义 ----------

    /// 写入列规则，同名列被覆盖
    pub fn add_definition_rule(&mut self, column_name: &str, rule: ColumnRule) -> &mut Self {
        crate::debug_log!("表 {} 定义列 {}: {:?}", self.name, column_name, rule);
        self.columns.insert(column_name.to_string(), rule);
        self
    }

    /// INT 列
    pub fn integer(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::Int, options))
    }

    /// BIGINT 列
    pub fn bigint(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::BigInt, options))
    }

    /// TINYINT 列
    pub fn tinyint(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::TinyInt, options))
    }

    /// DECIMAL 列，默认精度 "10,2"，默认有符号
    pub fn decimal(
        &mut self,
        column_name: &str,
        constraint: Option<&str>,
        options: ColumnOptions,
    ) -> &mut Self {
        self.add_definition_rule(column_name, rules::decimal_rule(constraint, options))
    }

    /// 无符号自增整数列，同时注册为主键
    pub fn auto_increment_integer(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::auto_increment_rule(options));
        self.key(column_name, true)
    }

    /// VARCHAR 列，未指定长度时为 200
    pub fn string(
        &mut self,
        column_name: &str,
        length: Option<u32>,
        options: ColumnOptions,
    ) -> &mut Self {
        let length = length.unwrap_or(rules::DEFAULT_STRING_LENGTH);
        self.add_definition_rule(
            column_name,
            rules::constrained_rule(NativeType::Varchar, Constraint::Length(length), options),
        )
    }

    /// CHAR 列，未指定长度时为 2
    pub fn char(
        &mut self,
        column_name: &str,
        length: Option<u32>,
        options: ColumnOptions,
    ) -> &mut Self {
        let length = length.unwrap_or(rules::DEFAULT_CHAR_LENGTH);
        self.add_definition_rule(
            column_name,
            rules::constrained_rule(NativeType::Char, Constraint::Length(length), options),
        )
    }

    /// TEXT 列
    pub fn text(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::Text, options))
    }

    /// LONGTEXT 列
    pub fn longtext(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::LongText, options))
    }

    /// 布尔列，使用 TINYINT 存储
    pub fn boolean(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::TinyInt, options))
    }

    /// DATE 列
    pub fn date(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::Date, options))
    }

    /// DATETIME 列
    pub fn datetime(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::plain_rule(NativeType::DateTime, options))
    }

    /// created / updated 两个 DATETIME 列，共用同一组选项
    pub fn timestamps(&mut self, options: ColumnOptions) -> &mut Self {
        self.datetime(CREATED_COLUMN, options.clone());
        self.datetime(UPDATED_COLUMN, options)
    }

    /// ENUM 列
    ///
    /// 取值列表会被转换为带引号的字符串，并且该列被强制允许为空
    pub fn r#enum(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::value_list_rule(NativeType::Enum, options))
    }

    /// `r#enum` 的别名，调用处无需原始标识符
    pub fn enumeration(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.r#enum(column_name, options)
    }

    /// SET 列，取值列表处理同 `r#enum`
    pub fn set(&mut self, column_name: &str, options: ColumnOptions) -> &mut Self {
        self.add_definition_rule(column_name, rules::value_list_rule(NativeType::Set, options))
    }

    /// 按逻辑类型名定义列
    ///
    /// 支持注册表中的全部类型以及 `auto_increment_integer` / `timestamps` 伪类型，
    /// 未知类型返回 `UnknownType` 且不修改定义
    pub fn column(
        &mut self,
        column_name: &str,
        logical_type: &str,
        options: ColumnOptions,
    ) -> SchemaResult<&mut Self> {
        match PseudoType::parse(logical_type) {
            Some(PseudoType::AutoIncrementInteger) => {
                Ok(self.auto_increment_integer(column_name, options))
            }
            Some(PseudoType::Timestamps) => Ok(self.timestamps(options)),
            None => {
                let rule = match TypeRegistry::resolve(logical_type)? {
                    NativeType::Decimal => rules::decimal_rule(None, options),
                    NativeType::Char if options.constraint.is_none() => rules::constrained_rule(
                        NativeType::Char,
                        Constraint::Length(rules::DEFAULT_CHAR_LENGTH),
                        options,
                    ),
                    _ => rules::rule_for_type(logical_type, options)?,
                };
                Ok(self.add_definition_rule(column_name, rule))
            }
        }
    }

    // ---------- 键 ----------

    /// 注册或覆盖键定义，不检查列是否存在
    pub fn key(&mut self, column_name: &str, primary: bool) -> &mut Self {
        self.keys.insert(column_name.to_string(), primary);
        self
    }

    /// 注册主键
    pub fn primary_key(&mut self, column_name: &str) -> &mut Self {
        self.key(column_name, true)
    }

    // ---------- 提交 ----------

    /// 把定义提交给后端建表
    ///
    /// 依次暂存全部列、逐个暂存键，最后发起建表。各步骤之间不是事务性的，
    /// 中途失败时之前的步骤已经生效
    pub async fn materialize(
        self,
        backend: &dyn SchemaBackend,
        if_not_exists: bool,
    ) -> SchemaResult<()> {
        info!(
            "提交表定义: 表={}, 列数={}, 键数={}, if_not_exists={}",
            self.name,
            self.columns.len(),
            self.keys.len(),
            if_not_exists
        );

        backend.add_field(&self.columns).await?;

        for (column, primary) in &self.keys {
            backend.add_key(column, *primary).await?;
        }

        backend.create_table(&self.name, if_not_exists).await?;

        debug!("表 {} 创建完成", self.name);
        Ok(())
    }
}
