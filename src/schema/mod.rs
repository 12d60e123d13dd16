//! 表结构门面模块
//!
//! 提供建表、追加列、删除列、重命名列、修改列等入口。
//! 后端在创建会话时显式注入，门面本身不持有任何全局连接

use crate::adapter::SchemaBackend;
use crate::config::SchemaConfig;
use crate::error::SchemaResult;
use crate::registry::PseudoType;
use crate::table::{CREATED_COLUMN, TableDefinition, UPDATED_COLUMN, rules};
use crate::types::{ColumnOptions, ColumnRule, NativeType};
use rat_logger::{debug, info, warn};
use std::sync::Arc;

/// 表结构会话
///
/// 每个会话持有一个后端，所有操作按顺序执行完毕后才返回，
/// 不做事务包装，多步操作中途失败时之前的步骤保持生效
#[derive(Clone)]
pub struct Schema {
    backend: Arc<dyn SchemaBackend>,
    config: SchemaConfig,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Schema {
    /// 使用默认配置创建会话
    pub fn new(backend: Arc<dyn SchemaBackend>) -> Self {
        Self::with_config(backend, SchemaConfig::default())
    }

    /// 使用指定配置创建会话
    pub fn with_config(backend: Arc<dyn SchemaBackend>, config: SchemaConfig) -> Self {
        info!("创建表结构会话: if_not_exists={}", config.if_not_exists);
        Self { backend, config }
    }

    /// 会话使用的后端
    pub fn backend(&self) -> &dyn SchemaBackend {
        self.backend.as_ref()
    }

    /// 会话配置
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// 返回一个尚未提交的空表定义，由调用方自行构建并提交
    pub fn define_table(&self, table_name: &str) -> TableDefinition {
        TableDefinition::new(table_name)
    }

    /// 提交调用方自行构建的表定义
    pub async fn materialize(
        &self,
        definition: TableDefinition,
        if_not_exists: bool,
    ) -> SchemaResult<()> {
        definition.materialize(self.backend(), if_not_exists).await
    }

    /// 建表，IF NOT EXISTS 取自会话配置
    ///
    /// `configure` 在当前调用栈上同步执行，执行完毕后立即提交定义
    pub async fn create_table<F>(&self, table_name: &str, configure: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut TableDefinition),
    {
        self.create_table_with(table_name, self.config.if_not_exists, configure)
            .await
    }

    /// 建表，显式指定是否带 IF NOT EXISTS
    pub async fn create_table_with<F>(
        &self,
        table_name: &str,
        if_not_exists: bool,
        configure: F,
    ) -> SchemaResult<()>
    where
        F: FnOnce(&mut TableDefinition),
    {
        let mut definition = TableDefinition::new(table_name);
        configure(&mut definition);
        definition.materialize(self.backend(), if_not_exists).await
    }

    /// 追加列
    ///
    /// 同名列已存在时不做任何修改。`after_column` 为空字符串时使用
    /// `options.after`，两者都没有时追加到表末尾。
    /// `timestamps` 伪类型展开为 created / updated 两次追加
    pub async fn add_column(
        &self,
        table: &str,
        column_name: &str,
        logical_type: &str,
        options: ColumnOptions,
        after_column: &str,
    ) -> SchemaResult<()> {
        let rule = match PseudoType::parse(logical_type) {
            Some(PseudoType::Timestamps) => {
                for name in [CREATED_COLUMN, UPDATED_COLUMN] {
                    let rule = rules::plain_rule(NativeType::DateTime, ColumnOptions::new());
                    self.add_column_if_missing(table, name, rule, None).await?;
                }
                return Ok(());
            }
            Some(PseudoType::AutoIncrementInteger) => rules::auto_increment_rule(options),
            None => rules::rule_for_type(logical_type, options)?,
        };

        let after = if after_column.is_empty() {
            rule.after.clone()
        } else {
            Some(after_column.to_string())
        };

        self.add_column_if_missing(table, column_name, rule, after.as_deref())
            .await
    }

    async fn add_column_if_missing(
        &self,
        table: &str,
        column_name: &str,
        rule: ColumnRule,
        after: Option<&str>,
    ) -> SchemaResult<()> {
        if self.backend.column_exists(table, column_name).await? {
            // 只追加新列，已存在的列保持原样
            warn!("列已存在，跳过追加: 表={}, 列={}", table, column_name);
            return Ok(());
        }

        info!(
            "追加列: 表={}, 列={}, 类型={}, 位置={:?}",
            table, column_name, rule.native_type, after
        );
        self.backend.add_column(table, column_name, &rule, after).await
    }

    /// 删除列，不检查列是否存在
    pub async fn remove_column(&self, table: &str, column_name: &str) -> SchemaResult<()> {
        info!("删除列: 表={}, 列={}", table, column_name);
        self.backend.drop_column(table, column_name).await
    }

    /// 重命名列
    ///
    /// 先读取当前列元数据，用原有类型字符串原样重建规则，只改名不改类型
    pub async fn rename_column(
        &self,
        table: &str,
        column_name: &str,
        new_name: &str,
    ) -> SchemaResult<()> {
        let columns = self.backend.list_columns(table).await?;
        let current = columns
            .iter()
            .find(|meta| meta.name == column_name)
            .ok_or_else(|| crate::schema_error!(column_not_found, table, column_name))?;

        debug!(
            "重命名列读取到原类型: 表={}, 列={}, 类型={}",
            table, column_name, current.native_type
        );

        let rule = ColumnRule::new(NativeType::from_token(&current.native_type));
        info!("重命名列: 表={}, {} -> {}", table, column_name, new_name);
        self.backend
            .modify_column(table, column_name, &rule, Some(new_name))
            .await
    }

    /// 修改列定义，不检查列是否存在
    pub async fn modify_column(
        &self,
        table: &str,
        column_name: &str,
        logical_type: &str,
        options: ColumnOptions,
    ) -> SchemaResult<()> {
        let rule = rules::modify_rule(logical_type, options)?;
        info!(
            "修改列: 表={}, 列={}, 类型={}",
            table, column_name, rule.native_type
        );
        self.backend
            .modify_column(table, column_name, &rule, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{BackendCall, MemoryBackend};
    use crate::error::SchemaError;
    use crate::types::Constraint;

    fn session() -> (Arc<MemoryBackend>, Schema) {
        let backend = Arc::new(MemoryBackend::new().with_table(
            "users",
            vec![
                ("id".to_string(), rules::auto_increment_rule(ColumnOptions::new())),
                ("email".to_string(), ColumnRule::new(NativeType::Varchar).with_constraint(200u32)),
            ],
        ));
        let schema = Schema::new(backend.clone());
        (backend, schema)
    }

    #[tokio::test]
    async fn test_add_column_is_idempotent() {
        let (backend, schema) = session();

        schema
            .add_column("users", "name", "string", ColumnOptions::new(), "")
            .await
            .unwrap();
        schema
            .add_column("users", "name", "string", ColumnOptions::new(), "")
            .await
            .unwrap();

        assert_eq!(backend.add_column_calls(), 1);
        let columns = backend.table_columns("users").unwrap();
        assert_eq!(columns["name"].constraint, Some(Constraint::Length(200)));
    }

    #[tokio::test]
    async fn test_add_column_position_hint() {
        let (backend, schema) = session();

        schema
            .add_column("users", "nick", "varchar", ColumnOptions::new().length(32), "id")
            .await
            .unwrap();
        schema
            .add_column("users", "age", "integer", ColumnOptions::new().after("nick"), "")
            .await
            .unwrap();

        assert_eq!(backend.column_names("users"), vec!["id", "nick", "age", "email"]);
    }

    #[tokio::test]
    async fn test_add_column_unknown_type_touches_nothing() {
        let (backend, schema) = session();

        let err = schema
            .add_column("users", "avatar", "blob", ColumnOptions::new(), "")
            .await
            .unwrap_err();

        assert!(matches!(err, SchemaError::UnknownType { .. }));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_column_pseudo_types() {
        let (backend, schema) = session();

        schema
            .add_column("users", "", "timestamps", ColumnOptions::new().nullable(true), "")
            .await
            .unwrap();
        schema
            .add_column("users", "seq", "auto_increment_integer", ColumnOptions::new(), "")
            .await
            .unwrap();

        let columns = backend.table_columns("users").unwrap();
        assert_eq!(columns["created"].native_type, NativeType::DateTime);
        assert_eq!(columns["created"].nullable, None);
        assert_eq!(columns["updated"].native_type, NativeType::DateTime);
        assert!(columns["seq"].is_unsigned() && columns["seq"].is_auto_increment());
        assert_eq!(backend.table_keys("users"), Some(vec![]));
        assert_eq!(backend.add_column_calls(), 3);
    }

    #[tokio::test]
    async fn test_remove_and_modify_do_not_check_existence() {
        let (backend, schema) = session();

        let err = schema.remove_column("users", "ghost").await.unwrap_err();
        assert!(err.is_backend());

        let err = schema
            .modify_column("users", "ghost", "text", ColumnOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_backend());

        let calls = backend.calls();
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::ColumnExists { .. })));
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::ListColumns { .. })));
    }

    #[tokio::test]
    async fn test_modify_column() {
        let (backend, schema) = session();

        schema
            .modify_column("users", "email", "string", ColumnOptions::new().length(320).nullable(true))
            .await
            .unwrap();

        let columns = backend.table_columns("users").unwrap();
        assert_eq!(columns["email"].constraint, Some(Constraint::Length(320)));
        assert_eq!(
            backend.statements().last().map(String::as_str),
            Some("ALTER TABLE `users` MODIFY COLUMN `email` VARCHAR(320) NULL")
        );

        let err = schema
            .modify_column("users", "email", "jsonb", ColumnOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[tokio::test]
    async fn test_rename_column_missing_target() {
        let (_backend, schema) = session();

        let err = schema.rename_column("users", "ghost", "spirit").await.unwrap_err();
        assert!(matches!(err, SchemaError::ColumnNotFound { .. }));
    }

    #[tokio::test]
    async fn test_define_table_then_materialize() {
        let (backend, schema) = session();

        let mut definition = schema.define_table("tags");
        definition
            .auto_increment_integer("id", ColumnOptions::new())
            .string("label", Some(64), ColumnOptions::new());
        assert!(!backend.has_table("tags"));

        schema.materialize(definition, false).await.unwrap();
        assert_eq!(backend.column_names("tags"), vec!["id", "label"]);
    }
}
