//! 表结构后端模块
//!
//! 定义表结构修改后端的统一接口，DSL本身不执行SQL，
//! 所有DDL与列元数据查询都委托给实现了 `SchemaBackend` 的后端

use crate::error::SchemaResult;
use crate::types::{ColumnMetadata, ColumnRule};
use async_trait::async_trait;
use indexmap::IndexMap;

pub mod ddl;
mod memory;

pub use memory::{BackendCall, MemoryBackend};

/// 表结构后端trait，定义DSL依赖的全部后端操作
///
/// `add_field` / `add_key` / `create_table` 是分阶段的建表协议：
/// 先暂存列与键，再由 `create_table` 一次性提交
#[async_trait]
pub trait SchemaBackend: Send + Sync {
    /// 检查表中是否已存在指定列
    async fn column_exists(&self, table: &str, column: &str) -> SchemaResult<bool>;

    /// 追加列
    ///
    /// `after` 为 `None` 时追加到表末尾
    async fn add_column(
        &self,
        table: &str,
        column: &str,
        rule: &ColumnRule,
        after: Option<&str>,
    ) -> SchemaResult<()>;

    /// 删除列
    async fn drop_column(&self, table: &str, column: &str) -> SchemaResult<()>;

    /// 修改列定义，`rename_to` 不为空时同时重命名
    async fn modify_column(
        &self,
        table: &str,
        column: &str,
        rule: &ColumnRule,
        rename_to: Option<&str>,
    ) -> SchemaResult<()>;

    /// 读取表的全部列元数据
    async fn list_columns(&self, table: &str) -> SchemaResult<Vec<ColumnMetadata>>;

    /// 暂存建表用的列定义
    async fn add_field(&self, columns: &IndexMap<String, ColumnRule>) -> SchemaResult<()>;

    /// 暂存建表用的键定义
    async fn add_key(&self, column: &str, primary: bool) -> SchemaResult<()>;

    /// 使用暂存的列与键创建表
    async fn create_table(&self, table: &str, if_not_exists: bool) -> SchemaResult<()>;
}
