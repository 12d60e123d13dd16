//! 内存表结构后端
//!
//! 在内存中维护表目录，按 MySQL 语义执行列操作，并记录每条生成的DDL语句。
//! 用于测试、演示以及不连接数据库的试运行

use super::{SchemaBackend, ddl};
use crate::error::SchemaResult;
use crate::i18n::tf;
use crate::types::{ColumnMetadata, ColumnRule};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use rat_logger::debug;
use std::collections::HashSet;

/// 后端调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    ColumnExists { table: String, column: String },
    AddColumn { table: String, column: String, after: Option<String> },
    DropColumn { table: String, column: String },
    ModifyColumn { table: String, column: String, rename_to: Option<String> },
    ListColumns { table: String },
    AddField { columns: Vec<String> },
    AddKey { column: String, primary: bool },
    CreateTable { table: String, if_not_exists: bool },
}

/// 内存中的一张表
#[derive(Debug, Clone, Default)]
struct MemoryTable {
    columns: IndexMap<String, ColumnRule>,
    keys: Vec<(String, bool)>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: IndexMap<String, MemoryTable>,
    staged_fields: IndexMap<String, ColumnRule>,
    staged_keys: Vec<(String, bool)>,
    statements: Vec<String>,
    calls: Vec<BackendCall>,
    failing_columns: HashSet<String>,
}

/// 内存表结构后端
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

fn backend_error(key: &str, args: &[(&str, &str)]) -> crate::error::SchemaError {
    crate::schema_error!(backend, tf(key, args))
}

impl MemoryState {
    fn table_mut(&mut self, table: &str) -> SchemaResult<&mut MemoryTable> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| backend_error("error.table_not_found", &[("table", table)]))
    }

    fn check_failure(&self, column: &str) -> SchemaResult<()> {
        if self.failing_columns.contains(column) {
            return Err(backend_error("error.injected_failure", &[("column", column)]));
        }
        Ok(())
    }
}

impl MemoryBackend {
    /// 创建空的内存后端
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一张已存在的表（不生成DDL记录）
    ///
    /// 列类型可以使用 `NativeType::Custom` 模拟数据库报告的任意类型字符串
    pub fn with_table<I>(self, table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = (String, ColumnRule)>,
    {
        {
            let mut state = self.state.lock();
            state.tables.insert(
                table.to_string(),
                MemoryTable {
                    columns: columns.into_iter().collect(),
                    keys: Vec::new(),
                },
            );
        }
        self
    }

    /// 让涉及指定列的变更操作返回后端错误
    pub fn fail_on_column(&self, column: &str) {
        self.state.lock().failing_columns.insert(column.to_string());
    }

    /// 取消指定列的失败设置
    pub fn clear_failure(&self, column: &str) {
        self.state.lock().failing_columns.remove(column);
    }

    /// 已执行的DDL语句
    pub fn statements(&self) -> Vec<String> {
        self.state.lock().statements.clone()
    }

    /// 全部调用记录
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    /// 追加列调用次数
    pub fn add_column_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, BackendCall::AddColumn { .. }))
            .count()
    }

    /// 表是否存在
    pub fn has_table(&self, table: &str) -> bool {
        self.state.lock().tables.contains_key(table)
    }

    /// 表的列定义快照
    pub fn table_columns(&self, table: &str) -> Option<IndexMap<String, ColumnRule>> {
        self.state.lock().tables.get(table).map(|t| t.columns.clone())
    }

    /// 表的键定义快照
    pub fn table_keys(&self, table: &str) -> Option<Vec<(String, bool)>> {
        self.state.lock().tables.get(table).map(|t| t.keys.clone())
    }

    /// 表的列名（按列顺序）
    pub fn column_names(&self, table: &str) -> Vec<String> {
        self.state
            .lock()
            .tables
            .get(table)
            .map(|t| t.columns.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SchemaBackend for MemoryBackend {
    async fn column_exists(&self, table: &str, column: &str) -> SchemaResult<bool> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::ColumnExists {
            table: table.to_string(),
            column: column.to_string(),
        });

        Ok(state
            .tables
            .get(table)
            .is_some_and(|t| t.columns.contains_key(column)))
    }

    async fn add_column(
        &self,
        table: &str,
        column: &str,
        rule: &ColumnRule,
        after: Option<&str>,
    ) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::AddColumn {
            table: table.to_string(),
            column: column.to_string(),
            after: after.map(str::to_string),
        });
        state.check_failure(column)?;

        let target = state.table_mut(table)?;
        if target.columns.contains_key(column) {
            return Err(backend_error(
                "error.column_duplicate",
                &[("table", table), ("column", column)],
            ));
        }

        match after {
            Some(anchor) => {
                let index = target.columns.get_index_of(anchor).ok_or_else(|| {
                    backend_error(
                        "error.column_not_found",
                        &[("table", table), ("column", anchor)],
                    )
                })?;
                target.columns.shift_insert(index + 1, column.to_string(), rule.clone());
            }
            None => {
                target.columns.insert(column.to_string(), rule.clone());
            }
        }

        let sql = ddl::add_column(table, column, rule, after);
        debug!("执行追加列SQL: {}", sql);
        state.statements.push(sql);
        Ok(())
    }

    async fn drop_column(&self, table: &str, column: &str) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::DropColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
        state.check_failure(column)?;

        let target = state.table_mut(table)?;
        if target.columns.shift_remove(column).is_none() {
            return Err(backend_error(
                "error.column_not_found",
                &[("table", table), ("column", column)],
            ));
        }
        target.keys.retain(|(key, _)| key != column);

        let sql = ddl::drop_column(table, column);
        debug!("执行删除列SQL: {}", sql);
        state.statements.push(sql);
        Ok(())
    }

    async fn modify_column(
        &self,
        table: &str,
        column: &str,
        rule: &ColumnRule,
        rename_to: Option<&str>,
    ) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::ModifyColumn {
            table: table.to_string(),
            column: column.to_string(),
            rename_to: rename_to.map(str::to_string),
        });
        state.check_failure(column)?;
        if let Some(new_name) = rename_to {
            state.check_failure(new_name)?;
        }

        let target = state.table_mut(table)?;
        let index = target.columns.get_index_of(column).ok_or_else(|| {
            backend_error("error.column_not_found", &[("table", table), ("column", column)])
        })?;

        match rename_to {
            Some(new_name) if new_name != column => {
                if target.columns.contains_key(new_name) {
                    return Err(backend_error(
                        "error.column_duplicate",
                        &[("table", table), ("column", new_name)],
                    ));
                }
                target.columns.shift_remove(column);
                target.columns.shift_insert(index, new_name.to_string(), rule.clone());
                for (key, _) in target.keys.iter_mut() {
                    if key == column {
                        *key = new_name.to_string();
                    }
                }
            }
            _ => {
                target.columns.insert(column.to_string(), rule.clone());
            }
        }

        let sql = ddl::modify_column(table, column, rule, rename_to);
        debug!("执行修改列SQL: {}", sql);
        state.statements.push(sql);
        Ok(())
    }

    async fn list_columns(&self, table: &str) -> SchemaResult<Vec<ColumnMetadata>> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::ListColumns {
            table: table.to_string(),
        });

        let target = state.table_mut(table)?;
        Ok(target
            .columns
            .iter()
            .map(|(name, rule)| ColumnMetadata::new(name, rule.native_type.as_str()))
            .collect())
    }

    async fn add_field(&self, columns: &IndexMap<String, ColumnRule>) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::AddField {
            columns: columns.keys().cloned().collect(),
        });

        for (name, rule) in columns {
            state.staged_fields.insert(name.clone(), rule.clone());
        }
        Ok(())
    }

    async fn add_key(&self, column: &str, primary: bool) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::AddKey {
            column: column.to_string(),
            primary,
        });

        state.staged_keys.push((column.to_string(), primary));
        Ok(())
    }

    async fn create_table(&self, table: &str, if_not_exists: bool) -> SchemaResult<()> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::CreateTable {
            table: table.to_string(),
            if_not_exists,
        });

        // 无论成功与否，暂存区都在本次提交后清空
        let columns = std::mem::take(&mut state.staged_fields);
        let keys = std::mem::take(&mut state.staged_keys);

        if columns.is_empty() {
            return Err(backend_error("error.table_no_columns", &[("table", table)]));
        }

        if state.tables.contains_key(table) {
            if !if_not_exists {
                return Err(backend_error("error.table_exists", &[("table", table)]));
            }
            debug!("表 {} 已存在，跳过创建", table);
        } else {
            state.tables.insert(
                table.to_string(),
                MemoryTable {
                    columns: columns.clone(),
                    keys: keys.clone(),
                },
            );
        }

        let sql = ddl::create_table(table, &columns, &keys, if_not_exists);
        debug!("执行建表SQL: {}", sql);
        state.statements.push(sql);
        Ok(())
    }
}
