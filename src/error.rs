//! 错误处理模块
//!
//! 定义表结构DSL的统一错误类型，后端错误原样向上传递

use thiserror::Error;

/// 表结构操作错误
#[derive(Error, Debug)]
pub enum SchemaError {
    /// 未知的逻辑列类型
    #[error("未知的列类型: {type_name}")]
    UnknownType { type_name: String },

    /// 后端（DDL执行器/元数据查询）返回的错误
    #[error("后端操作失败: {message}")]
    Backend { message: String },

    /// 列在当前表元数据中不存在
    #[error("表 '{table}' 中不存在列 '{column}'")]
    ColumnNotFound { table: String, column: String },

    /// 配置错误
    #[error("配置错误: {message}")]
    ConfigError { message: String },

    /// 序列化错误
    #[error("序列化失败: {message}")]
    SerializationError { message: String },

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 表结构操作结果类型
pub type SchemaResult<T> = Result<T, SchemaError>;

impl SchemaError {
    /// 是否为后端错误
    ///
    /// 后端错误意味着表结构可能已被部分修改，调用方应重新读取列信息后再重试
    pub fn is_backend(&self) -> bool {
        matches!(self, SchemaError::Backend { .. })
    }

    /// 获取当前语言下的错误消息
    pub fn localized_message(&self) -> String {
        use crate::i18n::{t, tf};

        match self {
            SchemaError::UnknownType { type_name } => {
                tf("error.unknown_type", &[("type_name", type_name.as_str())])
            }
            SchemaError::Backend { message } => {
                tf("error.backend", &[("message", message.as_str())])
            }
            SchemaError::ColumnNotFound { table, column } => tf(
                "error.column_not_found",
                &[("table", table.as_str()), ("column", column.as_str())],
            ),
            SchemaError::ConfigError { message } => {
                tf("error.config", &[("message", message.as_str())])
            }
            SchemaError::SerializationError { message } => {
                tf("error.serialization", &[("message", message.as_str())])
            }
            SchemaError::IoError(e) => tf("error.io", &[("message", e.to_string().as_str())]),
            SchemaError::Other(e) => {
                let detail = e.to_string();
                if detail.is_empty() {
                    t("error.other")
                } else {
                    detail
                }
            }
        }
    }
}

/// 快速构建常用错误
///
/// ```
/// let err = rat_schema::schema_error!(backend, "连接已断开");
/// assert!(err.is_backend());
/// ```
#[macro_export]
macro_rules! schema_error {
    (unknown_type, $name:expr) => {
        $crate::error::SchemaError::UnknownType {
            type_name: ($name).to_string(),
        }
    };
    (backend, $msg:expr) => {
        $crate::error::SchemaError::Backend {
            message: ($msg).to_string(),
        }
    };
    (column_not_found, $table:expr, $column:expr) => {
        $crate::error::SchemaError::ColumnNotFound {
            table: ($table).to_string(),
            column: ($column).to_string(),
        }
    };
    (config, $msg:expr) => {
        $crate::error::SchemaError::ConfigError {
            message: ($msg).to_string(),
        }
    };
    (serialization, $msg:expr) => {
        $crate::error::SchemaError::SerializationError {
            message: ($msg).to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_macro_variants() {
        let err = crate::schema_error!(unknown_type, "blob");
        assert!(matches!(err, SchemaError::UnknownType { ref type_name } if type_name == "blob"));
        assert!(!err.is_backend());

        let err = crate::schema_error!(backend, "语法错误");
        assert!(err.is_backend());
        assert_eq!(err.to_string(), "后端操作失败: 语法错误");

        let err = crate::schema_error!(column_not_found, "users", "nick");
        assert_eq!(err.to_string(), "表 'users' 中不存在列 'nick'");
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: SchemaError = anyhow::anyhow!("驱动内部错误").into();
        assert!(matches!(err, SchemaError::Other(_)));
        assert_eq!(err.to_string(), "驱动内部错误");
    }
}
