//! 表定义模块
//!
//! 提供表定义累加器以及按类型规范化列规则的构建函数

pub mod definition;
pub mod rules;

pub use definition::{CREATED_COLUMN, TableDefinition, UPDATED_COLUMN};
