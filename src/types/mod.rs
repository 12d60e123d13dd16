//! 表结构类型定义
//!
//! 定义原生列类型、列规则、列选项以及默认值表示

pub mod column;
pub mod data_value;
pub mod native_type;

// 重新导出所有公共类型
pub use column::{ColumnMetadata, ColumnOptions, ColumnRule, Constraint};
pub use data_value::DataValue;
pub use native_type::NativeType;
