//! rat_schema - 表达式风格的表结构定义DSL
//!
//! 把 "长度200的字符串列"、"自增主键"、"固定取值的枚举" 这类声明式词汇
//! 规范化为与数据库无关的列/键规则，再交给底层表结构后端执行DDL

// 导出所有公共模块
pub mod error;
pub mod types;
pub mod registry;
pub mod table;
pub mod adapter;
pub mod schema;
pub mod config;
pub mod i18n;

// 重新导出常用类型和函数
pub use error::{SchemaError, SchemaResult};
pub use types::*;
pub use registry::{PseudoType, TypeRegistry};
pub use table::{TableDefinition, CREATED_COLUMN, UPDATED_COLUMN};
pub use adapter::{BackendCall, MemoryBackend, SchemaBackend};
pub use schema::Schema;
pub use config::{
    LogLevel, LoggingConfig, LoggingConfigBuilder, SchemaConfig, SchemaConfigBuilder,
    init_logging,
};

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_schema库
///
/// 注册多语言错误消息并按环境变量选择语言
///
/// 注意：日志系统由调用者自行初始化，本库不会自动初始化日志
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 按会话配置初始化rat_schema库
///
/// 注册多语言错误消息，并使用配置中的语言覆盖环境变量
pub fn init_with_config(config: &SchemaConfig) {
    i18n::ErrorMessageI18n::init();
    i18n::set_language(&config.language);
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
