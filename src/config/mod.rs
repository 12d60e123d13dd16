//! # 配置管理模块
//!
//! 提供表结构会话的配置系统，支持构建器模式和链式配置
//! 构建器要求所有配置项显式设置

pub mod builders;
pub mod core;

// 重新导出所有公共类型
pub use builders::{LoggingConfigBuilder, SchemaConfigBuilder};
pub use self::core::{LogLevel, LoggingConfig, SchemaConfig, init_logging};
