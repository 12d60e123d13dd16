//! # 配置管理模块 - 核心配置类型
//!
//! 提供表结构会话的配置类型，支持从TOML/JSON文件加载

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use rat_logger::info;

/// 表结构会话配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// `create_table` 默认是否带 IF NOT EXISTS
    pub if_not_exists: bool,
    /// 错误消息语言，例如 zh-CN / en-US / ja-JP
    pub language: String,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 是否输出到控制台
    pub console: bool,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 错误级别
    Error,
    /// 警告级别
    Warn,
    /// 信息级别
    Info,
    /// 调试级别
    Debug,
    /// 跟踪级别
    Trace,
}

impl LogLevel {
    /// 转换为 rat_logger 的级别过滤器
    pub fn to_level_filter(self) -> rat_logger::LevelFilter {
        match self {
            LogLevel::Error => rat_logger::LevelFilter::Error,
            LogLevel::Warn => rat_logger::LevelFilter::Warn,
            LogLevel::Info => rat_logger::LevelFilter::Info,
            LogLevel::Debug => rat_logger::LevelFilter::Debug,
            LogLevel::Trace => rat_logger::LevelFilter::Trace,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            if_not_exists: true,
            language: "zh-CN".to_string(),
            logging: LoggingConfig {
                level: LogLevel::Info,
                console: true,
            },
        }
    }
}

impl SchemaConfig {
    /// 创建配置构建器
    pub fn builder() -> super::builders::SchemaConfigBuilder {
        super::builders::SchemaConfigBuilder::new()
    }

    /// 从配置文件加载配置
    ///
    /// 扩展名为 `toml` 时按TOML解析，否则按JSON解析
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn from_file<P: AsRef<std::path::Path>>(config_path: P) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(config_path.as_ref())?;

        let config: SchemaConfig = if config_path.as_ref().extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&content)
                .map_err(|e| crate::schema_error!(config, format!("解析TOML配置文件失败: {}", e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| crate::schema_error!(config, format!("解析JSON配置文件失败: {}", e)))?
        };

        info!("从文件加载配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    /// 保存配置到文件
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, config_path: P) -> Result<(), SchemaError> {
        let content = if config_path.as_ref().extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::to_string_pretty(self)
                .map_err(|e| crate::schema_error!(config, format!("序列化TOML配置失败: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| crate::schema_error!(config, format!("序列化JSON配置失败: {}", e)))?
        };

        std::fs::write(config_path.as_ref(), content)?;

        info!("保存配置到文件: {:?}", config_path.as_ref());
        Ok(())
    }
}

impl LoggingConfig {
    /// 创建日志配置构建器
    pub fn builder() -> super::builders::LoggingConfigBuilder {
        super::builders::LoggingConfigBuilder::new()
    }
}

/// 按日志配置初始化 rat_logger
///
/// 库本身不会自动初始化日志，由调用者在启动时决定是否调用
pub fn init_logging(config: &LoggingConfig) -> Result<(), SchemaError> {
    use rat_logger::{LoggerBuilder, handler::term::TermConfig};

    let mut builder = LoggerBuilder::new().with_level(config.level.to_level_filter());
    if config.console {
        builder = builder.add_terminal_with_config(TermConfig::default());
    }

    builder
        .init_global_logger()
        .map_err(|e| crate::schema_error!(config, format!("日志初始化失败: {}", e)))?;

    info!("日志系统初始化完成: 级别={:?}", config.level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(config.if_not_exists);
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");

        let config = SchemaConfig {
            if_not_exists: false,
            language: "en-US".to_string(),
            logging: LoggingConfig {
                level: LogLevel::Debug,
                console: false,
            },
        };
        config.save_to_file(&path).unwrap();

        let loaded = SchemaConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_init_logging_installs_global_logger_once() {
        let config = LoggingConfig {
            level: LogLevel::Warn,
            console: true,
        };
        let _ = init_logging(&config);

        // 全局日志器只能安装一次，重复初始化报告为配置错误
        assert!(matches!(
            init_logging(&config),
            Err(SchemaError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_json_file_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"if_not_exists": true, "language": "ja-JP", "logging": {"level": "Warn", "console": true}}"#,
        )
        .unwrap();

        let loaded = SchemaConfig::from_file(&path).unwrap();
        assert_eq!(loaded.language, "ja-JP");
        assert_eq!(loaded.logging.level, LogLevel::Warn);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            SchemaConfig::from_file(&path),
            Err(SchemaError::ConfigError { .. })
        ));
        assert!(matches!(
            SchemaConfig::from_file(dir.path().join("missing.toml")),
            Err(SchemaError::IoError(_))
        ));
    }
}
