//! # 表结构会话配置构建器模块
//!
//! 所有配置项必须显式设置，构建时统一校验

use crate::config::core::{LoggingConfig, SchemaConfig};
use crate::error::SchemaError;
use rat_logger::info;

/// 支持的错误消息语言
const SUPPORTED_LANGUAGES: [&str; 3] = ["zh-CN", "en-US", "ja-JP"];

/// 表结构会话配置构建器
#[derive(Debug)]
pub struct SchemaConfigBuilder {
    if_not_exists: Option<bool>,
    language: Option<String>,
    logging: Option<LoggingConfig>,
}
impl SchemaConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            if_not_exists: None,
            language: None,
            logging: None,
        }
    }

    /// 设置建表时默认是否带 IF NOT EXISTS
    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    /// 设置错误消息语言
    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// 设置日志配置
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 构建配置
    ///
    /// # 错误
    ///
    /// 任何配置项未设置或语言不受支持时返回错误
    pub fn build(self) -> Result<SchemaConfig, SchemaError> {
        let if_not_exists = self.if_not_exists.ok_or_else(|| {
            crate::schema_error!(config, "if_not_exists 必须设置")
        })?;

        let language = self.language.ok_or_else(|| {
            crate::schema_error!(config, "错误消息语言必须设置")
        })?;

        if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            return Err(crate::schema_error!(
                config,
                format!("不支持的语言: {}，可选值: {:?}", language, SUPPORTED_LANGUAGES)
            ));
        }

        let logging = self.logging.ok_or_else(|| {
            crate::schema_error!(config, "日志配置必须设置")
        })?;

        info!("创建表结构会话配置: if_not_exists={}, 语言={}", if_not_exists, language);

        Ok(SchemaConfig {
            if_not_exists,
            language,
            logging,
        })
    }
}
impl Default for SchemaConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::core::LogLevel;

    #[test]
    fn test_builder_requires_every_field() {
        let err = SchemaConfigBuilder::new().if_not_exists(true).build().unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError { .. }));

        let err = LoggingConfig::builder().level(LogLevel::Info).build().unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError { .. }));
    }

    #[test]
    fn test_builder_validates_language() {
        let logging = LoggingConfig::builder()
            .level(LogLevel::Warn)
            .console(false)
            .build()
            .unwrap();

        let err = SchemaConfig::builder()
            .if_not_exists(true)
            .language("fr-FR")
            .logging(logging.clone())
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError { .. }));

        let config = SchemaConfig::builder()
            .if_not_exists(false)
            .language("en-US")
            .logging(logging)
            .build()
            .unwrap();
        assert!(!config.if_not_exists);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }
}
