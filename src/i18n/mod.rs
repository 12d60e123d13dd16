//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use std::collections::HashMap;
use rat_embed_lang::register_translations;

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 未知列类型
        let mut unknown_type_errors = HashMap::new();
        unknown_type_errors.insert("zh-CN".to_string(), "未知的列类型: {type_name}".to_string());
        unknown_type_errors.insert("en-US".to_string(), "Unknown column type: {type_name}".to_string());
        unknown_type_errors.insert("ja-JP".to_string(), "不明なカラム型: {type_name}".to_string());
        translations.insert("error.unknown_type".to_string(), unknown_type_errors);

        // 后端错误
        let mut backend_errors = HashMap::new();
        backend_errors.insert("zh-CN".to_string(), "后端操作失败: {message}".to_string());
        backend_errors.insert("en-US".to_string(), "Schema backend operation failed: {message}".to_string());
        backend_errors.insert("ja-JP".to_string(), "スキーマバックエンド操作が失敗しました: {message}".to_string());
        translations.insert("error.backend".to_string(), backend_errors);

        // 列不存在
        let mut column_not_found = HashMap::new();
        column_not_found.insert("zh-CN".to_string(), "表 '{table}' 中不存在列 '{column}'".to_string());
        column_not_found.insert("en-US".to_string(), "Column '{column}' does not exist in table '{table}'".to_string());
        column_not_found.insert("ja-JP".to_string(), "テーブル '{table}' にカラム '{column}' が存在しません".to_string());
        translations.insert("error.column_not_found".to_string(), column_not_found);

        // 配置错误
        let mut config_errors = HashMap::new();
        config_errors.insert("zh-CN".to_string(), "配置错误: {message}".to_string());
        config_errors.insert("en-US".to_string(), "Configuration error: {message}".to_string());
        config_errors.insert("ja-JP".to_string(), "設定エラー: {message}".to_string());
        translations.insert("error.config".to_string(), config_errors);

        // 序列化错误
        let mut serialization_errors = HashMap::new();
        serialization_errors.insert("zh-CN".to_string(), "序列化失败: {message}".to_string());
        serialization_errors.insert("en-US".to_string(), "Serialization failed: {message}".to_string());
        serialization_errors.insert("ja-JP".to_string(), "シリアライズ失敗: {message}".to_string());
        translations.insert("error.serialization".to_string(), serialization_errors);

        // IO错误
        let mut io_errors = HashMap::new();
        io_errors.insert("zh-CN".to_string(), "IO错误: {message}".to_string());
        io_errors.insert("en-US".to_string(), "IO error: {message}".to_string());
        io_errors.insert("ja-JP".to_string(), "IOエラー: {message}".to_string());
        translations.insert("error.io".to_string(), io_errors);

        // 其他错误
        let mut other_errors = HashMap::new();
        other_errors.insert("zh-CN".to_string(), "未知错误".to_string());
        other_errors.insert("en-US".to_string(), "Unknown error".to_string());
        other_errors.insert("ja-JP".to_string(), "不明なエラー".to_string());
        translations.insert("error.other".to_string(), other_errors);

        // 内存后端的表结构约束
        let mut table_exists = HashMap::new();
        table_exists.insert("zh-CN".to_string(), "表 '{table}' 已存在".to_string());
        table_exists.insert("en-US".to_string(), "Table '{table}' already exists".to_string());
        table_exists.insert("ja-JP".to_string(), "テーブル '{table}' は既に存在します".to_string());
        translations.insert("error.table_exists".to_string(), table_exists);

        let mut table_not_found = HashMap::new();
        table_not_found.insert("zh-CN".to_string(), "表 '{table}' 不存在".to_string());
        table_not_found.insert("en-US".to_string(), "Table '{table}' does not exist".to_string());
        table_not_found.insert("ja-JP".to_string(), "テーブル '{table}' が存在しません".to_string());
        translations.insert("error.table_not_found".to_string(), table_not_found);

        let mut table_no_columns = HashMap::new();
        table_no_columns.insert("zh-CN".to_string(), "创建表 '{table}' 时必须至少定义一个列".to_string());
        table_no_columns.insert("en-US".to_string(), "Table '{table}' must define at least one column".to_string());
        table_no_columns.insert("ja-JP".to_string(), "テーブル '{table}' には少なくとも1つのカラムが必要です".to_string());
        translations.insert("error.table_no_columns".to_string(), table_no_columns);

        let mut column_duplicate = HashMap::new();
        column_duplicate.insert("zh-CN".to_string(), "表 '{table}' 中列 '{column}' 重复".to_string());
        column_duplicate.insert("en-US".to_string(), "Duplicate column '{column}' in table '{table}'".to_string());
        column_duplicate.insert("ja-JP".to_string(), "テーブル '{table}' のカラム '{column}' が重複しています".to_string());
        translations.insert("error.column_duplicate".to_string(), column_duplicate);

        let mut injected_failure = HashMap::new();
        injected_failure.insert("zh-CN".to_string(), "列 '{column}' 的操作被设置为失败".to_string());
        injected_failure.insert("en-US".to_string(), "Operation on column '{column}' was configured to fail".to_string());
        injected_failure.insert("ja-JP".to_string(), "カラム '{column}' の操作は失敗するよう設定されています".to_string());
        translations.insert("error.injected_failure".to_string(), injected_failure);

        // 注册所有翻译
        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    pub fn init() {
        Self::register_all_translations();

        // 从环境变量获取语言设置，默认为zh-CN
        let lang = std::env::var("RAT_LANG")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_else(|_| "zh-CN".to_string());

        // 标准化语言代码
        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}


/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{t, tf, set_language, current_language};
