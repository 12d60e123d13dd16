//! MySQL DDL 文本生成
//!
//! 把规范化后的列规则渲染为 MySQL 方言的建表/改表语句

use crate::types::ColumnRule;
use indexmap::IndexMap;

/// 用反引号包裹标识符
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// 渲染列类型部分，例如 `VARCHAR(200)`
pub fn column_type(rule: &ColumnRule) -> String {
    match &rule.constraint {
        Some(constraint) => format!("{}({})", rule.native_type, constraint.to_sql()),
        None => rule.native_type.to_string(),
    }
}

/// 渲染完整的列定义
pub fn column_definition(name: &str, rule: &ColumnRule) -> String {
    let mut parts = vec![quote_identifier(name), column_type(rule)];

    if rule.is_unsigned() {
        parts.push("UNSIGNED".to_string());
    }

    // 添加NULL或NOT NULL约束
    parts.push(if rule.is_nullable() { "NULL" } else { "NOT NULL" }.to_string());

    if let Some(default) = &rule.default {
        parts.push(format!("DEFAULT {}", default.to_sql_literal()));
    }

    if rule.is_auto_increment() {
        parts.push("AUTO_INCREMENT".to_string());
    }

    if let Some(comment) = rule.extra.get("comment") {
        parts.push(format!(
            "COMMENT {}",
            crate::types::DataValue::String(comment.to_string()).to_sql_literal()
        ));
    }

    parts.join(" ")
}

/// 渲染 CREATE TABLE 语句
///
/// 所有主键列合并为一个 PRIMARY KEY，普通键各自生成一个 KEY
pub fn create_table(
    table: &str,
    columns: &IndexMap<String, ColumnRule>,
    keys: &[(String, bool)],
    if_not_exists: bool,
) -> String {
    let mut definitions: Vec<String> = columns
        .iter()
        .map(|(name, rule)| column_definition(name, rule))
        .collect();

    let primary: Vec<String> = keys
        .iter()
        .filter(|(_, primary)| *primary)
        .map(|(column, _)| quote_identifier(column))
        .collect();
    if !primary.is_empty() {
        definitions.push(format!("PRIMARY KEY ({})", primary.join(", ")));
    }

    for (column, _) in keys.iter().filter(|(_, primary)| !*primary) {
        definitions.push(format!(
            "KEY {} ({})",
            quote_identifier(column),
            quote_identifier(column)
        ));
    }

    format!(
        "CREATE TABLE {}{} ({})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        quote_identifier(table),
        definitions.join(", ")
    )
}

/// 渲染 ADD COLUMN 语句
pub fn add_column(table: &str, column: &str, rule: &ColumnRule, after: Option<&str>) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {}",
        quote_identifier(table),
        column_definition(column, rule)
    );
    if let Some(after) = after {
        sql.push_str(&format!(" AFTER {}", quote_identifier(after)));
    }
    sql
}

/// 渲染 MODIFY / CHANGE COLUMN 语句
///
/// 需要重命名时使用 CHANGE COLUMN，否则使用 MODIFY COLUMN
pub fn modify_column(table: &str, column: &str, rule: &ColumnRule, rename_to: Option<&str>) -> String {
    match rename_to {
        Some(new_name) => format!(
            "ALTER TABLE {} CHANGE COLUMN {} {}",
            quote_identifier(table),
            quote_identifier(column),
            column_definition(new_name, rule)
        ),
        None => format!(
            "ALTER TABLE {} MODIFY COLUMN {}",
            quote_identifier(table),
            column_definition(column, rule)
        ),
    }
}

/// 渲染 DROP COLUMN 语句
pub fn drop_column(table: &str, column: &str) -> String {
    format!(
        "ALTER TABLE {} DROP COLUMN {}",
        quote_identifier(table),
        quote_identifier(column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::rules;
    use crate::types::{ColumnOptions, DataValue, NativeType};

    #[test]
    fn test_column_definition() {
        let rule = rules::auto_increment_rule(ColumnOptions::new());
        assert_eq!(
            column_definition("id", &rule),
            "`id` INT UNSIGNED NOT NULL AUTO_INCREMENT"
        );

        let rule = rules::value_list_rule(
            NativeType::Enum,
            ColumnOptions::new().values(["draft", "live"]).default_value("draft"),
        );
        assert_eq!(
            column_definition("state", &rule),
            "`state` ENUM('draft','live') NULL DEFAULT 'draft'"
        );

        let rule = rules::plain_rule(
            NativeType::DateTime,
            ColumnOptions::new()
                .default_value(DataValue::Expression("CURRENT_TIMESTAMP".to_string()))
                .extra("comment", "创建时间"),
        );
        assert_eq!(
            column_definition("created", &rule),
            "`created` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP COMMENT '创建时间'"
        );
    }

    #[test]
    fn test_create_table_with_keys() {
        let mut columns = IndexMap::new();
        columns.insert("id".to_string(), rules::auto_increment_rule(ColumnOptions::new()));
        columns.insert(
            "email".to_string(),
            rules::constrained_rule(NativeType::Varchar, 200u32.into(), ColumnOptions::new()),
        );
        let keys = vec![("id".to_string(), true), ("email".to_string(), false)];

        assert_eq!(
            create_table("users", &columns, &keys, true),
            "CREATE TABLE IF NOT EXISTS `users` (`id` INT UNSIGNED NOT NULL AUTO_INCREMENT, \
             `email` VARCHAR(200) NOT NULL, PRIMARY KEY (`id`), KEY `email` (`email`))"
        );
    }

    #[test]
    fn test_alter_statements() {
        let rule = rules::plain_rule(NativeType::Text, ColumnOptions::new().nullable(true));
        assert_eq!(
            add_column("posts", "body", &rule, Some("title")),
            "ALTER TABLE `posts` ADD COLUMN `body` TEXT NULL AFTER `title`"
        );
        assert_eq!(
            modify_column("posts", "body", &rule, Some("content")),
            "ALTER TABLE `posts` CHANGE COLUMN `body` `content` TEXT NULL"
        );
        assert_eq!(
            modify_column("posts", "body", &rule, None),
            "ALTER TABLE `posts` MODIFY COLUMN `body` TEXT NULL"
        );
        assert_eq!(drop_column("posts", "body"), "ALTER TABLE `posts` DROP COLUMN `body`");
    }
}
