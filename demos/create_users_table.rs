//! RatSchema 建表示例
//!
//! 本示例展示了如何使用表定义DSL创建一张 users 表，
//! 并打印内存后端生成的 MySQL DDL。

use rat_schema::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> SchemaResult<()> {
    let config = SchemaConfig::builder()
        .if_not_exists(true)
        .language("zh-CN")
        .logging(LoggingConfig::builder().level(LogLevel::Debug).console(true).build()?)
        .build()?;

    // 初始化日志系统与多语言错误消息
    init_logging(&config.logging)?;
    rat_schema::init_with_config(&config);
    println!("=== RatSchema 建表示例 ===");
    println!("库版本: {}", rat_schema::get_info());

    let backend = Arc::new(MemoryBackend::new());
    let schema = Schema::with_config(backend.clone(), config);

    // 1. 使用闭包定义并提交 users 表
    println!("\n1. 创建 users 表...");
    schema
        .create_table("users", |t| {
            t.auto_increment_integer("id", ColumnOptions::new());
            t.string("email", None, ColumnOptions::new());
            t.string("nickname", Some(64), ColumnOptions::new().nullable(true));
            t.r#enum(
                "status",
                ColumnOptions::new()
                    .values(["active", "disabled"])
                    .default_value("active"),
            );
            t.decimal("balance", None, ColumnOptions::new().default_value(0));
            t.timestamps(ColumnOptions::new());
            t.key("email", false);
        })
        .await?;

    // 2. 先构建定义、检查后再提交
    println!("\n2. 预览 tags 表定义...");
    let mut tags = schema.define_table("tags");
    tags.auto_increment_integer("id", ColumnOptions::new())
        .column("label", "varchar", ColumnOptions::new().length(32))?;
    println!("{}", tags.to_json()?);
    schema.materialize(tags, true).await?;

    // 3. 未注册的类型在接触后端之前就会被拒绝
    println!("\n3. 使用未注册的类型...");
    let mut broken = schema.define_table("broken");
    match broken.column("payload", "jsonb", ColumnOptions::new()) {
        Ok(_) => println!("意外成功"),
        Err(e) => println!("❌ {}", e.localized_message()),
    }

    println!("\n生成的DDL:");
    for statement in backend.statements() {
        println!("  {}", statement);
    }

    println!("\n✅ 示例执行完成");
    Ok(())
}
