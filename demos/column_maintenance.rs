//! RatSchema 列维护示例
//!
//! 本示例在一张已存在的表上演示追加列、重命名列、修改列与删除列，
//! 以及后端中途失败后的重试方式。

use rat_schema::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> SchemaResult<()> {
    init_logging(&LoggingConfig::builder().level(LogLevel::Info).console(true).build()?)?;
    rat_schema::init();
    println!("=== RatSchema 列维护示例 ===");

    // 预置一张已存在的表，模拟数据库里的历史结构
    let backend = Arc::new(MemoryBackend::new().with_table(
        "articles",
        vec![
            (
                "id".to_string(),
                ColumnRule::new(NativeType::Int)
                    .with_unsigned(true)
                    .with_auto_increment(true),
            ),
            (
                "title".to_string(),
                ColumnRule::new(NativeType::Custom("varchar(120)".to_string())),
            ),
        ],
    ));
    let schema = Schema::new(backend.clone());

    // 1. 追加列，重复追加不会再次调用后端
    println!("\n1. 追加列...");
    schema
        .add_column("articles", "body", "longtext", ColumnOptions::new().nullable(true), "")
        .await?;
    schema
        .add_column("articles", "slug", "string", ColumnOptions::new().length(160), "id")
        .await?;
    schema
        .add_column("articles", "slug", "string", ColumnOptions::new(), "")
        .await?;
    println!("当前列: {:?}", backend.column_names("articles"));

    // 2. 重命名列，沿用数据库报告的原类型
    println!("\n2. 重命名列...");
    schema.rename_column("articles", "title", "headline").await?;

    // 3. 修改列定义
    println!("\n3. 修改列...");
    schema
        .modify_column("articles", "slug", "varchar", ColumnOptions::new().length(255))
        .await?;

    // 4. 追加时间戳，updated 失败后 created 保持生效，重试即可补齐
    println!("\n4. 追加时间戳...");
    backend.fail_on_column("updated");
    if let Err(e) = schema
        .add_column("articles", "", "timestamps", ColumnOptions::new(), "")
        .await
    {
        println!("❌ {}", e.localized_message());
        println!("后端错误: {}，当前列: {:?}", e.is_backend(), backend.column_names("articles"));
    }
    backend.clear_failure("updated");
    schema
        .add_column("articles", "", "timestamps", ColumnOptions::new(), "")
        .await?;

    // 5. 删除列
    println!("\n5. 删除列...");
    schema.remove_column("articles", "body").await?;
    println!("最终列: {:?}", backend.column_names("articles"));

    println!("\n生成的DDL:");
    for statement in backend.statements() {
        println!("  {}", statement);
    }

    println!("\n✅ 示例执行完成");
    Ok(())
}
