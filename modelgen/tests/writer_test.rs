mod common;

use std::fs;
use std::path::PathBuf;

use common::{MemoryReader, column, pk};
use modelgen::{BeegoRenderer, Render, build_tables, model_file_name, write_models};
use uuid::Uuid;

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("modelgen-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn catalog() -> MemoryReader {
    MemoryReader::new()
        .table("shop_order", vec![pk("id", 1)], vec![column("id", "int"), column("total_amount", "decimal")])
        .table("customer", vec![pk("id", 1)], vec![column("id", "int"), column("age", "int")])
}

#[test]
fn test_model_file_name() {
    assert_eq!(model_file_name("shop_order", "shop"), "OrderModel.go");
    assert_eq!(model_file_name("customer", "shop"), "CustomerModel.go");
    assert_eq!(model_file_name("order_item", "shop"), "OrderItemModel.go");
}

#[tokio::test]
async fn test_render_variants() -> Result<(), Box<dyn std::error::Error>> {
    let reader = catalog();
    let names = vec!["shop_order".to_string(), "customer".to_string()];
    let schema = build_tables(&reader, &names, "shop").await?;

    let order = BeegoRenderer.render(&schema.tables[0], "shop");
    assert!(order.starts_with("package models\n"));
    assert!(order.contains("type Order struct {\n"));
    assert!(order.contains("Id string `orm:\"column(id);pk\"`\n"));
    assert!(order.contains("TotalAmount string `orm:\"column(total_amount)\"`\n"));
    assert!(order.contains("orm.RegisterModelWithPrefix(\"shop_\", new(Order))"));
    assert!(!order.contains("{{"));

    let customer = BeegoRenderer.render(&schema.tables[1], "shop");
    assert!(customer.contains("type Customer struct {\n"));
    assert!(customer.contains("Age int `orm:\"column(age)\"`\n"));
    assert!(customer.contains("orm.RegisterModel(new(Customer))"));
    assert!(!customer.contains("RegisterModelWithPrefix"));

    let id_at = order.find("Id string").unwrap();
    let total_at = order.find("TotalAmount string").unwrap();
    assert!(id_at < total_at);
    Ok(())
}

#[tokio::test]
async fn test_write_models() -> Result<(), Box<dyn std::error::Error>> {
    let out = scratch_dir();
    let reader = catalog();
    let names = vec!["shop_order".to_string(), "customer".to_string()];
    let schema = build_tables(&reader, &names, "shop").await?;

    let report = write_models(&schema.tables, "shop", &out, &BeegoRenderer, false)?;
    assert_eq!(report.written, vec![out.join("shop").join("OrderModel.go"), out.join("shop").join("CustomerModel.go")]);
    assert!(report.skipped.is_empty());

    let contents = fs::read_to_string(out.join("shop").join("OrderModel.go"))?;
    assert_eq!(contents, BeegoRenderer.render(&schema.tables[0], "shop"));

    // A second run truncates the existing files and tolerates the
    // existing directory.
    let report = write_models(&schema.tables[1..], "shop", &out, &BeegoRenderer, false)?;
    assert_eq!(report.written.len(), 1);
    let contents = fs::read_to_string(out.join("shop").join("CustomerModel.go"))?;
    assert_eq!(contents, BeegoRenderer.render(&schema.tables[1], "shop"));

    fs::remove_dir_all(&out)?;
    Ok(())
}

#[tokio::test]
async fn test_open_failure_skips_table() -> Result<(), Box<dyn std::error::Error>> {
    let out = scratch_dir();
    let reader = catalog();
    let names = vec!["shop_order".to_string(), "customer".to_string()];
    let schema = build_tables(&reader, &names, "shop").await?;

    // A directory in place of the file makes opening it fail.
    fs::create_dir_all(out.join("shop").join("OrderModel.go"))?;

    let report = write_models(&schema.tables, "shop", &out, &BeegoRenderer, false)?;
    assert_eq!(report.skipped, vec!["shop_order".to_string()]);
    assert_eq!(report.written, vec![out.join("shop").join("CustomerModel.go")]);

    fs::remove_dir_all(&out)?;
    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_write_failure_aborts_run() -> Result<(), Box<dyn std::error::Error>> {
    use modelgen::Error;

    let out = scratch_dir();
    let reader = catalog();
    let names = vec!["shop_order".to_string(), "customer".to_string()];
    let schema = build_tables(&reader, &names, "shop").await?;

    // The file opens fine but every write to it fails with ENOSPC.
    fs::create_dir_all(out.join("shop"))?;
    std::os::unix::fs::symlink("/dev/full", out.join("shop").join("OrderModel.go"))?;

    let result = write_models(&schema.tables, "shop", &out, &BeegoRenderer, false);
    match result {
        Err(Error::Write { path, .. }) => assert_eq!(path, out.join("shop").join("OrderModel.go")),
        other => panic!("expected write error, got {other:?}"),
    }
    assert!(!out.join("shop").join("CustomerModel.go").exists());

    fs::remove_dir_all(&out)?;
    Ok(())
}
