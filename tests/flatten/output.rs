use jsonflat::{FlattenConfig, confirmation, flatten_to_file};
use jsonflat_test_utils::{orders_warehouse, table};

#[tokio::test(flavor = "current_thread")]
async fn test_statement_written_to_table_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let warehouse = orders_warehouse();
    let config = FlattenConfig::new(table("proj", "ds", "orders"));

    let (statement, path) = flatten_to_file(&warehouse, &config, dir.path()).await.unwrap();

    assert_eq!(path, dir.path().join("orders_flattened.sql"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, statement.sql);
    assert_eq!(
        written,
        "SELECT created_at, id, id_1, props, status FROM `proj.ds.orders`;"
    );
    assert_eq!(
        confirmation(&path),
        format!("SQL saved to {}", path.display())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = FlattenConfig::new(table("proj", "ds", "orders"));

    let (_, first_path) = flatten_to_file(&orders_warehouse(), &config, dir.path())
        .await
        .unwrap();
    let first = std::fs::read(&first_path).unwrap();

    let (_, second_path) = flatten_to_file(&orders_warehouse(), &config, dir.path())
        .await
        .unwrap();
    let second = std::fs::read(&second_path).unwrap();

    assert_eq!(first_path, second_path);
    assert_eq!(first, second);
}
