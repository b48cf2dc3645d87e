use jsonflat::{Error, FlattenConfig, SnapshotWarehouse, construct_flattened_sql};
use jsonflat_test_utils::table;

const ORDERS: &str = r#"{
    "tables": [
        {
            "project": "proj",
            "dataset": "ds",
            "table": "orders",
            "columns": [
                {"name": "id", "type": "INT64"},
                {"name": "created_at", "type": "TIMESTAMP"},
                {"name": "props", "type": "JSON"}
            ],
            "rows": [
                {"id": 1, "created_at": "2023-05-01T00:00:00Z", "props": null},
                {"id": 2, "created_at": "2023-05-02T00:00:00Z", "props": "{\"status\": \"open\", \"id\": 7}"},
                {"id": 3, "created_at": "2023-05-03T00:00:00Z", "props": "{\"other\": 1}"}
            ]
        }
    ]
}"#;

#[tokio::test(flavor = "current_thread")]
async fn test_snapshot_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, ORDERS).unwrap();

    let warehouse = SnapshotWarehouse::load(&path).await.unwrap();
    let config = FlattenConfig::new(table("proj", "ds", "orders"));
    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(
        statement.sql,
        "SELECT created_at, id, id_1, props, status FROM `proj.ds.orders`;"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_snapshot_unknown_table_yields_empty_projection() {
    let warehouse = SnapshotWarehouse::from_json_str(ORDERS).unwrap();
    let config = FlattenConfig::new(table("proj", "ds", "missing"));

    // No catalog rows and nothing to sample: an empty projection.
    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();
    assert!(statement.columns.is_empty());
    assert_eq!(statement.sql, "SELECT  FROM `proj.ds.missing`;");
}

#[tokio::test(flavor = "current_thread")]
async fn test_snapshot_unknown_dataset() {
    let warehouse = SnapshotWarehouse::from_json_str(ORDERS).unwrap();
    let config = FlattenConfig::new(table("proj", "nope", "orders"));

    let err = construct_flattened_sql(&warehouse, &config).await.unwrap_err();
    assert!(matches!(err, Error::DatasetNotFound(_)));
}
