use jsonflat::{FlattenConfig, SqlDialect, construct_flattened_sql};
use jsonflat_test_utils::{MockWarehouse, RecordedQuery, orders_warehouse, table};
use serde_json::json;

#[tokio::test(flavor = "current_thread")]
async fn test_orders_end_to_end() {
    let warehouse = orders_warehouse();
    let config = FlattenConfig::new(table("proj", "ds", "orders"));

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(
        statement.columns,
        vec!["created_at", "id", "id_1", "props", "status"]
    );
    assert_eq!(
        statement.sql,
        "SELECT created_at, id, id_1, props, status FROM `proj.ds.orders`;"
    );
    assert_eq!(statement.file_name(), "orders_flattened.sql");
}

#[tokio::test(flavor = "current_thread")]
async fn test_query_sequence_matches_pipeline_order() {
    let warehouse = orders_warehouse();
    let config = FlattenConfig::new(table("proj", "ds", "orders"));
    construct_flattened_sql(&warehouse, &config).await.unwrap();

    let queries = warehouse.queries();
    assert_eq!(queries.len(), 3);
    assert!(matches!(
        &queries[0],
        RecordedQuery::Catalog { data_type: Some(ty), .. } if ty == "JSON"
    ));
    assert!(matches!(
        &queries[1],
        RecordedQuery::Sample { column, .. } if column == "props"
    ));
    assert!(matches!(&queries[2], RecordedQuery::Catalog { data_type: None, .. }));
    assert_eq!(
        queries[1].sql(),
        "SELECT `props` FROM `proj.ds.orders` WHERE `props` IS NOT NULL LIMIT 1"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_table_without_document_columns() {
    let warehouse = MockWarehouse::new(table("proj", "ds", "users")).with_columns(&[
        ("name", "STRING"),
        ("email", "STRING"),
        ("age", "INT64"),
    ]);
    let config = FlattenConfig::new(table("proj", "ds", "users"));

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(statement.columns, vec!["age", "email", "name"]);
    assert_eq!(statement.sql, "SELECT age, email, name FROM `proj.ds.users`;");
    assert_eq!(warehouse.sample_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_fields_from_several_document_columns() {
    let warehouse = MockWarehouse::new(table("proj", "crm", "contacts"))
        .with_columns(&[
            ("id", "INT64"),
            ("properties", "JSON"),
            ("meta", "JSON"),
        ])
        .with_sample("properties", json!(r#"{"email": "a@b.c", "status": "lead"}"#))
        .with_sample("meta", json!(r#"{"status": "synced", "source": "api"}"#));
    let config = FlattenConfig::new(table("proj", "crm", "contacts"));

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(
        statement.columns,
        vec!["email", "id", "meta", "properties", "source", "status", "status_1"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_document_type_is_configurable() {
    let warehouse = MockWarehouse::new(table("proj", "ds", "events"))
        .with_columns(&[("id", "INT64"), ("payload", "JSONB")])
        .with_sample("payload", json!(r#"{"kind": "click"}"#));
    let config = FlattenConfig::new(table("proj", "ds", "events")).with_document_type("JSONB");

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(statement.columns, vec!["id", "kind", "payload"]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_ansi_dialect_statement() {
    let warehouse = orders_warehouse();
    let config = FlattenConfig::new(table("proj", "ds", "orders")).with_dialect(SqlDialect::Ansi);

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(
        statement.sql,
        "SELECT created_at, id, id_1, props, status FROM \"proj\".\"ds\".\"orders\";"
    );
    assert!(
        warehouse.queries()[0]
            .sql()
            .contains("information_schema.columns WHERE table_schema = 'ds'")
    );
}
