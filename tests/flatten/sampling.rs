use jsonflat::{FlattenConfig, SamplingMode, construct_flattened_sql};
use jsonflat_test_utils::{MockWarehouse, table};
use serde_json::json;

fn wide_warehouse() -> MockWarehouse {
    MockWarehouse::new(table("proj", "ds", "wide"))
        .with_columns(&[
            ("id", "INT64"),
            ("a", "JSON"),
            ("b", "JSON"),
            ("c", "JSON"),
            ("d", "JSON"),
        ])
        .with_sample("a", json!(r#"{"x": 1, "y": 2}"#))
        .without_sample("b")
        .with_sample("c", json!({"y": true, "z": null}))
        .with_sample("d", json!("{}"))
}

#[tokio::test(flavor = "current_thread")]
async fn test_column_without_sample_contributes_nothing() {
    let warehouse = MockWarehouse::new(table("proj", "ds", "orders"))
        .with_columns(&[("id", "INT64"), ("props", "JSON")])
        .without_sample("props");
    let config = FlattenConfig::new(table("proj", "ds", "orders"));

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(statement.columns, vec!["id", "props"]);
    assert_eq!(warehouse.sample_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_nested_values_are_not_flattened() {
    let warehouse = MockWarehouse::new(table("proj", "ds", "orders"))
        .with_columns(&[("props", "JSON")])
        .with_sample(
            "props",
            json!(r#"{"shipping": {"city": "Oslo", "geo": {"lat": 1}}, "items": [{"sku": 1}]}"#),
        );
    let config = FlattenConfig::new(table("proj", "ds", "orders"));

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(statement.columns, vec!["items", "props", "shipping"]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_concurrent_sampling_matches_sequential() {
    let sequential_wh = wide_warehouse();
    let concurrent_wh = wide_warehouse();
    let base = FlattenConfig::new(table("proj", "ds", "wide"));

    let sequential = construct_flattened_sql(&sequential_wh, &base).await.unwrap();
    let concurrent = construct_flattened_sql(
        &concurrent_wh,
        &base.clone().with_sampling(SamplingMode::Concurrent),
    )
    .await
    .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(
        sequential.columns,
        vec!["a", "b", "c", "d", "id", "x", "y", "y_1", "z"]
    );
    assert_eq!(concurrent_wh.sample_count(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_sampling_on_multi_thread_runtime() {
    let warehouse = wide_warehouse();
    let config =
        FlattenConfig::new(table("proj", "ds", "wide")).with_sampling(SamplingMode::Concurrent);

    let statement = construct_flattened_sql(&warehouse, &config).await.unwrap();

    assert_eq!(statement.columns.len(), 9);
}
