//! Postgres store tests against a testcontainers database.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use common::{new_optimization, unique_asin, TestHarness};
use listing_core::common::{ListingError, Pagination};
use listing_core::domains::products::{get_optimization, process_product};
use listing_core::kernel::test_dependencies::MockPageFetcher;
use listing_core::kernel::{BaseOptimizationStore, TestDependencies};
use listing_core::server::build_app;
use serde_json::Value;
use test_context::test_context;
use tower::ServiceExt;

#[test_context(TestHarness)]
#[tokio::test]
async fn create_assigns_increasing_ids(ctx: &TestHarness) {
    let store = ctx.store();
    let asin = unique_asin("BID");

    let first = store
        .create(&new_optimization(&asin, "First"))
        .await
        .unwrap();
    let second = store
        .create(&new_optimization(&asin, "Second"))
        .await
        .unwrap();

    assert!(second > first);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn history_returns_every_record_newest_first(ctx: &TestHarness) {
    let store = ctx.store();
    let asin = unique_asin("BHS");

    for title in ["One", "Two", "Three"] {
        store
            .create(&new_optimization(&asin, title))
            .await
            .unwrap();
    }

    let history = store.find_by_asin(&asin).await.unwrap();

    let titles: Vec<&str> = history
        .iter()
        .map(|r| r.optimized_title.as_str())
        .collect();
    assert_eq!(titles, vec!["Three", "Two", "One"]);
    assert!(history
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn history_for_unknown_asin_is_empty(ctx: &TestHarness) {
    let history = ctx
        .store()
        .find_by_asin(&unique_asin("BNONE"))
        .await
        .unwrap();

    assert!(history.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_fields_survive_the_text_columns(ctx: &TestHarness) {
    let store = ctx.store();
    let asin = unique_asin("BRT");
    let new = new_optimization(&asin, "Round Trip");

    let id = store.create(&new).await.unwrap();
    let record = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(record.asin, asin);
    assert_eq!(record.original_bullet_points, new.original_bullet_points);
    assert_eq!(record.optimized_bullet_points, new.optimized_bullet_points);
    assert_eq!(record.suggested_keywords, new.suggested_keywords);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn find_by_missing_id_is_none(ctx: &TestHarness) {
    let found = ctx.store().find_by_id(i64::MAX).await.unwrap();

    assert!(found.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_returns_summaries_newest_first(ctx: &TestHarness) {
    let store = ctx.store();
    let asin = unique_asin("BLS");
    let older = store
        .create(&new_optimization(&asin, "Older"))
        .await
        .unwrap();
    let newer = store
        .create(&new_optimization(&asin, "Newer"))
        .await
        .unwrap();

    let summaries = store.list(Pagination::new(1000, 0)).await.unwrap();

    assert!(summaries
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
    let position = |id: i64| summaries.iter().position(|s| s.id == id).unwrap();
    assert!(position(newer) < position(older));
    let summary = &summaries[position(newer)];
    assert_eq!(summary.original_title, "Wireless Mouse");
    assert_eq!(summary.optimized_title, "Newer");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_honors_limit(ctx: &TestHarness) {
    let store = ctx.store();
    let asin = unique_asin("BLM");
    for title in ["A", "B", "C"] {
        store
            .create(&new_optimization(&asin, title))
            .await
            .unwrap();
    }

    let summaries = store.list(Pagination::new(2, 0)).await.unwrap();

    assert_eq!(summaries.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_check_succeeds(ctx: &TestHarness) {
    ctx.store().health_check().await.unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn processing_twice_appends_two_records(ctx: &TestHarness) {
    let mocks = TestDependencies::new();
    let deps = ctx.server_deps(&mocks);
    let asin = unique_asin("BPR");

    let first = process_product(&asin, &deps).await.unwrap();
    let second = process_product(&asin, &deps).await.unwrap();

    assert!(second.id > first.id);
    let history = deps.store.find_by_asin(&asin).await.unwrap();
    assert_eq!(
        history.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let stored = get_optimization(&first.id.to_string(), &deps).await.unwrap();
    assert_eq!(stored.original_title, first.original.title);
    assert_eq!(stored.optimized_bullet_points, first.optimized.bullet_points);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_fetch_persists_nothing(ctx: &TestHarness) {
    let mocks =
        TestDependencies::new().mock_page_fetcher(MockPageFetcher::new().with_not_found());
    let deps = ctx.server_deps(&mocks);
    let asin = unique_asin("BFF");

    let err = process_product(&asin, &deps).await.unwrap_err();

    assert!(matches!(err, ListingError::NotFound(_)));
    assert!(deps.store.find_by_asin(&asin).await.unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn api_process_then_history(ctx: &TestHarness) {
    let mocks = TestDependencies::new();
    let app = build_app(ctx.server_deps(&mocks), &[]);
    let asin = unique_asin("BAPI");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/products/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(r#"{{"asin": "{}"}}"#, asin)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri(format!("/products/history/{}", asin))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["asin"], asin.as_str());
}
