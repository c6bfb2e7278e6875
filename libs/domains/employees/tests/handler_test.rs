//! Handler tests for Employees domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Path parameters and JSON bodies
//! - Response serialization with upstream field names
//! - HTTP status codes
//! - Error responses
//!
//! The router is driven directly with `oneshot`, backed by a mock upstream.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use domain_employees::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestUpstream};
use tower::ServiceExt; // For oneshot()

async fn app(upstream: &TestUpstream) -> Router {
    let client = HttpEmployeeUpstream::new(upstream.config()).unwrap();
    handlers::router(EmployeeService::new(client))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_employees_returns_upstream_shape() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_list");
    upstream
        .mock_list(vec![builder.employee_record("a", 1000)])
        .await;

    let response = app(&upstream).await.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["employee_name"], builder.name("employee", "a"));
    assert_eq!(body[0]["employee_salary"], 1000);
}

#[tokio::test]
async fn test_search_employees() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_search");
    upstream
        .mock_list(vec![
            builder.employee_record("alpha", 1000),
            builder.employee_record("beta", 2000),
        ])
        .await;

    let response = app(&upstream)
        .await
        .oneshot(get("/search/ALPHA"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Employee> = json_body(response.into_body()).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].name, builder.name("employee", "alpha"));
}

#[tokio::test]
async fn test_highest_salary_and_top_ten() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_aggregates");
    let records = (1..=12)
        .map(|i| builder.employee_record(&format!("e{i}"), i * 1000))
        .collect();
    upstream.mock_list(records).await;
    let app = app(&upstream).await;

    let response = app.clone().oneshot(get("/highestSalary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let highest: u32 = json_body(response.into_body()).await;
    assert_eq!(highest, 12000);

    let response = app
        .oneshot(get("/topTenHighestEarningEmployeeNames"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = json_body(response.into_body()).await;
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], builder.name("employee", "e12"));
    assert_eq!(names[9], builder.name("employee", "e3"));
}

#[tokio::test]
async fn test_get_employee_with_invalid_id_returns_400() {
    let upstream = TestUpstream::start().await;

    let response = app(&upstream)
        .await
        .oneshot(get("/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
    assert_eq!(upstream.server().received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_employee_not_found_returns_404() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_404");
    let id = builder.employee_id("missing");
    upstream.mock_get_not_found(id).await;

    let response = app(&upstream)
        .await
        .oneshot(get(&format!("/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_create_employee_returns_200() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_create");
    upstream
        .mock_create(builder.employee_record("new", 139082))
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": builder.name("employee", "new"),
                "salary": 139082,
                "age": 30,
                "title": "Engineer"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app(&upstream).await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let employee: Employee = json_body(response.into_body()).await;
    assert_eq!(employee.id, builder.employee_id("new"));
    assert_eq!(employee.email, "new@company.com");
}

#[tokio::test]
async fn test_create_employee_with_malformed_body_returns_json_error() {
    let upstream = TestUpstream::start().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name": "Jill"}"#))
        .unwrap();

    let response = app(&upstream).await.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_delete_employee_returns_name_as_text() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_delete");
    let id = builder.employee_id("gone");
    let name = builder.name("employee", "gone");
    upstream
        .mock_get(id, builder.employee_record("gone", 5000))
        .await;
    upstream.mock_delete(&name, true).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();

    let response = app(&upstream).await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(text_body(response.into_body()).await, name);
}

#[tokio::test]
async fn test_delete_rejected_returns_500_with_name() {
    let upstream = TestUpstream::start().await;
    let builder = TestDataBuilder::from_test_name("handler_delete_rejected");
    let id = builder.employee_id("stuck");
    let name = builder.name("employee", "stuck");
    upstream
        .mock_get(id, builder.employee_record("stuck", 5000))
        .await;
    upstream.mock_delete(&name, false).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();

    let response = app(&upstream).await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(
        body["message"],
        format!("Delete failed for employee: {name}")
    );
}

#[tokio::test]
async fn test_delete_on_aggregate_routes_is_invalid_id() {
    let upstream = TestUpstream::start().await;
    let app = app(&upstream).await;

    for uri in ["/highestSalary", "/topTenHighestEarningEmployeeNames"] {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "DELETE {uri}");
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_UUID");
        assert!(body["message"].as_str().unwrap().contains(&uri[1..]));
    }
    assert_eq!(upstream.server().received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_upstream_outage_returns_500() {
    let client = HttpEmployeeUpstream::new(TestUpstream::unreachable_config()).unwrap();
    let app = handlers::router(EmployeeService::new(client));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_rate_limit_exhaustion_returns_500() {
    let upstream = TestUpstream::start().await;
    upstream
        .rate_limit("GET", test_utils::EMPLOYEE_PATH, 3)
        .await;

    let response = app(&upstream)
        .await
        .oneshot(get("/highestSalary"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UPSTREAM_RATE_LIMITED");
}
