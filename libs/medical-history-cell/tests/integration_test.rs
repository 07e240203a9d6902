use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_partial_json, method, path, query_param};

use medical_history_cell::router::medical_history_routes;
use shared_utils::test_utils::{TestConfig, MockStoreResponses};

fn create_test_app(mock_server: &MockServer) -> Router {
    medical_history_routes(Arc::new(TestConfig::with_store(&mock_server.uri()).to_app_config()))
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mock_history(mock_server: &MockServer, user_id: i64, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/medical_history"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_conditions_across_history_records() {
    let mock_server = MockServer::start().await;
    mock_history(&mock_server, 1, json!([
        MockStoreResponses::history_row(4, 1, "2024-03-15"),
        MockStoreResponses::history_row(2, 1, "2023-01-10"),
    ])).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/conditions"))
        .and(query_param("history_id", "in.(4,2)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::condition_row(4, "Hypertension", "2024-03-15"),
            MockStoreResponses::condition_row(2, "Asthma", "2019-05-01"),
        ])))
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("GET", "/conditions?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["condition_name"], "Hypertension");
    assert_eq!(body[0]["diagnosed_date"], "2024-03-15");
    assert!(body[0].get("history_id").is_none());
}

#[tokio::test]
async fn test_user_without_history_gets_empty_lists() {
    let mock_server = MockServer::start().await;
    mock_history(&mock_server, 9, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/conditions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    for uri in ["/conditions?user_id=9", "/medications?user_id=9", "/?user_id=9"] {
        let response = create_test_app(&mock_server).oneshot(request("GET", uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}

#[tokio::test]
async fn test_missing_user_id() {
    let mock_server = MockServer::start().await;

    for uri in ["/conditions", "/medications", "/", "/appointments"] {
        let response = create_test_app(&mock_server).oneshot(request("GET", uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "user_id is required");
    }
}

#[tokio::test]
async fn test_blank_or_non_numeric_user_id_is_json_error() {
    let mock_server = MockServer::start().await;

    for uri in ["/conditions?user_id=", "/medications?user_id=null", "/?user_id=undefined", "/appointments?user_id=abc"] {
        let response = create_test_app(&mock_server).oneshot(request("GET", uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "user_id is required");
    }
}

#[tokio::test]
async fn test_medications() {
    let mock_server = MockServer::start().await;
    mock_history(&mock_server, 1, json!([MockStoreResponses::history_row(4, 1, "2024-03-15")])).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/medications"))
        .and(query_param("history_id", "in.(4)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::medication_row(4, "Lisinopril", "2024-03-16"),
        ])))
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("GET", "/medications?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([{
        "medication_name": "Lisinopril",
        "dosage": "10mg daily",
        "start_date": "2024-03-16",
        "end_date": null
    }]));
}

#[tokio::test]
async fn test_lab_results() {
    let mock_server = MockServer::start().await;
    mock_history(&mock_server, 1, json!([MockStoreResponses::history_row(4, 1, "2024-03-15")])).await;

    let response = create_test_app(&mock_server)
        .oneshot(request("GET", "/?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["history_id"], 4);
    assert_eq!(body[0]["lab_results"], "CBC within normal limits");
    assert_eq!(body[0]["doctor_notes"], "Follow up in six months");
}

#[tokio::test]
async fn test_prior_appointments_only_completed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("user_id", "eq.1"))
        .and(query_param("status", "eq.Completed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "appointment_id": 3,
            "appointment_time": "2024-02-01T09:00:00",
            "hospital_id": 1,
            "notes": "Routine checkup"
        }])))
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("GET", "/appointments?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["appointment_time"], "2024-02-01 09:00:00");
    assert_eq!(body[0]["notes"], "Routine checkup");
}

#[tokio::test]
async fn test_store_failure_maps_to_500() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/medical_history"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockStoreResponses::error_response("boom", "XX000"),
        ))
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("GET", "/conditions?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to retrieve medical history");
}

#[tokio::test]
async fn test_add_medical_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/medical_history"))
        .and(body_partial_json(json!({ "user_id": 1, "report_date": "2024-03-15" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::history_row(11, 1, "2024-03-15"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(json!({
                    "user_id": "1",
                    "report_date": "2024-03-15",
                    "lab_results": "CBC within normal limits"
                }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["history_id"], 11);
}

#[tokio::test]
async fn test_delete_medical_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/medical_history"))
        .and(query_param("history_id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::history_row(4, 1, "2024-03-15"),
        ])))
        .mount(&mock_server)
        .await;
    for table in ["conditions", "medications"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/rest/v1/{}", table)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/medical_history"))
        .and(query_param("history_id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::history_row(4, 1, "2024-03-15"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("DELETE", "/4?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Medical record deleted");
}

#[tokio::test]
async fn test_delete_unknown_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/medical_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = create_test_app(&mock_server)
        .oneshot(request("DELETE", "/404?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Medical record not found");
}

#[tokio::test]
async fn test_delete_non_numeric_record_id() {
    let mock_server = MockServer::start().await;

    let response = create_test_app(&mock_server)
        .oneshot(request("DELETE", "/latest?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Medical record not found");
}
