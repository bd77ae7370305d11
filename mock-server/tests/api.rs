use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_payloads, Echo};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "XBOUNDARYX";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Hand-encoded multipart body: `(field, Some(file_name), content)` for files,
/// `(field, None, value)` for text fields.
fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<String> {
    let mut body = String::new();
    for (field, file_name, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: text/csv\r\n\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{field}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

// --- payloads ---

#[tokio::test]
async fn payloads_are_served_as_json_object() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/static/apiPayloads.json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payloads: Value = body_json(resp).await;
    assert_eq!(payloads["driver_send_otp"]["endpoint"], "/v1/driver/sendOtp");
    assert_eq!(payloads["mfo_add_new_hub"]["content_type"], "form-data");
}

#[tokio::test]
async fn custom_payloads_are_served() {
    let (router, _) = app_with_payloads(json!({
        "ping": { "method": "GET", "endpoint": "/ping" }
    }));
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/static/apiPayloads.json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let payloads: Value = body_json(resp).await;
    assert_eq!(payloads.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn non_object_payloads_are_not_found() {
    let (router, _) = app_with_payloads(Value::Null);
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/static/apiPayloads.json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- upload ---

#[tokio::test]
async fn upload_with_both_files_is_recorded() {
    let (router, state) = app_with_payloads(Value::Null);
    let resp = router
        .oneshot(multipart_request(
            "/uploadPorterData",
            &[
                ("order_data", Some("orders.csv"), "order_id\n1"),
                ("driver_data", Some("drivers.csv"), "driver_id\n7"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["Success"], "YES");

    let uploads = state.uploads();
    let uploads = uploads.read().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].order_file, "orders.csv");
    assert_eq!(uploads[0].order_bytes, "order_id\n1".len());
    assert_eq!(uploads[0].driver_file, "drivers.csv");
}

#[tokio::test]
async fn upload_missing_driver_data_returns_error_field() {
    let resp = app()
        .oneshot(multipart_request(
            "/uploadPorterData",
            &[("order_data", Some("orders.csv"), "order_id\n1")],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "driver_data is required");
}

#[tokio::test]
async fn upload_empty_file_is_rejected() {
    let resp = app()
        .oneshot(multipart_request(
            "/uploadPorterData",
            &[
                ("order_data", Some(""), ""),
                ("driver_data", Some("drivers.csv"), "driver_id\n7"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "order_data is empty");
}

#[tokio::test]
async fn upload_without_multipart_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/uploadPorterData", "{}"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_json_body_and_headers() {
    let resp = app()
        .oneshot(json_request("PUT", "/echo/v1/items", r#"{"a":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.path, "/echo/v1/items");
    assert_eq!(echo.headers["content-type"], "application/json");
    assert_eq!(echo.body.as_deref(), Some(r#"{"a":1}"#));
    assert!(echo.fields.is_empty());
}

#[tokio::test]
async fn echo_reports_multipart_fields_and_files() {
    let resp = app()
        .oneshot(multipart_request(
            "/echo",
            &[
                ("x", None, "y"),
                ("file", Some("a.csv"), "abc"),
                ("file", Some("b.csv"), "de"),
            ],
        ))
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.fields, vec![("x".to_string(), "y".to_string())]);
    assert_eq!(echo.files.len(), 2);
    assert_eq!(echo.files[0].file_name, "a.csv");
    assert_eq!(echo.files[1].size, 2);
    assert!(echo.body.is_none());
}

#[tokio::test]
async fn echo_status_query_sets_status() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo?status=418")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn echo_rejects_impossible_status() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo?status=42")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- misc ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(Request::builder().uri("/nope").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());
}
