//! API Integration Tests
//!
//! Each test spawns its own server with the in-memory storage backend,
//! so no external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Start a server with one event, returning its code
async fn server_with_event() -> (TestServer, String) {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/events", &CreateEventRequest::unique())
        .await
        .unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (server, event.code)
}

async fn issue(server: &TestServer, event_code: &str) -> IssuedVoucherResponse {
    let response = server
        .post("/api/v1/vouchers", &IssueVoucherRequest::unique(event_code))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn scan(server: &TestServer, device: &str, data: &str) -> ScanResponse {
    let response = server
        .post(
            &format!("/api/v1/scanners/{device}/scans"),
            &ScanRequest::new(data),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["storage"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/events").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_event_codes_are_sequential() {
    let (server, first) = server_with_event().await;
    assert_eq!(first, "ATK-001");

    let response = server
        .post("/api/v1/events", &CreateEventRequest::unique())
        .await
        .unwrap();
    let second: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(second.code, "ATK-002");

    let response = server.get("/api/v1/events").await.unwrap();
    let events: Vec<EventResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let codes: Vec<_> = events.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, ["ATK-001", "ATK-002"]);
}

#[tokio::test]
async fn test_get_event() {
    let (server, code) = server_with_event().await;

    let response = server.get(&format!("/api/v1/events/{code}")).await.unwrap();
    let event: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(event.code, code);
    assert!(event.name.starts_with("Test Event"));
    assert!(!event.created_at.is_empty());

    let response = server.get("/api/v1/events/ATK-999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/v1/events/not-a-code").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_create_event_requires_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/events", &serde_json::json!({ "name": "" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Issuance Tests
// ============================================================================

#[tokio::test]
async fn test_issue_voucher() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    assert_eq!(issued.first_name, "Ana");
    assert_eq!(issued.last_name, "Cruz");
    assert!(issued.email.ends_with("@example.com"));
    assert_eq!(issued.discount, 20);
    assert_eq!(issued.status, "unclaimed");
    assert_eq!(issued.event_code, code);
    assert!(issued.qr_cached);

    let payload: serde_json::Value = serde_json::from_str(&issued.qr_payload).unwrap();
    assert_eq!(payload["releasedID"], issued.release_id.as_str());
    assert_eq!(payload["voucherID"], issued.voucher_id.as_str());
    assert_eq!(payload["customerID"], issued.customer_id.as_str());
}

#[tokio::test]
async fn test_issue_reports_every_field_error() {
    let (server, _) = server_with_event().await;
    let mut request = IssueVoucherRequest::unique("ATK-999");
    request.email = "not-an-email".to_string();
    request.discount = "101".to_string();

    let response = server.post("/api/v1/vouchers", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    let details = body.error.details.unwrap();
    for field in ["email", "discount", "eventCode"] {
        assert!(details.get(field).is_some(), "missing error for {field}: {details}");
    }

    // nothing was written
    let response = server.get("/api/v1/vouchers").await.unwrap();
    let list: VoucherListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.counts.total, 0);
}

#[tokio::test]
async fn test_issue_rejects_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/vouchers", &serde_json::json!({ "firstName": "Ana" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REQUEST_BODY");
    assert!(!body.error.message.is_empty());
}

// ============================================================================
// Scan Tests
// ============================================================================

#[tokio::test]
async fn test_scan_claims_once() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let first = scan(&server, "front-desk", &issued.qr_payload).await;
    assert_eq!(first.outcome, "claimed");
    let voucher = first.voucher.unwrap();
    assert_eq!(voucher.voucher_id, issued.voucher_id);
    assert_eq!(voucher.status, "claimed");
    assert!(voucher.claimed_at.is_some());
    assert_eq!(voucher.recipient_name.as_deref(), Some("Ana Cruz"));

    let again = scan(&server, "front-desk", &issued.qr_payload).await;
    assert_eq!(again.outcome, "already_claimed");
    assert!(again.voucher.is_none());

    let response = server.get("/api/v1/vouchers").await.unwrap();
    let list: VoucherListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.counts.claimed, 1);
    assert_eq!(list.counts.unclaimed, 0);
}

#[tokio::test]
async fn test_scan_bare_release_id() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let outcome = scan(&server, "door", &issued.release_id).await;
    assert_eq!(outcome.outcome, "claimed");
    assert_eq!(outcome.voucher.unwrap().release_id.as_deref(), Some(issued.release_id.as_str()));
}

#[tokio::test]
async fn test_scan_voucher_id_payload() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let data = serde_json::json!({ "voucherID": issued.voucher_id }).to_string();
    let outcome = scan(&server, "door", &data).await;
    assert_eq!(outcome.outcome, "claimed");
}

#[tokio::test]
async fn test_scan_unknown_code_is_not_found() {
    let (server, _) = server_with_event().await;

    let outcome = scan(&server, "door", "definitely not a voucher").await;
    assert_eq!(outcome.outcome, "not_found");

    let outcome = scan(&server, "door", r#"{"releasedID":"123456789"}"#).await;
    assert_eq!(outcome.outcome, "not_found");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scans_from_many_devices_claim_once() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let client = server.client.clone();
            let url = format!("{}/api/v1/scanners/device-{i}/scans", server.base_url());
            let body = ScanRequest::new(issued.qr_payload.clone());
            tokio::spawn(async move {
                let response = client.post(url).json(&body).send().await.unwrap();
                assert_json::<ScanResponse>(response, StatusCode::OK)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut claimed = 0;
    let mut already = 0;
    for handle in handles {
        match handle.await.unwrap().outcome.as_str() {
            "claimed" => claimed += 1,
            "already_claimed" => already += 1,
            other => panic!("unexpected outcome {other}"),
        }
    }
    assert_eq!(claimed, 1);
    assert_eq!(already, 5);
}

#[tokio::test]
async fn test_scan_rejects_empty_data_and_bad_device() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/scanners/door/scans", &ScanRequest::new(""))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    let response = server
        .post("/api/v1/scanners/bad%20device/scans", &ScanRequest::new("x"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_foreground_reports_open_gate() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_empty("/api/v1/scanners/front-desk/foreground")
        .await
        .unwrap();
    let scanner: ScannerResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(scanner.device_id, "front-desk");
    assert!(!scanner.locked);
}

// ============================================================================
// Voucher Administration Tests
// ============================================================================

#[tokio::test]
async fn test_get_voucher_by_either_id() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    for id in [&issued.voucher_id, &issued.release_id] {
        let response = server.get(&format!("/api/v1/vouchers/{id}")).await.unwrap();
        let detail: VoucherDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(detail.voucher.voucher_id, issued.voucher_id);
        assert_eq!(detail.voucher.event_code.as_deref(), Some(code.as_str()));
        assert_eq!(detail.qr_payload, issued.qr_payload);
    }

    let response = server.get("/api/v1/vouchers/42").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_list_vouchers_newest_first() {
    let (server, code) = server_with_event().await;
    let first = issue(&server, &code).await;
    let second = issue(&server, &code).await;

    let response = server.get("/api/v1/vouchers").await.unwrap();
    let list: VoucherListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.counts.total, 2);
    assert_eq!(list.counts.unclaimed, 2);
    assert_eq!(list.vouchers[0].voucher_id, second.voucher_id);
    assert_eq!(list.vouchers[1].voucher_id, first.voucher_id);
}

#[tokio::test]
async fn test_update_voucher_keeps_status() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;
    scan(&server, "door", &issued.release_id).await;

    let response = server
        .patch(
            &format!("/api/v1/vouchers/{}", issued.voucher_id),
            &serde_json::json!({ "discount": "35", "lastName": "Reyes" }),
        )
        .await
        .unwrap();
    let updated: VoucherResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.discount, 35);
    assert_eq!(updated.last_name.as_deref(), Some("Reyes"));
    assert_eq!(updated.first_name.as_deref(), Some("Ana"));
    assert_eq!(updated.status, "claimed");

    // printed codes keep working after an edit
    let response = server
        .get(&format!("/api/v1/vouchers/{}", issued.voucher_id))
        .await
        .unwrap();
    let detail: VoucherDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.qr_payload, issued.qr_payload);
}

#[tokio::test]
async fn test_update_voucher_rejects_bad_discount() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let response = server
        .patch(
            &format!("/api/v1/vouchers/{}", issued.voucher_id),
            &serde_json::json!({ "discount": "150" }),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_voucher() {
    let (server, code) = server_with_event().await;
    let issued = issue(&server, &code).await;

    let response = server
        .delete(&format!("/api/v1/vouchers/{}", issued.release_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/vouchers/{}", issued.voucher_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // the deleted code no longer resolves
    let outcome = scan(&server, "door", &issued.qr_payload).await;
    assert_eq!(outcome.outcome, "not_found");
}
