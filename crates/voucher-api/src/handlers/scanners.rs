//! Scanner handlers
//!
//! A scanner is a device running the camera client. Each one submits raw
//! code text and gets back the claim outcome; frames that arrive while its
//! previous scan is still in flight come back as `ignored`.

use axum::{extract::State, Json};
use tracing::info;
use voucher_service::{ScanRequest, ScanResponse, ScanService, ScannerResponse};

use crate::extractors::{ApiPath, DeviceIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Resolve and claim one scanned code
///
/// POST /scanners/{device_id}/scans
pub async fn submit_scan(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<DeviceIdPath>,
    ValidatedJson(request): ValidatedJson<ScanRequest>,
) -> ApiResult<Json<ScanResponse>> {
    let device_id = path.device_id()?;
    let gate = state.scan_gates().gate(device_id);

    let service = ScanService::new(state.service_context());
    let result = service.process_scan(&gate, &request.data).await;
    drop(gate);
    state.scan_gates().reclaim(device_id);

    let outcome = result?;
    info!(device_id, outcome = outcome.as_str(), "Scan processed");

    Ok(Json(outcome.into()))
}

/// The device's app came back to the foreground; reopen its gate
///
/// POST /scanners/{device_id}/foreground
pub async fn foreground(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<DeviceIdPath>,
) -> ApiResult<Json<ScannerResponse>> {
    let device_id = path.device_id()?;
    let gates = state.scan_gates();
    gates.force_release(device_id);
    let locked = gates.is_locked(device_id);
    gates.reclaim(device_id);

    Ok(Json(ScannerResponse {
        device_id: device_id.to_string(),
        locked,
    }))
}
