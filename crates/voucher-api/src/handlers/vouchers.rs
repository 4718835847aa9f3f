//! Voucher handlers
//!
//! Issuance and voucher administration.

use axum::{extract::State, Json};
use voucher_service::{
    IssuanceService, IssueVoucherRequest, IssuedVoucherResponse, UpdateVoucherRequest,
    VoucherDetailResponse, VoucherListResponse, VoucherResponse, VoucherService,
};

use crate::extractors::{ApiPath, JsonBody, OptionalValidatedJson, VoucherIdPath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List every issued voucher, newest first, with status counts
///
/// GET /vouchers
pub async fn list_vouchers(State(state): State<AppState>) -> ApiResult<Json<VoucherListResponse>> {
    let service = VoucherService::new(state.service_context());
    let list = service.list_vouchers().await?;
    Ok(Json(list.into()))
}

/// Issue a voucher to a recipient
///
/// POST /vouchers
pub async fn issue_voucher(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<IssueVoucherRequest>,
) -> ApiResult<Created<Json<IssuedVoucherResponse>>> {
    let service = IssuanceService::new(state.service_context());
    let issued = service.issue(request).await?;
    Ok(Created(Json(issued.into())))
}

/// Get a voucher by voucher or release id, with its QR payload
///
/// GET /vouchers/{id}
pub async fn get_voucher(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<VoucherIdPath>,
) -> ApiResult<Json<VoucherDetailResponse>> {
    let service = VoucherService::new(state.service_context());
    let detail = service.get_voucher(&path.id).await?;
    Ok(Json(detail.into()))
}

/// Edit discount and recipient details
///
/// PATCH /vouchers/{id}
pub async fn update_voucher(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<VoucherIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<UpdateVoucherRequest>,
) -> ApiResult<Json<VoucherResponse>> {
    let service = VoucherService::new(state.service_context());
    let bundle = service
        .update_voucher(&path.id, request.unwrap_or_default())
        .await?;
    Ok(Json(bundle.into()))
}

/// Delete a voucher with its release, QR record and unshared customer
///
/// DELETE /vouchers/{id}
pub async fn delete_voucher(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<VoucherIdPath>,
) -> ApiResult<NoContent> {
    let service = VoucherService::new(state.service_context());
    service.delete_voucher(&path.id).await?;
    Ok(NoContent)
}
