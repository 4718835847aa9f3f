//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities and service results to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateEventRequest, IssueVoucherRequest, ScanRequest, UpdateVoucherRequest};

pub use responses::{
    EventResponse, HealthChecks, HealthResponse, IssuedVoucherResponse, ReadinessResponse,
    ScanResponse, ScannerResponse, VoucherCounts, VoucherDetailResponse, VoucherListResponse,
    VoucherResponse,
};
