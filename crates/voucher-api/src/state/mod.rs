//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and scan gates.

mod scan_gates;

use std::sync::Arc;

use voucher_common::AppConfig;
use voucher_service::ServiceContext;

pub use scan_gates::ScanGateRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    scan_gates: Arc<ScanGateRegistry>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            scan_gates: Arc::new(ScanGateRegistry::new()),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scan_gates(&self) -> &ScanGateRegistry {
        &self.scan_gates
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .field("scan_gates", &self.scan_gates.len())
            .finish()
    }
}
