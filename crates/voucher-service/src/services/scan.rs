//! Scan pipeline: gate, resolve, claim
//!
//! The gate is held for the whole pipeline through a permit, so it reopens
//! on every exit path including storage errors.

use tracing::{info, instrument, warn};
use voucher_core::entities::VoucherBundle;
use voucher_core::ScanGate;

use super::claim::{ClaimResult, ClaimService};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resolver::ResolverService;

/// What the scanner should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Claimed(Box<VoucherBundle>),
    AlreadyClaimed,
    NotFound,
    /// Dropped because a scan from the same device was still running
    Ignored,
}

impl From<ClaimResult> for ScanOutcome {
    fn from(result: ClaimResult) -> Self {
        match result {
            ClaimResult::Claimed(bundle) => Self::Claimed(bundle),
            ClaimResult::AlreadyClaimed => Self::AlreadyClaimed,
            ClaimResult::NotFound => Self::NotFound,
        }
    }
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claimed(_) => "claimed",
            Self::AlreadyClaimed => "already_claimed",
            Self::NotFound => "not_found",
            Self::Ignored => "ignored",
        }
    }
}

/// Scan service
pub struct ScanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScanService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admit `raw` through `gate`, then resolve and claim it
    #[instrument(skip(self, gate, raw), fields(len = raw.len()))]
    pub async fn process_scan(&self, gate: &ScanGate, raw: &str) -> ServiceResult<ScanOutcome> {
        let Some(_permit) = gate.try_acquire() else {
            warn!("Scan ignored while another scan is in flight");
            return Ok(ScanOutcome::Ignored);
        };

        let outcome = self.resolve_and_claim(raw).await?;
        info!(outcome = outcome.as_str(), "Scan processed");
        Ok(outcome)
    }

    /// The pipeline without the gate
    pub async fn resolve_and_claim(&self, raw: &str) -> ServiceResult<ScanOutcome> {
        let Some(bundle) = ResolverService::new(self.ctx).resolve(raw).await? else {
            return Ok(ScanOutcome::NotFound);
        };
        let result = ClaimService::new(self.ctx).claim_resolved(bundle).await?;
        Ok(result.into())
    }
}
