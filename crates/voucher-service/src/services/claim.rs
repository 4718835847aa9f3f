//! Claim state machine
//!
//! A voucher moves `Unclaimed -> Claimed` exactly once. The transition is a
//! single conditional update at the store; its affected-row count decides
//! whether this call performed the claim. Nothing here reads the status and
//! then writes it.

use tracing::{info, instrument};
use voucher_core::entities::{Voucher, VoucherBundle};
use voucher_core::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of a claim attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimResult {
    /// This call claimed the voucher; the bundle reflects the new status
    Claimed(Box<VoucherBundle>),
    AlreadyClaimed,
    NotFound,
}

/// What the conditional update found
enum Transition {
    /// This call flipped the status; carries the re-read row
    Won(Voucher),
    AlreadyClaimed,
    Missing,
}

/// Claim service
pub struct ClaimService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClaimService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Claim by voucher id. On success the bundle carries the voucher's
    /// release and recipient when one exists.
    #[instrument(skip(self))]
    pub async fn claim(&self, voucher_id: Snowflake) -> ServiceResult<ClaimResult> {
        let voucher = match self.transition(voucher_id).await? {
            Transition::Won(voucher) => voucher,
            Transition::AlreadyClaimed => return Ok(ClaimResult::AlreadyClaimed),
            Transition::Missing => return Ok(ClaimResult::NotFound),
        };

        let bundle = match self.ctx.release_repo().find_by_voucher(voucher_id).await? {
            Some(release) => {
                let customer = self
                    .ctx
                    .customer_repo()
                    .find_by_id(release.customer_id)
                    .await?;
                VoucherBundle::new(voucher, release, customer)
            }
            None => VoucherBundle::voucher_only(voucher),
        };
        Ok(ClaimResult::Claimed(Box::new(bundle)))
    }

    /// Claim a voucher that was already resolved. The relations in `bundle`
    /// are kept as resolved; only the voucher row is refreshed.
    #[instrument(skip(self, bundle), fields(voucher_id = %bundle.voucher.id))]
    pub async fn claim_resolved(&self, mut bundle: VoucherBundle) -> ServiceResult<ClaimResult> {
        match self.transition(bundle.voucher.id).await? {
            Transition::Won(voucher) => bundle.voucher = voucher,
            Transition::AlreadyClaimed => return Ok(ClaimResult::AlreadyClaimed),
            // deleted between resolve and claim
            Transition::Missing => return Ok(ClaimResult::NotFound),
        }
        Ok(ClaimResult::Claimed(Box::new(bundle)))
    }

    /// Run the conditional update, then tell "missing" from "already
    /// claimed" by re-reading the row
    async fn transition(&self, voucher_id: Snowflake) -> ServiceResult<Transition> {
        let vouchers = self.ctx.voucher_repo();
        let changed = vouchers.conditional_claim(voucher_id).await?;
        let current = vouchers.find_by_id(voucher_id).await?;

        Ok(match (changed, current) {
            (0, Some(_)) => Transition::AlreadyClaimed,
            (_, None) => Transition::Missing,
            (_, Some(voucher)) => {
                info!(voucher_id = %voucher_id, "Voucher claimed");
                Transition::Won(voucher)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{ana_request, context_with_event, loose_voucher};
    use crate::services::IssuanceService;
    use voucher_core::VoucherStatus;

    #[tokio::test]
    async fn test_claim_then_already_claimed() {
        let (ctx, _) = context_with_event().await;
        let issued = IssuanceService::new(&ctx).issue(ana_request()).await.unwrap();
        let claims = ClaimService::new(&ctx);

        let ClaimResult::Claimed(bundle) = claims.claim(issued.voucher.id).await.unwrap() else {
            panic!("first claim must succeed");
        };
        assert_eq!(bundle.voucher.status, VoucherStatus::Claimed);
        assert!(bundle.voucher.claimed_at.is_some());
        assert_eq!(bundle.recipient_name().as_deref(), Some("Ana Cruz"));

        assert_eq!(claims.claim(issued.voucher.id).await.unwrap(), ClaimResult::AlreadyClaimed);
    }

    #[tokio::test]
    async fn test_claim_missing_voucher() {
        let (ctx, _) = context_with_event().await;
        let result = ClaimService::new(&ctx).claim(Snowflake::new(404)).await.unwrap();
        assert_eq!(result, ClaimResult::NotFound);
    }

    #[tokio::test]
    async fn test_claim_voucher_without_release() {
        let (ctx, store) = context_with_event().await;
        let voucher = loose_voucher(&store, 77).await;

        let ClaimResult::Claimed(bundle) = ClaimService::new(&ctx).claim(voucher.id).await.unwrap() else {
            panic!("loose voucher is claimable");
        };
        assert!(bundle.is_partial());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_single_winner() {
        let (ctx, _) = context_with_event().await;
        let issued = IssuanceService::new(&ctx).issue(ana_request()).await.unwrap();
        let ctx = std::sync::Arc::new(ctx);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ctx = ctx.clone();
                let id = issued.voucher.id;
                tokio::spawn(async move { ClaimService::new(&ctx).claim(id).await.unwrap() })
            })
            .collect();

        let mut claimed = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap() {
                ClaimResult::Claimed(_) => claimed += 1,
                ClaimResult::AlreadyClaimed => already += 1,
                ClaimResult::NotFound => panic!("voucher exists"),
            }
        }
        assert_eq!(claimed, 1);
        assert_eq!(already, 7);
    }
}
