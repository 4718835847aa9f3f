//! Voucher resolver
//!
//! Turns a scanned string or an admin-supplied id into a voucher bundle.
//! Printed vouchers carry several payload generations, so lookups run as an
//! ordered list of fallbacks and a miss at every step is `Ok(None)`, never
//! an error. Storage failures still propagate.

use tracing::{debug, instrument};
use voucher_core::entities::VoucherBundle;
use voucher_core::{normalize, Reference, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Voucher resolver service
pub struct ResolverService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ResolverService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Classify `raw` and resolve it
    pub async fn resolve(&self, raw: &str) -> ServiceResult<Option<VoucherBundle>> {
        let reference = normalize(raw);
        self.resolve_reference(&reference, raw).await
    }

    /// Resolve a classified reference.
    ///
    /// 1. release id: joined release bundle
    /// 2. voucher id (or a release candidate that missed): voucher-only bundle
    /// 3. cached QR payload equal to `raw`: step 1 with its release id, once
    #[instrument(skip(self, raw), fields(reference = %reference))]
    pub async fn resolve_reference(
        &self,
        reference: &Reference,
        raw: &str,
    ) -> ServiceResult<Option<VoucherBundle>> {
        if let Reference::ByRelease(id) = reference {
            if let Some(bundle) = self.by_release(id).await? {
                return Ok(Some(bundle));
            }
            debug!("no release matched");
        }

        if let Some(bundle) = self.by_voucher(reference.id()).await? {
            return Ok(Some(bundle));
        }
        debug!("no voucher matched");

        if let Some(record) = self.ctx.qr_repo().find_by_payload(raw).await? {
            debug!(release_id = %record.release_id, "matched cached QR payload");
            return Ok(self
                .ctx
                .release_repo()
                .find_bundle(record.release_id)
                .await?);
        }

        debug!("reference did not resolve");
        Ok(None)
    }

    /// Lookup order used by the admin screens: voucher id first, then
    /// release id. The result is hydrated.
    #[instrument(skip(self))]
    pub async fn find_for_edit(&self, id: &str) -> ServiceResult<Option<VoucherBundle>> {
        if let Some(bundle) = self.by_voucher(id).await? {
            return self.hydrate(bundle).await.map(Some);
        }
        self.by_release(id).await
    }

    /// Fill in release and customer for a voucher-only bundle. Bundles that
    /// already carry a release are returned unchanged.
    pub async fn hydrate(&self, bundle: VoucherBundle) -> ServiceResult<VoucherBundle> {
        if !bundle.is_partial() {
            return Ok(bundle);
        }

        let Some(release) = self
            .ctx
            .release_repo()
            .find_by_voucher(bundle.voucher.id)
            .await?
        else {
            return Ok(bundle);
        };

        let customer = self
            .ctx
            .customer_repo()
            .find_by_id(release.customer_id)
            .await?;
        Ok(VoucherBundle::new(bundle.voucher, release, customer))
    }

    async fn by_release(&self, id: &str) -> ServiceResult<Option<VoucherBundle>> {
        let Ok(id) = Snowflake::parse(id) else {
            return Ok(None);
        };
        Ok(self.ctx.release_repo().find_bundle(id).await?)
    }

    async fn by_voucher(&self, id: &str) -> ServiceResult<Option<VoucherBundle>> {
        let Ok(id) = Snowflake::parse(id) else {
            return Ok(None);
        };
        let voucher = self.ctx.voucher_repo().find_by_id(id).await?;
        Ok(voucher.map(VoucherBundle::voucher_only))
    }
}
