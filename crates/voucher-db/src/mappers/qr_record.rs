//! QR record entity <-> model mapper

use voucher_core::entities::QrRecord;
use voucher_core::value_objects::Snowflake;

use crate::models::QrRecordModel;

impl From<QrRecordModel> for QrRecord {
    fn from(model: QrRecordModel) -> Self {
        QrRecord {
            release_id: Snowflake::new(model.release_id),
            payload: model.payload,
            created_at: model.created_at,
        }
    }
}
