//! Customer entity <-> model mapper

use voucher_core::entities::Customer;
use voucher_core::value_objects::Snowflake;

use crate::models::CustomerModel;

impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        Customer {
            id: Snowflake::new(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
