//! QR payload written at issuance and read back by the scanner

use serde::{Deserialize, Serialize};

use crate::entities::{Customer, Release};
use crate::value_objects::{Discount, Snowflake};

/// JSON document encoded into every newly issued voucher's QR image.
///
/// Key names are fixed: printed vouchers are read by scanners of every
/// version, so renaming a field would strand them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    #[serde(rename = "customerID")]
    pub customer_id: Snowflake,
    #[serde(rename = "voucherID")]
    pub voucher_id: Snowflake,
    #[serde(rename = "releasedID")]
    pub released_id: Snowflake,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// Written as text, e.g. `"20"`
    #[serde(with = "discount_text")]
    pub discount: Discount,
    /// Event code the voucher was released under
    #[serde(rename = "voucherCode")]
    pub voucher_code: String,
}

impl QrPayload {
    pub fn new(release: &Release, customer: &Customer, discount: Discount) -> Self {
        Self {
            customer_id: customer.id,
            voucher_id: release.voucher_id,
            released_id: release.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
            discount,
            voucher_code: release.event_code.clone(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

mod discount_text {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::value_objects::Discount;

    pub fn serialize<S: Serializer>(discount: &Discount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&discount.percent())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Discount, D::Error> {
        let text = String::deserialize(deserializer)?;
        let percent = text.trim().parse::<u8>().map_err(D::Error::custom)?;
        Discount::new(percent).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{normalize, Reference};

    fn sample() -> QrPayload {
        let customer = Customer::new(
            Snowflake::new(11),
            "Ana".to_string(),
            "Cruz".to_string(),
            "ana@example.com".to_string(),
            "09171234567".to_string(),
        );
        let release = Release::new(Snowflake::new(33), customer.id, Snowflake::new(22), "ATK-001".to_string());
        QrPayload::new(&release, &customer, Discount::new(20).unwrap())
    }

    #[test]
    fn test_encoded_keys() {
        let json: serde_json::Value = serde_json::from_str(&sample().encode().unwrap()).unwrap();
        assert_eq!(json["customerID"], "11");
        assert_eq!(json["voucherID"], "22");
        assert_eq!(json["releasedID"], "33");
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["phoneNumber"], "09171234567");
        assert_eq!(json["discount"], "20");
        assert_eq!(json["voucherCode"], "ATK-001");
    }

    #[test]
    fn test_discount_text_reads_back() {
        let payload = sample();
        let decoded: QrPayload = serde_json::from_str(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);

        let raw = payload.encode().unwrap().replace(r#""discount":"20""#, r#""discount":"120""#);
        assert!(serde_json::from_str::<QrPayload>(&raw).is_err());
    }

    #[test]
    fn test_encoded_payload_normalizes_to_release() {
        let raw = sample().encode().unwrap();
        assert_eq!(normalize(&raw), Reference::ByRelease("33".to_string()));
    }
}
