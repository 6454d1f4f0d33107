//! Static BR Code payload assembly.
//!
//! Builds the complete "Copia e Cola" string for a merchant and an amount:
//! normalized merchant fields, the fixed EMV template constants, and the
//! trailing CRC16 checksum, in the field order the standard mandates.

use crate::amount::Amount;
use crate::crc::crc16;
use crate::error::{PixError, Result};
use crate::normalize::normalize;
use crate::tlv::{
    encode_field, ID_ACCOUNT_GUI, ID_ACCOUNT_KEY, ID_ADDITIONAL_DATA, ID_AMOUNT, ID_CATEGORY_CODE,
    ID_COUNTRY, ID_CRC, ID_CURRENCY, ID_DATA_TXID, ID_MERCHANT_ACCOUNT, ID_MERCHANT_CITY,
    ID_MERCHANT_NAME, ID_PAYLOAD_FORMAT,
};

/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";

/// Transaction reference meaning "no fixed reference" (dynamic).
pub const TXID_WILDCARD: &str = "***";

/// Maximum merchant name length after normalization.
pub const MAX_NAME_LEN: usize = 25;

/// Maximum merchant city length after normalization.
pub const MAX_CITY_LEN: usize = 15;

/// Maximum transaction reference length.
pub const MAX_TXID_LEN: usize = 25;

const PAYLOAD_FORMAT: &str = "01";
const CATEGORY_CODE: &str = "0000";
const CURRENCY_BRL: &str = "986";
const COUNTRY_BR: &str = "BR";

/// A PIX merchant: receiving key plus normalized display fields.
///
/// Name and city are normalized at construction (see [`normalize`]) and
/// truncated to the standard's 25/15 character limits, so payload assembly
/// never has to re-check them. Construction fails if either field normalizes
/// to an empty string; the standard treats both as mandatory.
#[derive(Debug, Clone)]
pub struct Merchant {
    key: String,
    name: String,
    city: String,
}

impl Merchant {
    /// Creates a merchant from a PIX key and human-readable name/city.
    ///
    /// The key is used verbatim (keys are case-sensitive identifiers:
    /// tax IDs, phone numbers, emails, or random UUIDs) apart from trimming.
    pub fn new(key: &str, name: &str, city: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(PixError::InvalidMerchant {
                field: "key",
                reason: "PIX key must not be empty".to_string(),
            });
        }

        let name = normalized_field(name, MAX_NAME_LEN);
        if name.is_empty() {
            return Err(PixError::InvalidMerchant {
                field: "name",
                reason: "merchant name is empty after normalization".to_string(),
            });
        }

        let city = normalized_field(city, MAX_CITY_LEN);
        if city.is_empty() {
            return Err(PixError::InvalidMerchant {
                field: "city",
                reason: "merchant city is empty after normalization".to_string(),
            });
        }

        Ok(Merchant {
            key: key.to_string(),
            name,
            city,
        })
    }

    /// The receiving PIX key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Normalized merchant name as it will appear in field 59.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized merchant city as it will appear in field 60.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Generates the complete payload for `amount` with the `***` wildcard
    /// transaction reference.
    pub fn payload(&self, amount: Amount) -> Result<String> {
        self.payload_with_txid(amount, TXID_WILDCARD)
    }

    /// Generates the complete payload for `amount` with an explicit
    /// transaction reference.
    ///
    /// `txid` must be the wildcard or 1-25 alphanumeric ASCII characters.
    pub fn payload_with_txid(&self, amount: Amount, txid: &str) -> Result<String> {
        validate_txid(txid)?;

        let account = format!(
            "{}{}",
            encode_field(ID_ACCOUNT_GUI, PIX_GUI)?,
            encode_field(ID_ACCOUNT_KEY, &self.key)?
        );
        let additional = encode_field(ID_DATA_TXID, txid)?;

        // Field order is fixed by the standard; reordering produces a payload
        // that decodes field-by-field but fails scanners.
        let mut payload = String::new();
        payload.push_str(&encode_field(ID_PAYLOAD_FORMAT, PAYLOAD_FORMAT)?);
        payload.push_str(&encode_field(ID_MERCHANT_ACCOUNT, &account)?);
        payload.push_str(&encode_field(ID_CATEGORY_CODE, CATEGORY_CODE)?);
        payload.push_str(&encode_field(ID_CURRENCY, CURRENCY_BRL)?);
        payload.push_str(&encode_field(ID_AMOUNT, &amount.to_string())?);
        payload.push_str(&encode_field(ID_COUNTRY, COUNTRY_BR)?);
        payload.push_str(&encode_field(ID_MERCHANT_NAME, &self.name)?);
        payload.push_str(&encode_field(ID_MERCHANT_CITY, &self.city)?);
        payload.push_str(&encode_field(ID_ADDITIONAL_DATA, &additional)?);

        // The checksum covers everything up to and including its own "6304"
        // header; the 4 hex digits land after the fact.
        payload.push_str(ID_CRC);
        payload.push_str("04");
        let digest = crc16(&payload);
        payload.push_str(&digest);

        Ok(payload)
    }
}

/// Normalizes and truncates a display field, re-trimming in case truncation
/// exposed a trailing space.
fn normalized_field(text: &str, max_len: usize) -> String {
    let mut value = normalize(text);
    value.truncate(max_len);
    value.trim_end().to_string()
}

fn validate_txid(txid: &str) -> Result<()> {
    if txid == TXID_WILDCARD {
        return Ok(());
    }
    if txid.is_empty() || txid.len() > MAX_TXID_LEN {
        return Err(PixError::InvalidTxid {
            txid: txid.to_string(),
            reason: format!("length must be 1-{} characters", MAX_TXID_LEN),
        });
    }
    if !txid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PixError::InvalidTxid {
            txid: txid.to_string(),
            reason: "only ASCII letters and digits are allowed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn merchant() -> Merchant {
        Merchant::new("12345678900", "Fulano de Tal", "São Paulo").unwrap()
    }

    #[test]
    fn test_known_payload_vector() {
        let payload = merchant().payload(Amount::from_str("12.50").unwrap()).unwrap();
        assert_eq!(
            payload,
            "00020126330014BR.GOV.BCB.PIX011112345678900520400005303986\
             540512.505802BR5913FULANO DE TAL6009SAO PAULO62070503***6304D86C"
        );
    }

    #[test]
    fn test_small_amount_vector() {
        let payload = merchant().payload(Amount::from_str("0.1").unwrap()).unwrap();
        assert!(payload.contains("54040.10"));
        assert!(payload.ends_with("6304372F"));
    }

    #[test]
    fn test_txid_vector() {
        let m = Merchant::new("fulano@example.com", "Fulano de Tal", "São Paulo").unwrap();
        let payload = m
            .payload_with_txid(Amount::from_str("1.00").unwrap(), "PED123")
            .unwrap();
        assert!(payload.contains("62100506PED123"));
        assert!(payload.ends_with("6304CD45"));
    }

    #[test]
    fn test_determinism() {
        let amount = Amount::from_str("42.00").unwrap();
        assert_eq!(
            merchant().payload(amount).unwrap(),
            merchant().payload(amount).unwrap()
        );
    }

    #[test]
    fn test_merchant_fields_normalized_and_truncated() {
        let m = Merchant::new(
            "chave",
            "Açougue São Jorge Ltda do Brasil",
            "Florianópolis de Cima",
        )
        .unwrap();
        assert_eq!(m.name(), "ACOUGUE SAO JORGE LTDA DO");
        assert_eq!(m.name().len(), MAX_NAME_LEN);
        assert_eq!(m.city().len(), MAX_CITY_LEN);
    }

    #[test]
    fn test_rejects_empty_merchant_fields() {
        assert!(Merchant::new("", "Nome", "Cidade").is_err());
        assert!(Merchant::new("chave", "!!!", "Cidade").is_err());
        assert!(Merchant::new("chave", "Nome", "漢字").is_err());
    }

    #[test]
    fn test_rejects_bad_txid() {
        let m = merchant();
        let amount = Amount::from_str("1.00").unwrap();
        assert!(m.payload_with_txid(amount, "").is_err());
        assert!(m.payload_with_txid(amount, "has space").is_err());
        assert!(m.payload_with_txid(amount, &"X".repeat(26)).is_err());
    }

    #[test]
    fn test_oversized_key_rejected() {
        // GUI (18) + key header (4) + key must fit in template 26's 99 bytes.
        let m = Merchant::new(&"k".repeat(90), "Nome", "Cidade").unwrap();
        let err = m.payload(Amount::from_str("1.00").unwrap()).unwrap_err();
        assert!(matches!(err, PixError::FieldTooLong { .. }));
    }
}
