//! TLV (tag-length-value) field encoding.
//!
//! Every BR Code field is `ID(2 digits) + LENGTH(2 digits, decimal,
//! zero-padded) + VALUE`. Template fields (merchant account information,
//! additional data) are themselves TLV sequences whose encoded form becomes
//! the VALUE of the outer field.

use crate::error::{PixError, Result};

/// Maximum value length representable by a 2-digit decimal length header.
pub const MAX_VALUE_LEN: usize = 99;

/// Payload format indicator.
pub const ID_PAYLOAD_FORMAT: &str = "00";
/// Merchant account information template.
pub const ID_MERCHANT_ACCOUNT: &str = "26";
/// Merchant category code.
pub const ID_CATEGORY_CODE: &str = "52";
/// Transaction currency (ISO 4217 numeric).
pub const ID_CURRENCY: &str = "53";
/// Transaction amount.
pub const ID_AMOUNT: &str = "54";
/// Country code (ISO 3166-1 alpha-2).
pub const ID_COUNTRY: &str = "58";
/// Merchant name.
pub const ID_MERCHANT_NAME: &str = "59";
/// Merchant city.
pub const ID_MERCHANT_CITY: &str = "60";
/// Additional data field template.
pub const ID_ADDITIONAL_DATA: &str = "62";
/// CRC16 checksum.
pub const ID_CRC: &str = "63";

/// Inside template 26: globally unique identifier of the PIX arrangement.
pub const ID_ACCOUNT_GUI: &str = "00";
/// Inside template 26: the receiving PIX key.
pub const ID_ACCOUNT_KEY: &str = "01";
/// Inside template 62: transaction reference (txid).
pub const ID_DATA_TXID: &str = "05";

/// Encodes one field as `ID + LEN + VALUE`.
///
/// The length header reflects the byte length of `value` exactly as passed;
/// no normalization or truncation happens at this layer. Values longer than
/// [`MAX_VALUE_LEN`] cannot carry a 2-digit header and are rejected with
/// [`PixError::FieldTooLong`].
pub fn encode_field(id: &str, value: &str) -> Result<String> {
    debug_assert_eq!(id.len(), 2, "field IDs are exactly 2 digits");

    let len = value.len();
    if len > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            id: id.to_string(),
            len,
        });
    }

    Ok(format!("{}{:02}{}", id, len, value))
}
