//! # PIX BR Code
//!
//! A generator and validator for static PIX "Copia e Cola" payloads, the
//! Brazilian instant-payment profile of the EMV Merchant-Presented QR Code
//! standard.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts carry exactly 2 decimal places via
//!   `rust_decimal`
//! - **Pure encoding**: payload generation is a side-effect-free function of
//!   merchant constants and amount
//! - **Verifiable output**: every payload embeds a CRC-16/CCITT-FALSE
//!   checksum, and a decoder is provided to check it
//! - **Streaming batches**: the CSV batch generator processes one charge
//!   row at a time
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use pix_brcode::{decode_payload, Amount, Merchant};
//!
//! let merchant = Merchant::new("12345678900", "Fulano de Tal", "São Paulo").unwrap();
//! let payload = merchant.payload(Amount::from_str("12.50").unwrap()).unwrap();
//!
//! let decoded = decode_payload(&payload).unwrap();
//! assert!(decoded.checksum_valid);
//! ```

pub mod amount;
pub mod batch;
pub mod crc;
pub mod decode;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod tlv;

pub use amount::Amount;
pub use batch::{BatchGenerator, ChargeRecord};
pub use crc::crc16;
pub use decode::{decode_payload, DecodedField, DecodedPayload, FieldValue};
pub use error::{PixError, Result};
pub use normalize::normalize;
pub use payload::{Merchant, PIX_GUI, TXID_WILDCARD};
pub use tlv::encode_field;
