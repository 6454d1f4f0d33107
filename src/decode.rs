//! Payload decoding and checksum verification.
//!
//! Not needed to produce a BR Code; exists so generated payloads can be
//! inspected and round-trip tested, and so externally supplied strings can
//! be validated before display.

use crate::crc::crc16;
use crate::error::{PixError, Result};
use crate::tlv::{ID_ADDITIONAL_DATA, ID_CRC, ID_MERCHANT_ACCOUNT};

/// Length of the trailing checksum in characters.
const CRC_DIGITS: usize = 4;

/// Shortest conceivable payload: one field header plus the CRC field.
const MIN_PAYLOAD_LEN: usize = 8;

/// A decoded field value: plain text, or a parsed template (fields 26/62).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Leaf value, verbatim from the payload.
    Text(String),
    /// Nested TLV sequence.
    Template(Vec<DecodedField>),
}

impl FieldValue {
    /// Returns the text content, or `None` for a template.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Template(_) => None,
        }
    }

    /// Returns the nested fields, or `None` for a leaf.
    pub fn as_template(&self) -> Option<&[DecodedField]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Template(fields) => Some(fields),
        }
    }
}

/// One decoded TLV field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    /// 2-digit field identifier.
    pub id: String,
    /// Decoded value.
    pub value: FieldValue,
}

/// A fully decoded payload: fields in order of appearance plus the checksum
/// verdict.
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    /// Top-level fields in the order they appear in the payload.
    pub fields: Vec<DecodedField>,
    /// Whether the trailing CRC matches a recomputation over the payload.
    pub checksum_valid: bool,
}

impl DecodedPayload {
    /// Looks up a top-level field by ID (first occurrence).
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.id == id).map(|f| &f.value)
    }

    /// Top-level field IDs in order of appearance.
    pub fn field_order(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.id.as_str()).collect()
    }
}

/// Decodes `payload` into its field tree and verifies the checksum.
///
/// The last 4 characters are reserved as the checksum digits: field values
/// may not extend into them, and the CRC field (63) claims them as its value
/// since they are appended after its header at encoding time. Templates 26
/// (merchant account information) and 62 (additional data) are parsed
/// recursively.
///
/// The checksum is recomputed with [`crc16`] over everything before the
/// reserved digits and compared case-insensitively; a mismatch sets
/// `checksum_valid` to `false` rather than erroring, so a
/// tampered-but-parseable payload can still be inspected.
///
/// Returns [`PixError::MalformedPayload`] when the TLV grammar is violated:
/// a non-numeric ID or length header, or a declared length overrunning the
/// input that remains before the checksum digits.
pub fn decode_payload(payload: &str) -> Result<DecodedPayload> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(PixError::MalformedPayload {
            offset: 0,
            reason: format!(
                "payload is {} characters, shorter than the {}-character minimum",
                payload.len(),
                MIN_PAYLOAD_LEN
            ),
        });
    }

    let limit = payload.len() - CRC_DIGITS;
    let mut fields = Vec::new();
    let mut saw_crc = false;
    let mut pos = 0;

    while pos < limit {
        let id = read_digits(payload, pos, 0, "field ID")?;
        let len_digits = read_digits(payload, pos + 2, 0, "field length")?;
        // Two decimal digits, so this cannot fail.
        let len: usize = len_digits.parse().unwrap_or(0);

        if id == ID_CRC {
            // The declared length names the 4 digits appended after this
            // header; claim the payload tail and stop.
            let digits = payload.get(limit..).unwrap_or_default();
            fields.push(DecodedField {
                id: id.to_string(),
                value: FieldValue::Text(digits.to_string()),
            });
            saw_crc = len == CRC_DIGITS && pos + 4 == limit;
            break;
        }

        let value_start = pos + 4;
        let value_end = value_start + len;
        let value = if value_end <= limit {
            payload.get(value_start..value_end)
        } else {
            None
        };
        let value = value.ok_or_else(|| PixError::MalformedPayload {
            offset: pos,
            reason: format!(
                "field {} declares length {} but only {} characters of value remain",
                id,
                len,
                limit.saturating_sub(value_start)
            ),
        })?;

        let value = if id == ID_MERCHANT_ACCOUNT || id == ID_ADDITIONAL_DATA {
            FieldValue::Template(parse_template(value, value_start)?)
        } else {
            FieldValue::Text(value.to_string())
        };

        fields.push(DecodedField {
            id: id.to_string(),
            value,
        });
        pos = value_end;
    }

    let checksum_valid = saw_crc && {
        match (payload.get(..limit), payload.get(limit..)) {
            (Some(body), Some(digits)) => crc16(body).eq_ignore_ascii_case(digits),
            _ => false,
        }
    };

    Ok(DecodedPayload {
        fields,
        checksum_valid,
    })
}

/// Parses a nested TLV sequence. `base` is the offset of `input` within the
/// whole payload, for error reporting.
fn parse_template(input: &str, base: usize) -> Result<Vec<DecodedField>> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let id = read_digits(input, pos, base, "field ID")?;
        let len_digits = read_digits(input, pos + 2, base, "field length")?;
        let len: usize = len_digits.parse().unwrap_or(0);

        let value_start = pos + 4;
        let value_end = value_start + len;
        let value = input.get(value_start..value_end).ok_or_else(|| {
            PixError::MalformedPayload {
                offset: base + pos,
                reason: format!(
                    "field {} declares length {} but only {} characters of value remain",
                    id,
                    len,
                    input.len().saturating_sub(value_start)
                ),
            }
        })?;

        fields.push(DecodedField {
            id: id.to_string(),
            value: FieldValue::Text(value.to_string()),
        });
        pos = value_end;
    }

    Ok(fields)
}

/// Reads 2 ASCII digits at `pos`, or fails with a grammar error.
fn read_digits<'a>(input: &'a str, pos: usize, base: usize, what: &str) -> Result<&'a str> {
    let digits = input
        .get(pos..pos + 2)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| PixError::MalformedPayload {
            offset: base + pos,
            reason: format!("expected 2-digit {}", what),
        })?;
    Ok(digits)
}
