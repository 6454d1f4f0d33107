//! CRC-16/CCITT-FALSE checksum engine.
//!
//! Parameters fixed by the BR Code standard: initial register `0xFFFF`,
//! polynomial `0x1021`, MSB-first, no reflection, no final XOR. Computed
//! bit-by-bit; the payloads involved are short enough that a lookup table
//! buys nothing.

/// CRC polynomial mandated by the standard.
const POLYNOMIAL: u16 = 0x1021;

/// Initial register value.
const INITIAL: u16 = 0xFFFF;

/// Computes the 16-bit checksum of `payload` and formats it as 4 uppercase
/// hexadecimal digits, zero-padded.
///
/// Deterministic and pure. Input is processed as raw bytes; payload text is
/// ASCII by construction upstream, so bytes and characters coincide.
///
/// ```
/// assert_eq!(pix_brcode::crc16("123456789"), "29B1");
/// ```
pub fn crc16(payload: &str) -> String {
    format!("{:04X}", crc16_register(payload.as_bytes()))
}

/// Runs the shift register over `bytes` and returns the final value.
fn crc16_register(bytes: &[u8]) -> u16 {
    let mut register = INITIAL;

    for &byte in bytes {
        for bit in (0..8).rev() {
            let c15 = (register >> 15) & 1 == 1;
            let input_bit = (byte >> bit) & 1 == 1;
            register <<= 1;
            if c15 != input_bit {
                register ^= POLYNOMIAL;
            }
        }
    }

    register
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_returns_initial_register() {
        // No bits processed, so the register never leaves its init value.
        assert_eq!(crc16(""), "FFFF");
    }

    #[test]
    fn test_standard_check_value() {
        // "123456789" is the canonical check string for CRC-16/CCITT-FALSE.
        assert_eq!(crc16("123456789"), "29B1");
    }

    #[test]
    fn test_single_byte_vectors() {
        assert_eq!(crc16("A"), "B915");
        assert_eq!(crc16("0"), "D7A3");
    }

    #[test]
    fn test_output_is_zero_padded() {
        let digest = crc16("123456789");
        assert_eq!(digest.len(), 4);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_determinism() {
        let input = "00020126580014BR.GOV.BCB.PIX";
        assert_eq!(crc16(input), crc16(input));
    }

    #[test]
    fn test_sensitivity_to_single_character_change() {
        assert_ne!(crc16("00020101"), crc16("00020102"));
    }
}
