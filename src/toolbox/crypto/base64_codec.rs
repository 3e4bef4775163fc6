//! UTF-8 text to Base64 and back.
//!
//! Decoding is as forgiving as a browser's `atob`: ASCII whitespace is ignored, padding
//! is optional and non-zero trailing bits are accepted. The decoded bytes must still be
//! valid UTF-8.

use super::CryptoError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Standard, padded Base64 of the UTF-8 bytes of `text`.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Raw bytes to standard, padded Base64.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64 to raw bytes, leniently.
pub fn decode_bytes(encoded: &str) -> Result<Vec<u8>, CryptoError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    LENIENT
        .decode(compact.as_bytes())
        .map_err(|e| CryptoError::MalformedInput(format!("not valid Base64 ({})", e)))
}

/// Base64 back to UTF-8 text.
pub fn decode(encoded: &str) -> Result<String, CryptoError> {
    let bytes = decode_bytes(encoded)?;
    String::from_utf8(bytes)
        .map_err(|_| CryptoError::MalformedInput("decoded bytes are not UTF-8 text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello() {
        assert_eq!(encode("hello"), "aGVsbG8=");
        assert_eq!(decode("aGVsbG8=").unwrap(), "hello");
    }

    #[test]
    fn test_multibyte_text() {
        let text = "密码 ✓ déjà vu 🚀";
        assert_eq!(decode(&encode(text)).unwrap(), text);
    }

    #[test]
    fn test_lenient_decoding() {
        assert_eq!(decode("aGVs bG8\n").unwrap(), "hello");
        assert_eq!(decode("aGVsbG8").unwrap(), "hello");
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(decode("@@@"), Err(CryptoError::MalformedInput(_))));
        // 0xFF 0xFE is valid Base64 but not UTF-8.
        assert!(matches!(decode("//4="), Err(CryptoError::MalformedInput(_))));
    }
}
