//! AES in CBC mode with PKCS#7 padding.
//!
//! Key and IV are taken as UTF-8 text. The key length picks the variant (16 bytes for
//! AES-128, 24 for AES-192, 32 for AES-256) and the IV must be exactly one block. The
//! ciphertext is carried as Base64 text.

use super::{base64_codec, CryptoError};
use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// AES block size, and therefore the required IV length.
pub const BLOCK_SIZE: usize = 16;

fn check_material(key: &[u8], iv: &[u8]) -> Result<(), CryptoError> {
    if !matches!(key.len(), 16 | 24 | 32) {
        return Err(CryptoError::InvalidKey(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            key.len()
        )));
    }
    if iv.len() != BLOCK_SIZE {
        return Err(CryptoError::InvalidKey(format!(
            "IV must be {} bytes, got {}",
            BLOCK_SIZE,
            iv.len()
        )));
    }
    Ok(())
}

fn invalid_length(_: cbc::cipher::InvalidLength) -> CryptoError {
    CryptoError::InvalidKey("key or IV has the wrong length".to_string())
}

/// Encrypt raw bytes.
pub fn encrypt_bytes(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_material(key, iv)?;
    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };
    Ok(ciphertext)
}

/// Decrypt raw bytes. A wrong key or corrupted input usually shows up as bad padding.
pub fn decrypt_bytes(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_material(key, iv)?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::DecryptionFailed(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }
    let unpadded = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(invalid_length)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    };
    unpadded.map_err(|_| CryptoError::DecryptionFailed("invalid padding".to_string()))
}

/// Encrypt UTF-8 text and return Base64 ciphertext.
pub fn encrypt(plaintext: &str, key: &str, iv: &str) -> Result<String, CryptoError> {
    let ciphertext = encrypt_bytes(plaintext.as_bytes(), key.as_bytes(), iv.as_bytes())?;
    Ok(base64_codec::encode_bytes(&ciphertext))
}

/// Decrypt Base64 ciphertext back to UTF-8 text.
pub fn decrypt(ciphertext: &str, key: &str, iv: &str) -> Result<String, CryptoError> {
    let raw = base64_codec::decode_bytes(ciphertext)?;
    let plaintext = decrypt_bytes(&raw, key.as_bytes(), iv.as_bytes())?;
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::DecryptionFailed("plaintext is not UTF-8 text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "1234567890abcdef";
    const IV: &str = "abcdef1234567890";

    #[test]
    fn test_deterministic_for_fixed_key_and_iv() {
        let a = encrypt("attack at dawn", KEY, IV).unwrap();
        let b = encrypt("attack at dawn", KEY, IV).unwrap();
        assert_eq!(a, b);
        assert_eq!(decrypt(&a, KEY, IV).unwrap(), "attack at dawn");
    }

    #[test]
    fn test_padding_always_adds_a_block_when_aligned() {
        let ct = encrypt_bytes(&[0u8; 16], KEY.as_bytes(), IV.as_bytes()).unwrap();
        assert_eq!(ct.len(), 32);
        let ct = encrypt_bytes(b"", KEY.as_bytes(), IV.as_bytes()).unwrap();
        assert_eq!(ct.len(), 16);
    }

    #[test]
    fn test_all_key_sizes() {
        for key in [KEY, "1234567890abcdef12345678", "1234567890abcdef1234567890abcdef"] {
            let ct = encrypt("key size check", key, IV).unwrap();
            assert_eq!(decrypt(&ct, key, IV).unwrap(), "key size check");
        }
    }

    #[test]
    fn test_bad_key_material() {
        assert!(matches!(encrypt("x", "short", IV), Err(CryptoError::InvalidKey(_))));
        assert!(matches!(encrypt("x", KEY, "short"), Err(CryptoError::InvalidKey(_))));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let ct = encrypt_bytes(b"hello world", KEY.as_bytes(), IV.as_bytes()).unwrap();
        let truncated = base64_codec::encode_bytes(&ct[..10]);
        assert!(matches!(
            decrypt(&truncated, KEY, IV),
            Err(CryptoError::DecryptionFailed(_))
        ));
    }
}
