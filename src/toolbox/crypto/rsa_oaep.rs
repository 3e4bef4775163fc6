//! RSA key pair with OAEP/SHA-256 padding.
//!
//! With a 1024-bit modulus and SHA-256, OAEP can encrypt at most 62 bytes per message.

use super::CryptoError;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

pub const RSA_KEY_BITS: usize = 1024;

/// In-memory key pair. Never serialized.
#[derive(Clone)]
pub struct RsaKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("bits", &RSA_KEY_BITS)
            .finish_non_exhaustive()
    }
}

impl RsaKeyPair {
    /// Generate a fresh key pair. CPU-bound; call from a blocking context.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::Unavailable(format!("RSA key generation failed: {}", e)))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// Public key as SPKI PEM (`-----BEGIN PUBLIC KEY-----`).
    pub fn public_key_pem(&self) -> Result<String, CryptoError> {
        self.public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::Unavailable(format!("public key export failed: {}", e)))
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut rng = rand::thread_rng();
        self.public
            .encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.private
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
    }
}
