//! Crypto demo operations.
//!
//! Four small utilities bound to buttons on the toolbox page. None of them implement
//! cipher math; every primitive comes from the `base64`, `aes`/`cbc` and `rsa` crates.
//!
//! - **Base64**: UTF-8 text encode/decode
//! - **AES**: CBC + PKCS#7 with a caller-supplied or default key/IV
//! - **RSA**: lazily generated 1024-bit key pair, OAEP with SHA-256
//!
//! [`CryptoDemo`] offers two faces for each operation. `try_*` methods return
//! `Result<String, CryptoError>` and are used by the tool protocol. The plain methods are
//! what buttons call: on failure they log the error, raise an
//! [`Alert`](crate::event::ToolboxEvent::Alert) and return an empty string.
//!
//! ```rust,no_run
//! use devtoolbox::crypto::CryptoDemo;
//! use devtoolbox::ToolboxConfig;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let demo = CryptoDemo::new(&ToolboxConfig::default());
//! assert_eq!(demo.base64_encode("hello").await, "aGVsbG8=");
//!
//! // The first RSA call generates the key pair.
//! let ciphertext = demo.rsa_encrypt("secret").await;
//! assert_eq!(demo.rsa_decrypt(&ciphertext).await, "secret");
//! # }
//! ```

pub mod aes_cbc;
pub mod base64_codec;
pub mod rsa_oaep;

pub use rsa_oaep::{RsaKeyPair, RSA_KEY_BITS};

use crate::toolbox::config::ToolboxConfig;
use crate::toolbox::event::{self, EventHandler, ToolboxEvent};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Error types for crypto demo operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input text could not be decoded (bad Base64, not UTF-8).
    MalformedInput(String),
    /// Key or IV has the wrong size.
    InvalidKey(String),
    /// The underlying crypto service failed (key generation, worker crash, export).
    Unavailable(String),
    /// Decrypt was requested before any RSA key pair exists.
    MissingKeyPair,
    /// Encryption was rejected (e.g. message too long for the RSA modulus).
    EncryptionFailed(String),
    /// Wrong key or corrupted ciphertext.
    DecryptionFailed(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            CryptoError::InvalidKey(msg) => write!(f, "Invalid key material: {}", msg),
            CryptoError::Unavailable(msg) => write!(f, "Crypto service unavailable: {}", msg),
            CryptoError::MissingKeyPair => {
                write!(f, "No RSA key pair available, generate or encrypt first")
            }
            CryptoError::EncryptionFailed(msg) => write!(f, "Encryption failed: {}", msg),
            CryptoError::DecryptionFailed(msg) => write!(f, "Decryption failed: {}", msg),
        }
    }
}

impl Error for CryptoError {}

/// Crypto demo component. Owns the lazily generated RSA key pair.
pub struct CryptoDemo {
    default_aes_key: String,
    default_aes_iv: String,
    // Held across generation so concurrent first callers share one key pair.
    keypair: Mutex<Option<Arc<RsaKeyPair>>>,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl CryptoDemo {
    pub fn new(config: &ToolboxConfig) -> Self {
        Self {
            default_aes_key: config.default_aes_key.clone(),
            default_aes_iv: config.default_aes_iv.clone(),
            keypair: Mutex::new(None),
            event_handler: None,
        }
    }

    /// Route failure alerts to `handler`.
    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    // ── Result-returning operations ──────────────────────────────────────

    pub fn try_base64_encode(&self, text: &str) -> Result<String, CryptoError> {
        Ok(base64_codec::encode(text))
    }

    pub fn try_base64_decode(&self, encoded: &str) -> Result<String, CryptoError> {
        base64_codec::decode(encoded)
    }

    pub fn try_aes_encrypt(
        &self,
        plaintext: &str,
        key: Option<&str>,
        iv: Option<&str>,
    ) -> Result<String, CryptoError> {
        aes_cbc::encrypt(
            plaintext,
            key.unwrap_or(&self.default_aes_key),
            iv.unwrap_or(&self.default_aes_iv),
        )
    }

    pub fn try_aes_decrypt(
        &self,
        ciphertext: &str,
        key: Option<&str>,
        iv: Option<&str>,
    ) -> Result<String, CryptoError> {
        aes_cbc::decrypt(
            ciphertext,
            key.unwrap_or(&self.default_aes_key),
            iv.unwrap_or(&self.default_aes_iv),
        )
    }

    /// Replace the key pair with a freshly generated one and return its public PEM.
    pub async fn try_rsa_generate(&self) -> Result<String, CryptoError> {
        let mut slot = self.keypair.lock().await;
        let pair = Arc::new(generate_keypair().await?);
        let pem = pair.public_key_pem()?;
        *slot = Some(pair);
        Ok(pem)
    }

    /// Public PEM of the current key pair, generating one first if needed.
    pub async fn try_rsa_public_key(&self) -> Result<String, CryptoError> {
        self.ensure_keypair().await?.public_key_pem()
    }

    /// Encrypt UTF-8 text to Base64 ciphertext, generating a key pair first if needed.
    pub async fn try_rsa_encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let pair = self.ensure_keypair().await?;
        let ciphertext = pair.encrypt(plaintext.as_bytes())?;
        Ok(base64_codec::encode_bytes(&ciphertext))
    }

    /// Decrypt Base64 ciphertext. Requires an existing key pair.
    pub async fn try_rsa_decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let pair = self
            .keypair
            .lock()
            .await
            .clone()
            .ok_or(CryptoError::MissingKeyPair)?;
        let raw = base64_codec::decode_bytes(ciphertext)?;
        let plaintext = pair.decrypt(&raw)?;
        String::from_utf8(plaintext)
            .map_err(|_| CryptoError::DecryptionFailed("plaintext is not UTF-8 text".to_string()))
    }

    pub async fn has_keypair(&self) -> bool {
        self.keypair.lock().await.is_some()
    }

    async fn ensure_keypair(&self) -> Result<Arc<RsaKeyPair>, CryptoError> {
        let mut slot = self.keypair.lock().await;
        if let Some(pair) = slot.as_ref() {
            return Ok(Arc::clone(pair));
        }
        let pair = Arc::new(generate_keypair().await?);
        *slot = Some(Arc::clone(&pair));
        Ok(pair)
    }

    // ── Button-facing operations ─────────────────────────────────────────

    pub async fn base64_encode(&self, text: &str) -> String {
        let result = self.try_base64_encode(text);
        self.settle("base64_encode", result).await
    }

    pub async fn base64_decode(&self, encoded: &str) -> String {
        let result = self.try_base64_decode(encoded);
        self.settle("base64_decode", result).await
    }

    pub async fn aes_encrypt(&self, plaintext: &str, key: Option<&str>, iv: Option<&str>) -> String {
        let result = self.try_aes_encrypt(plaintext, key, iv);
        self.settle("aes_encrypt", result).await
    }

    pub async fn aes_decrypt(&self, ciphertext: &str, key: Option<&str>, iv: Option<&str>) -> String {
        let result = self.try_aes_decrypt(ciphertext, key, iv);
        self.settle("aes_decrypt", result).await
    }

    pub async fn rsa_generate(&self) -> String {
        let result = self.try_rsa_generate().await;
        self.settle("rsa_generate", result).await
    }

    pub async fn rsa_public_key(&self) -> String {
        let result = self.try_rsa_public_key().await;
        self.settle("rsa_public_key", result).await
    }

    pub async fn rsa_encrypt(&self, plaintext: &str) -> String {
        let result = self.try_rsa_encrypt(plaintext).await;
        self.settle("rsa_encrypt", result).await
    }

    pub async fn rsa_decrypt(&self, ciphertext: &str) -> String {
        let result = self.try_rsa_decrypt(ciphertext).await;
        self.settle("rsa_decrypt", result).await
    }

    async fn settle(&self, operation: &str, result: Result<String, CryptoError>) -> String {
        match result {
            Ok(value) => value,
            Err(err) => {
                log::error!("{} failed: {}", operation, err);
                event::emit(
                    self.event_handler.as_ref(),
                    ToolboxEvent::Alert {
                        message: err.to_string(),
                    },
                )
                .await;
                String::new()
            }
        }
    }
}

async fn generate_keypair() -> Result<RsaKeyPair, CryptoError> {
    log::debug!("generating {}-bit RSA key pair", RSA_KEY_BITS);
    tokio::task::spawn_blocking(RsaKeyPair::generate)
        .await
        .map_err(|e| CryptoError::Unavailable(format!("key generation task failed: {}", e)))?
}
