//! Tool protocol implementations.
//!
//! - **CryptoDemoProtocol**: exposes the [`CryptoDemo`] operations as named tools
//!
//! | tool             | parameters                        | output `result`          |
//! |------------------|-----------------------------------|--------------------------|
//! | `base64_encode`  | `text`                            | Base64 string            |
//! | `base64_decode`  | `text`                            | decoded UTF-8 text       |
//! | `aes_encrypt`    | `text`, optional `key`, `iv`      | Base64 ciphertext        |
//! | `aes_decrypt`    | `text`, optional `key`, `iv`      | plaintext                |
//! | `rsa_generate`   | none                              | new public key PEM       |
//! | `rsa_public_key` | none                              | current public key PEM   |
//! | `rsa_encrypt`    | `text`                            | Base64 ciphertext        |
//! | `rsa_decrypt`    | `text`                            | plaintext                |
//!
//! Operation failures come back as [`ToolResult::failure`] with the user-facing message.
//! Unknown tools and missing or mistyped parameters are returned as `Err`, whether the
//! protocol is called directly or through a registry.

use crate::toolbox::crypto::{CryptoDemo, CryptoError};
use crate::toolbox::tool_protocol::{
    ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolProtocol, ToolResult,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::error::Error;
use std::sync::Arc;

pub struct CryptoDemoProtocol {
    demo: Arc<CryptoDemo>,
}

impl CryptoDemoProtocol {
    pub fn new(demo: Arc<CryptoDemo>) -> Self {
        Self { demo }
    }

    fn text_param(description: &str) -> ToolParameter {
        ToolParameter::new("text", ToolParameterType::String)
            .with_description(description)
            .required()
    }

    fn key_params(metadata: ToolMetadata) -> ToolMetadata {
        metadata
            .with_parameter(
                ToolParameter::new("key", ToolParameterType::String)
                    .with_description("AES key as UTF-8 text (16, 24 or 32 bytes)"),
            )
            .with_parameter(
                ToolParameter::new("iv", ToolParameterType::String)
                    .with_description("CBC initialisation vector as UTF-8 text (16 bytes)"),
            )
    }

    fn catalog() -> Vec<ToolMetadata> {
        vec![
            ToolMetadata::new("base64_encode", "Encode UTF-8 text as Base64")
                .with_parameter(Self::text_param("Text to encode")),
            ToolMetadata::new("base64_decode", "Decode Base64 into UTF-8 text")
                .with_parameter(Self::text_param("Base64 input")),
            Self::key_params(
                ToolMetadata::new("aes_encrypt", "AES-CBC/PKCS#7 encrypt text to Base64")
                    .with_parameter(Self::text_param("Plaintext")),
            ),
            Self::key_params(
                ToolMetadata::new("aes_decrypt", "AES-CBC/PKCS#7 decrypt Base64 ciphertext")
                    .with_parameter(Self::text_param("Base64 ciphertext")),
            ),
            ToolMetadata::new("rsa_generate", "Generate a new RSA-1024 key pair"),
            ToolMetadata::new("rsa_public_key", "Export the RSA public key as PEM"),
            ToolMetadata::new("rsa_encrypt", "RSA-OAEP/SHA-256 encrypt text to Base64")
                .with_parameter(Self::text_param("Plaintext, at most 62 bytes")),
            ToolMetadata::new("rsa_decrypt", "RSA-OAEP/SHA-256 decrypt Base64 ciphertext")
                .with_parameter(Self::text_param("Base64 ciphertext")),
        ]
    }

    fn into_result(outcome: Result<String, CryptoError>) -> ToolResult {
        match outcome {
            Ok(value) => ToolResult::success(serde_json::json!({ "result": value })),
            Err(err) => {
                log::warn!("crypto tool failed: {}", err);
                ToolResult::failure(err.to_string())
            }
        }
    }
}

#[async_trait]
impl ToolProtocol for CryptoDemoProtocol {
    async fn execute(
        &self,
        tool_name: &str,
        parameters: JsonValue,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        let metadata = Self::catalog()
            .into_iter()
            .find(|m| m.name == tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;
        metadata.validate(&parameters)?;

        // Tools without a `text` parameter never read it.
        let text = parameters.get("text").and_then(|v| v.as_str()).unwrap_or_default();
        let key = parameters.get("key").and_then(|v| v.as_str());
        let iv = parameters.get("iv").and_then(|v| v.as_str());

        let outcome = match tool_name {
            "base64_encode" => self.demo.try_base64_encode(text),
            "base64_decode" => self.demo.try_base64_decode(text),
            "aes_encrypt" => self.demo.try_aes_encrypt(text, key, iv),
            "aes_decrypt" => self.demo.try_aes_decrypt(text, key, iv),
            "rsa_generate" => self.demo.try_rsa_generate().await,
            "rsa_public_key" => self.demo.try_rsa_public_key().await,
            "rsa_encrypt" => self.demo.try_rsa_encrypt(text).await,
            "rsa_decrypt" => self.demo.try_rsa_decrypt(text).await,
            other => return Err(Box::new(ToolError::NotFound(other.to_string()))),
        };
        Ok(Self::into_result(outcome))
    }

    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>> {
        Ok(Self::catalog())
    }

    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>> {
        Self::catalog()
            .into_iter()
            .find(|m| m.name == tool_name)
            .ok_or_else(|| {
                Box::new(ToolError::NotFound(tool_name.to_string())) as Box<dyn Error + Send + Sync>
            })
    }

    fn protocol_name(&self) -> &str {
        "crypto-demo"
    }
}
