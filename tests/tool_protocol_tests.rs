//! Crypto demo operations reached by name through the tool registry.

use devtoolbox::crypto::CryptoDemo;
use devtoolbox::tool_protocol::{ToolProtocol, ToolRegistry};
use devtoolbox::tool_protocols::CryptoDemoProtocol;
use devtoolbox::ToolboxConfig;
use serde_json::json;
use std::sync::Arc;

async fn registry() -> ToolRegistry {
    let demo = Arc::new(CryptoDemo::new(&ToolboxConfig::default()));
    let mut registry = ToolRegistry::new();
    registry
        .add_protocol(Arc::new(CryptoDemoProtocol::new(demo)))
        .await
        .unwrap();
    registry
}

#[tokio::test]
async fn test_all_crypto_tools_registered() {
    let registry = registry().await;
    let names: Vec<&str> = registry.list_tools().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "aes_decrypt",
            "aes_encrypt",
            "base64_decode",
            "base64_encode",
            "rsa_decrypt",
            "rsa_encrypt",
            "rsa_generate",
            "rsa_public_key",
        ]
    );
    let aes = registry.get_tool("aes_encrypt").unwrap();
    assert_eq!(aes.parameters.len(), 3);
    assert!(aes.parameters.iter().any(|p| p.name == "text" && p.required));
}

#[tokio::test]
async fn test_base64_tools() {
    let registry = registry().await;
    let encoded = registry
        .execute_tool("base64_encode", json!({"text": "hello"}))
        .await
        .unwrap();
    assert!(encoded.success);
    assert_eq!(encoded.output["result"], "aGVsbG8=");

    let failed = registry
        .execute_tool("base64_decode", json!({"text": "%%%"}))
        .await
        .unwrap();
    assert!(!failed.success);
    assert!(failed.error.unwrap().starts_with("Malformed input"));
}

#[tokio::test]
async fn test_aes_tools_with_explicit_key() {
    let registry = registry().await;
    let params = json!({
        "text": "via registry",
        "key": "abcdefghijklmnopqrstuvwx",
        "iv": "0000000000000000",
    });
    let encrypted = registry.execute_tool("aes_encrypt", params).await.unwrap();
    let ciphertext = encrypted.output["result"].as_str().unwrap().to_string();

    let decrypted = registry
        .execute_tool(
            "aes_decrypt",
            json!({"text": ciphertext, "key": "abcdefghijklmnopqrstuvwx", "iv": "0000000000000000"}),
        )
        .await
        .unwrap();
    assert_eq!(decrypted.output["result"], "via registry");
}

#[tokio::test]
async fn test_rsa_tools() {
    let registry = registry().await;

    let missing = registry
        .execute_tool("rsa_decrypt", json!({"text": "AAAA"}))
        .await
        .unwrap();
    assert!(!missing.success);

    let encrypted = registry
        .execute_tool("rsa_encrypt", json!({"text": "tool secret"}))
        .await
        .unwrap();
    assert!(encrypted.success);
    let decrypted = registry
        .execute_tool("rsa_decrypt", json!({"text": encrypted.output["result"]}))
        .await
        .unwrap();
    assert_eq!(decrypted.output["result"], "tool secret");

    let pem = registry
        .execute_tool("rsa_public_key", json!({}))
        .await
        .unwrap();
    assert!(pem.output["result"]
        .as_str()
        .unwrap()
        .contains("BEGIN PUBLIC KEY"));
}

#[tokio::test]
async fn test_missing_parameter_and_unknown_tool() {
    let registry = registry().await;
    assert!(registry
        .execute_tool("base64_encode", json!({}))
        .await
        .is_err());
    assert!(registry
        .execute_tool("sha256", json!({"text": "x"}))
        .await
        .is_err());
}

#[tokio::test]
async fn test_protocol_metadata_lookup() {
    let protocol = CryptoDemoProtocol::new(Arc::new(CryptoDemo::new(&ToolboxConfig::default())));
    assert_eq!(protocol.protocol_name(), "crypto-demo");
    let meta = protocol.get_tool_metadata("rsa_generate").await.unwrap();
    assert!(meta.parameters.is_empty());
    assert!(protocol.get_tool_metadata("nope").await.is_err());
}

#[tokio::test]
async fn test_direct_execute_rejects_missing_text() {
    let protocol = CryptoDemoProtocol::new(Arc::new(CryptoDemo::new(&ToolboxConfig::default())));
    let err = protocol
        .execute("base64_encode", json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid parameters"));

    assert!(protocol
        .execute("aes_encrypt", json!({"text": 42}))
        .await
        .is_err());

    let ok = protocol
        .execute("base64_encode", json!({"text": "hi"}))
        .await
        .unwrap();
    assert_eq!(ok.output["result"], "aGk=");
}
