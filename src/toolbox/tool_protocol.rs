//! Executable tool layer.
//!
//! Buttons on the toolbox page are bound to tool names rather than to functions. A
//! [`ToolProtocol`] implementation owns a family of tools and executes them from JSON
//! parameters; the [`ToolRegistry`] indexes every tool by name and validates required
//! parameters before dispatching.
//!
//! ```text
//! host button → ToolRegistry::execute_tool("aes_encrypt", {...}) → ToolProtocol → CryptoDemo
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use devtoolbox::tool_protocol::ToolRegistry;
//! use devtoolbox::tool_protocols::CryptoDemoProtocol;
//! use devtoolbox::crypto::CryptoDemo;
//! use devtoolbox::ToolboxConfig;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let demo = Arc::new(CryptoDemo::new(&ToolboxConfig::default()));
//! let mut registry = ToolRegistry::new();
//! registry.add_protocol(Arc::new(CryptoDemoProtocol::new(demo))).await?;
//!
//! let result = registry
//!     .execute_tool("base64_encode", serde_json::json!({"text": "hello"}))
//!     .await?;
//! assert_eq!(result.output["result"], "aGVsbG8=");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Outcome of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: serde_json::Value,
    /// User-facing message when `success` is false.
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: serde_json::Value) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            output: serde_json::Value::Null,
            error: Some(error),
        }
    }
}

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ToolParameterType {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ToolParameterType,
    pub description: Option<String>,
    pub required: bool,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, param_type: ToolParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: None,
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Name, description and parameters of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Check that every required parameter is present with the declared JSON type.
    pub fn validate(&self, parameters: &serde_json::Value) -> Result<(), ToolError> {
        for param in &self.parameters {
            match parameters.get(&param.name) {
                None | Some(serde_json::Value::Null) if param.required => {
                    return Err(ToolError::InvalidParameters(format!(
                        "'{}' requires parameter '{}'",
                        self.name, param.name
                    )));
                }
                None | Some(serde_json::Value::Null) => {}
                Some(value) => {
                    let ok = match param.param_type {
                        ToolParameterType::String => value.is_string(),
                        ToolParameterType::Number => value.is_number(),
                        ToolParameterType::Boolean => value.is_boolean(),
                    };
                    if !ok {
                        return Err(ToolError::InvalidParameters(format!(
                            "parameter '{}' of '{}' must be a {:?}",
                            param.name, self.name, param.param_type
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A family of tools behind one execution backend.
#[async_trait]
pub trait ToolProtocol: Send + Sync {
    async fn execute(
        &self,
        tool_name: &str,
        parameters: serde_json::Value,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>>;

    async fn list_tools(&self) -> Result<Vec<ToolMetadata>, Box<dyn Error + Send + Sync>>;

    async fn get_tool_metadata(
        &self,
        tool_name: &str,
    ) -> Result<ToolMetadata, Box<dyn Error + Send + Sync>>;

    /// Protocol identifier, e.g. `"crypto-demo"`.
    fn protocol_name(&self) -> &str;
}

/// Error types for tool operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// No registered protocol provides this tool.
    NotFound(String),
    /// Parameters are missing or have the wrong type.
    InvalidParameters(String),
    /// Two protocols tried to register the same tool name.
    Conflict(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::NotFound(name) => write!(f, "Tool not found: {}", name),
            ToolError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            ToolError::Conflict(name) => write!(f, "Tool already registered: {}", name),
        }
    }
}

impl Error for ToolError {}

struct RegisteredTool {
    metadata: ToolMetadata,
    protocol: Arc<dyn ToolProtocol>,
}

/// Index of tools across protocols.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every tool `protocol` lists. Fails without registering anything if a
    /// tool name is already taken.
    pub async fn add_protocol(
        &mut self,
        protocol: Arc<dyn ToolProtocol>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let listed = protocol.list_tools().await?;
        if let Some(dup) = listed.iter().find(|m| self.tools.contains_key(&m.name)) {
            return Err(Box::new(ToolError::Conflict(dup.name.clone())));
        }
        let count = listed.len();
        for metadata in listed {
            log::debug!(
                "registry: '{}' from protocol '{}'",
                metadata.name,
                protocol.protocol_name()
            );
            self.tools.insert(
                metadata.name.clone(),
                RegisteredTool {
                    metadata,
                    protocol: Arc::clone(&protocol),
                },
            );
        }
        Ok(count)
    }

    pub fn get_tool(&self, name: &str) -> Option<&ToolMetadata> {
        self.tools.get(name).map(|t| &t.metadata)
    }

    /// Metadata for all registered tools, sorted by name.
    pub fn list_tools(&self) -> Vec<&ToolMetadata> {
        let mut tools: Vec<&ToolMetadata> = self.tools.values().map(|t| &t.metadata).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: serde_json::Value,
    ) -> Result<ToolResult, Box<dyn Error + Send + Sync>> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;
        tool.metadata.validate(&parameters)?;
        tool.protocol.execute(tool_name, parameters).await
    }
}
