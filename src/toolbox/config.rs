//! Configuration for the toolbox.
//!
//! Provides the [`ToolboxConfig`] struct, which collects the storage key names, the
//! recent-list limit, the site root used to resolve tool previews and the default AES
//! key material for the crypto demo. Users construct it manually; there is no
//! config-file parsing.
//!
//! # Example
//!
//! ```rust
//! use devtoolbox::ToolboxConfig;
//! use std::path::PathBuf;
//!
//! // Defaults: "it_tools_*" storage keys, 12 recent entries, current directory as site root
//! let config = ToolboxConfig::default();
//! assert_eq!(config.recent_limit, 12);
//!
//! // Or point previews at a deployed site
//! let config = ToolboxConfig {
//!     site_root: PathBuf::from("/srv/toolbox"),
//!     ..ToolboxConfig::default()
//! };
//! ```

use std::path::PathBuf;

/// Maximum number of titles kept in the recently-used list.
pub const DEFAULT_RECENT_LIMIT: usize = 12;

/// Default AES-128 key used when the caller does not supply one (16 UTF-8 bytes).
pub const DEFAULT_AES_KEY: &str = "1234567890abcdef";

/// Default CBC initialisation vector (16 UTF-8 bytes).
pub const DEFAULT_AES_IV: &str = "abcdef1234567890";

/// Names of the three keys the preferences layer reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Holds the plain theme mode string (`"light"` or `"dark"`).
    pub theme: String,
    /// Holds a JSON array of favorite tool titles.
    pub favorites: String,
    /// Holds a JSON array of recently opened tool titles, most recent first.
    pub recent: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "it_tools_theme".to_string(),
            favorites: "it_tools_favorites".to_string(),
            recent: "it_tools_recent".to_string(),
        }
    }
}

/// Global configuration for a [`Toolbox`](crate::Toolbox) and its
/// [`CryptoDemo`](crate::crypto::CryptoDemo).
#[derive(Debug, Clone)]
pub struct ToolboxConfig {
    /// Storage key names for theme, favorites and recent list.
    pub storage_keys: StorageKeys,
    /// Cap on the recently-used list.
    pub recent_limit: usize,
    /// Directory that preview and full-tool routes are resolved against by
    /// [`FsPreviewLoader`](crate::drawer::FsPreviewLoader).
    pub site_root: PathBuf,
    /// AES key used when a caller passes `None`.
    pub default_aes_key: String,
    /// AES IV used when a caller passes `None`.
    pub default_aes_iv: String,
}

impl Default for ToolboxConfig {
    /// ```rust
    /// use devtoolbox::ToolboxConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = ToolboxConfig::default();
    /// assert_eq!(config.storage_keys.favorites, "it_tools_favorites");
    /// assert_eq!(config.site_root, PathBuf::from("."));
    /// ```
    fn default() -> Self {
        Self {
            storage_keys: StorageKeys::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            site_root: PathBuf::from("."),
            default_aes_key: DEFAULT_AES_KEY.to_string(),
            default_aes_iv: DEFAULT_AES_IV.to_string(),
        }
    }
}
