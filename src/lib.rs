//! # devtoolbox
//!
//! The logic layer behind a developer "toolbox" page: a searchable, filterable grid of
//! small utilities plus a handful of in-page crypto demos. Rendering is left to the host
//! (a web view, a TUI, a test); this crate owns the state and the rules.
//!
//! The crate provides:
//!
//! * **Catalog & filtering**: [`catalog`] holds the tool cards and the route table,
//!   [`filter`] decides which cards are visible for a search text and category chip
//! * **Preferences**: [`preferences`] persists theme, favorites and the recent list
//!   through any [`storage::KeyValueStorage`], best-effort
//! * **Detail drawer**: [`drawer`] is the `Closed → Loading → Loaded | LoadError`
//!   preview panel
//! * **Page controller**: [`Toolbox`] wires the above to user input the way the page does
//! * **Crypto demos**: [`crypto::CryptoDemo`] for Base64, AES-CBC and RSA-OAEP, also
//!   reachable by name through [`tool_protocol::ToolRegistry`]
//!
//! ## Catalog
//!
//! ```rust
//! use devtoolbox::{CardAction, CategoryFilter, Toolbox, ToolboxConfig};
//! use devtoolbox::catalog::Category;
//! use devtoolbox::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! let mut toolbox = Toolbox::new(ToolboxConfig::default(), Arc::new(MemoryStorage::new()), false);
//!
//! toolbox.select_chip(CategoryFilter::Only(Category::Generate));
//! assert_eq!(toolbox.visible_count(), 2);
//!
//! // The primary button records the tool as recent and opens the drawer.
//! let preview = toolbox.click_card("UUID Generator", CardAction::Open).unwrap();
//! assert_eq!(preview.unwrap().source, "tools/uuid.html");
//! assert_eq!(toolbox.recent_titles(), vec!["UUID Generator"]);
//!
//! toolbox.handle_key("Escape");
//! assert!(!toolbox.drawer().is_open());
//! ```
//!
//! ## Crypto demos
//!
//! ```rust,no_run
//! use devtoolbox::crypto::CryptoDemo;
//! use devtoolbox::ToolboxConfig;
//!
//! # #[tokio::main]
//! # async fn main() {
//! devtoolbox::init_logger();
//!
//! let demo = CryptoDemo::new(&ToolboxConfig::default());
//! let ciphertext = demo.aes_encrypt("hello", None, None).await;
//! assert_eq!(demo.aes_decrypt(&ciphertext, None, None).await, "hello");
//!
//! // Failures alert and return an empty string instead of an error.
//! assert_eq!(demo.rsa_decrypt("AAAA").await, "");
//! # }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Hosts embedding the toolbox can opt in to `RUST_LOG` driven diagnostics without
/// choosing a logging backend up front.
///
/// ```rust
/// devtoolbox::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

pub mod toolbox;

// Re-exporting key items for easier external access.
pub use toolbox::app::{CardAction, Chip, Key, Toolbox, ToolboxError};
pub use toolbox::catalog;
pub use toolbox::config;
pub use toolbox::config::ToolboxConfig;
pub use toolbox::crypto;
pub use toolbox::drawer;
pub use toolbox::event;
pub use toolbox::filter;
pub use toolbox::filter::{CategoryFilter, FilterState};
pub use toolbox::preferences;
pub use toolbox::preferences::Theme;
pub use toolbox::storage;
pub use toolbox::tool_protocol;
pub use toolbox::tool_protocols;
