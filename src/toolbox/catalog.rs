//! Tool catalog: the cards shown in the grid and the static route table behind them.
//!
//! Routes are keyed by a stable tool id. Lookup by exact title is kept because the
//! detail drawer only knows the title it is currently displaying.
//!
//! ```rust
//! use devtoolbox::catalog::{default_catalog, RouteTable};
//!
//! let routes = RouteTable::builtin();
//! let cards = default_catalog();
//! for card in &cards {
//!     assert!(routes.by_title(&card.title).is_some());
//! }
//! assert!(routes.by_title("Password Generator").is_none());
//! ```

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of card categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Encode,
    Format,
    Generate,
    Crypto,
    Network,
    Media,
    #[default]
    Misc,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Encode,
        Category::Format,
        Category::Generate,
        Category::Crypto,
        Category::Network,
        Category::Media,
        Category::Misc,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Encode => "encode",
            Category::Format => "format",
            Category::Generate => "generate",
            Category::Crypto => "crypto",
            Category::Network => "network",
            Category::Media => "media",
            Category::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCard {
    /// Stable identifier, also the key into the [`RouteTable`].
    pub id: String,
    /// Display title; unique across the catalog.
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the favorite button is active. Reconciled against stored preferences.
    #[serde(default)]
    pub favorite: bool,
}

impl ToolCard {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            tags: Vec::new(),
            favorite: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Tags joined the way they are rendered in the card's tag attribute.
    pub fn tag_string(&self) -> String {
        self.tags.join(" ")
    }

    /// All text a user can see on the card.
    pub fn visible_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title.trim(),
            self.description.trim(),
            self.category.slug(),
            self.tag_string()
        )
    }
}

/// Where a tool's preview and full page live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRoute {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub full: String,
}

impl ToolRoute {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        preview: impl Into<String>,
        full: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preview: preview.into(),
            full: full.into(),
        }
    }
}

/// Immutable mapping from tool id to [`ToolRoute`].
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<ToolRoute>,
}

lazy_static! {
    static ref BUILTIN_ROUTES: Vec<ToolRoute> = vec![
        ToolRoute::new("base64", "Base64 Encode/Decode", "tools/base64.html", "tools/base64.html"),
        ToolRoute::new("json", "JSON Formatter/Validator", "tools/json.html", "tools/json.html"),
        ToolRoute::new("uuid", "UUID Generator", "tools/uuid.html", "tools/uuid.html"),
        ToolRoute::new("hash", "Hash Calculator", "tools/hash.html", "tools/hash.html"),
        ToolRoute::new("http", "HTTP Request Tester", "tools/http.html", "tools/http.html"),
        ToolRoute::new("image", "Image Compressor", "tools/image.html", "tools/image.html"),
        ToolRoute::new("qrcode", "QR Code Generator", "tools/qrcode.html", "tools/qrcode.html"),
    ];
}

impl RouteTable {
    pub fn new(routes: Vec<ToolRoute>) -> Self {
        Self { routes }
    }

    /// Routes for the built-in tool pages.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ROUTES.clone())
    }

    pub fn by_id(&self, id: &str) -> Option<&ToolRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Exact match against the trimmed title.
    pub fn by_title(&self, title: &str) -> Option<&ToolRoute> {
        let title = title.trim();
        self.routes.iter().find(|r| r.title == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Cards for the built-in tools, in grid order.
pub fn default_catalog() -> Vec<ToolCard> {
    vec![
        ToolCard::new(
            "base64",
            "Base64 Encode/Decode",
            "Convert text to and from Base64, UTF-8 safe.",
            Category::Encode,
        )
        .with_tags(["base64", "encode", "decode", "text"]),
        ToolCard::new(
            "json",
            "JSON Formatter/Validator",
            "Pretty-print, minify and validate JSON documents.",
            Category::Format,
        )
        .with_tags(["json", "format", "validate", "pretty"]),
        ToolCard::new(
            "uuid",
            "UUID Generator",
            "Generate random v4 UUIDs in bulk.",
            Category::Generate,
        )
        .with_tags(["uuid", "guid", "random", "id"]),
        ToolCard::new(
            "hash",
            "Hash Calculator",
            "Compute MD5, SHA-1 and SHA-256 digests of text.",
            Category::Crypto,
        )
        .with_tags(["hash", "md5", "sha1", "sha256", "digest"]),
        ToolCard::new(
            "http",
            "HTTP Request Tester",
            "Send HTTP requests and inspect status, headers and body.",
            Category::Network,
        )
        .with_tags(["http", "api", "request", "rest"]),
        ToolCard::new(
            "image",
            "Image Compressor",
            "Shrink PNG and JPEG images in the browser.",
            Category::Media,
        )
        .with_tags(["image", "compress", "png", "jpeg"]),
        ToolCard::new(
            "qrcode",
            "QR Code Generator",
            "Render text or URLs as downloadable QR codes.",
            Category::Generate,
        )
        .with_tags(["qrcode", "qr", "barcode", "url"]),
    ]
}
