//! Detail drawer: the slide-in panel that previews a tool.
//!
//! # State machine
//!
//! ```text
//!            open(card)                 preview ok
//! Closed ───────────────▶ Loading ─────────────────▶ Loaded
//!   ▲                        │
//!   │                        │ preview failed
//!   │                        ▼
//!   └──── close() ◀──── LoadError        (close() is valid from every state)
//! ```
//!
//! Opening from any state restarts at `Loading`. Each opening bumps a generation
//! counter, and preview completions carrying an older generation are discarded, so a
//! slow load for a previous card can never flip the state of the current one.

use crate::toolbox::catalog::{RouteTable, ToolCard};
use crate::toolbox::config::ToolboxConfig;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Text shown while the preview is loading.
pub const LOADING_MESSAGE: &str = "Loading preview...";

/// Text shown when the preview fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load, please try again later.";

/// Alert raised when the full tool page has no route.
pub const NOT_CONFIGURED_MESSAGE: &str = "Tool page not configured";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Loading,
    Loaded,
    LoadError,
}

/// Text fields copied from the selected card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerContent {
    pub title: String,
    pub description: String,
    /// `"Category: <slug> | Tags: <tags>"`
    pub meta: String,
}

impl DrawerContent {
    fn from_card(card: &ToolCard) -> Self {
        Self {
            title: card.title.trim().to_string(),
            description: card.description.trim().to_string(),
            meta: format!(
                "Category: {} | Tags: {}",
                card.category.slug(),
                card.tag_string()
            ),
        }
    }
}

/// A preview the host (or a [`PreviewLoader`]) should fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub source: String,
    pub generation: u64,
}

/// Result of the "open full tool" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullToolOutcome {
    /// Open this URL in a new browsing context.
    Open(String),
    /// No route for the drawer's title.
    NotConfigured,
}

#[derive(Debug)]
pub struct DetailDrawer {
    state: DrawerState,
    content: Option<DrawerContent>,
    preview_source: Option<String>,
    status_text: String,
    generation: u64,
}

impl Default for DetailDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailDrawer {
    pub fn new() -> Self {
        Self {
            state: DrawerState::Closed,
            content: None,
            preview_source: None,
            status_text: LOADING_MESSAGE.to_string(),
            generation: 0,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DrawerState::Closed
    }

    /// `aria-hidden` value for both the overlay and the drawer.
    pub fn aria_hidden(&self) -> &'static str {
        if self.is_open() {
            "false"
        } else {
            "true"
        }
    }

    pub fn content(&self) -> Option<&DrawerContent> {
        self.content.as_ref()
    }

    /// Title currently displayed, if any.
    pub fn title(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.title.as_str())
    }

    pub fn preview_source(&self) -> Option<&str> {
        self.preview_source.as_deref()
    }

    /// Loading indicator text; switches to the error message on failure.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show `card` and start loading its preview.
    ///
    /// Returns the preview to fetch, or `None` when the card has no route, in which case
    /// the drawer stays in `Loading` with no preview source.
    pub fn open(&mut self, card: &ToolCard, routes: &RouteTable) -> Option<PreviewRequest> {
        self.generation += 1;
        self.state = DrawerState::Loading;
        self.status_text = LOADING_MESSAGE.to_string();

        let content = DrawerContent::from_card(card);
        self.preview_source = routes.by_title(&content.title).map(|r| r.preview.clone());
        log::debug!(
            "drawer: open '{}' (generation {}, preview {:?})",
            content.title,
            self.generation,
            self.preview_source
        );
        self.content = Some(content);

        self.preview_source.clone().map(|source| PreviewRequest {
            source,
            generation: self.generation,
        })
    }

    /// Preview for `generation` finished loading. Returns whether the state changed.
    pub fn preview_loaded(&mut self, generation: u64) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.state = DrawerState::Loaded;
        true
    }

    /// Preview for `generation` failed. Returns whether the state changed.
    pub fn preview_failed(&mut self, generation: u64) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.state = DrawerState::LoadError;
        self.status_text = LOAD_ERROR_MESSAGE.to_string();
        true
    }

    fn accepts(&self, generation: u64) -> bool {
        let fresh = self.state == DrawerState::Loading && generation == self.generation;
        if !fresh {
            log::debug!(
                "drawer: ignoring stale preview completion (generation {}, current {}, {:?})",
                generation,
                self.generation,
                self.state
            );
        }
        fresh
    }

    /// Hide the drawer and clear the preview source. Valid from every state.
    pub fn close(&mut self) {
        if self.state != DrawerState::Closed {
            log::debug!("drawer: close from {:?}", self.state);
        }
        self.state = DrawerState::Closed;
        self.preview_source = None;
    }

    /// Resolve the full tool page for the displayed title, then close.
    pub fn open_full_tool(&mut self, routes: &RouteTable) -> FullToolOutcome {
        let outcome = match self.title().and_then(|t| routes.by_title(t)) {
            Some(route) => FullToolOutcome::Open(route.full.clone()),
            None => FullToolOutcome::NotConfigured,
        };
        self.close();
        outcome
    }
}

/// Error from a [`PreviewLoader`].
#[derive(Debug, Clone)]
pub struct PreviewError {
    message: String,
}

impl PreviewError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preview error: {}", self.message)
    }
}

impl Error for PreviewError {}

/// Fetches a preview resource; the stand-in for the drawer's embedded frame.
#[async_trait]
pub trait PreviewLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<(), PreviewError>;
}

/// Loads previews from files below a site root.
#[derive(Debug, Clone)]
pub struct FsPreviewLoader {
    root: PathBuf,
}

impl FsPreviewLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at the configured site root.
    pub fn from_config(config: &ToolboxConfig) -> Self {
        Self::new(config.site_root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl PreviewLoader for FsPreviewLoader {
    async fn load(&self, source: &str) -> Result<(), PreviewError> {
        let path = self.root.join(source.trim_start_matches('/'));
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| PreviewError::new(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(PreviewError::new(format!(
                "{} is not a file",
                path.display()
            )));
        }
        tokio::fs::read(&path)
            .await
            .map_err(|e| PreviewError::new(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbox::catalog::{default_catalog, Category};

    fn uuid_card() -> ToolCard {
        default_catalog()
            .into_iter()
            .find(|c| c.id == "uuid")
            .unwrap()
    }

    #[test]
    fn test_open_sets_content_and_preview() {
        let mut drawer = DetailDrawer::new();
        assert_eq!(drawer.aria_hidden(), "true");

        let request = drawer.open(&uuid_card(), &RouteTable::builtin()).unwrap();
        assert_eq!(request.source, "tools/uuid.html");
        assert_eq!(drawer.state(), DrawerState::Loading);
        assert_eq!(drawer.aria_hidden(), "false");

        let content = drawer.content().unwrap();
        assert_eq!(content.title, "UUID Generator");
        assert_eq!(content.meta, "Category: generate | Tags: uuid guid random id");
    }

    #[test]
    fn test_load_error_then_reopen_resets_status() {
        let mut drawer = DetailDrawer::new();
        let routes = RouteTable::builtin();
        let req = drawer.open(&uuid_card(), &routes).unwrap();
        assert!(drawer.preview_failed(req.generation));
        assert_eq!(drawer.state(), DrawerState::LoadError);
        assert_eq!(drawer.status_text(), LOAD_ERROR_MESSAGE);

        drawer.open(&uuid_card(), &routes).unwrap();
        assert_eq!(drawer.status_text(), LOADING_MESSAGE);
    }

    #[test]
    fn test_unrouted_card_stays_loading() {
        let mut drawer = DetailDrawer::new();
        let card = ToolCard::new("x", "Unlisted", "no page", Category::Misc);
        assert!(drawer.open(&card, &RouteTable::builtin()).is_none());
        assert_eq!(drawer.state(), DrawerState::Loading);
        assert!(drawer.preview_source().is_none());
    }

    #[test]
    fn test_completion_after_close_is_ignored() {
        let mut drawer = DetailDrawer::new();
        let req = drawer.open(&uuid_card(), &RouteTable::builtin()).unwrap();
        drawer.close();
        assert!(!drawer.preview_loaded(req.generation));
        assert_eq!(drawer.state(), DrawerState::Closed);
    }
}
