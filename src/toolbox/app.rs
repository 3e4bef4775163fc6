//! The toolbox page controller.
//!
//! [`Toolbox`] owns the catalog and every piece of page state: search text, the active
//! chip, card visibility, favorites, the theme, the sidebar and the detail drawer. The
//! host forwards user input to it and re-renders from its accessors.
//!
//! ```rust
//! use devtoolbox::{CardAction, CategoryFilter, Toolbox, ToolboxConfig};
//! use devtoolbox::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! let mut toolbox = Toolbox::new(ToolboxConfig::default(), Arc::new(MemoryStorage::new()), true);
//! assert_eq!(toolbox.visible_count(), toolbox.cards().len());
//!
//! toolbox.set_search_text("qr");
//! assert_eq!(toolbox.visible_count(), 1);
//!
//! toolbox.click_card("UUID Generator", CardAction::ToggleFavorite).unwrap();
//! toolbox.set_search_text("");
//! toolbox.select_chip(CategoryFilter::Favorite);
//! assert_eq!(toolbox.visible_count(), 1);
//! ```

use crate::toolbox::catalog::{default_catalog, RouteTable, ToolCard};
use crate::toolbox::config::ToolboxConfig;
use crate::toolbox::drawer::{
    DetailDrawer, DrawerState, FullToolOutcome, PreviewLoader, PreviewRequest,
    NOT_CONFIGURED_MESSAGE,
};
use crate::toolbox::event::{self, EventHandler, ToolboxEvent};
use crate::toolbox::filter::{filter_cards, CategoryFilter, FilterOutcome, FilterState};
use crate::toolbox::preferences::{Preferences, Theme};
use crate::toolbox::storage::KeyValueStorage;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Where on a card the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// The star button.
    ToggleFavorite,
    /// The primary "open" button: recorded as recent, then shows the drawer.
    Open,
    /// Anywhere else on the card: shows the drawer only.
    Select,
}

/// Key presses the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// A category chip and whether it is the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip {
    pub filter: CategoryFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolboxError {
    /// No card has this title.
    UnknownTool(String),
}

impl fmt::Display for ToolboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolboxError::UnknownTool(title) => write!(f, "Unknown tool: {}", title),
        }
    }
}

impl Error for ToolboxError {}

pub struct Toolbox {
    config: ToolboxConfig,
    cards: Vec<ToolCard>,
    routes: RouteTable,
    prefs: Preferences,
    chips: Vec<Chip>,
    query: String,
    theme: Theme,
    sidebar_open: bool,
    drawer: DetailDrawer,
    pending_preview: Option<PreviewRequest>,
    outcome: FilterOutcome,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl Toolbox {
    /// Build the page with the built-in catalog and routes.
    ///
    /// `prefers_dark` is the OS colour-scheme preference, used only when no theme has
    /// been stored yet.
    pub fn new(config: ToolboxConfig, storage: Arc<dyn KeyValueStorage>, prefers_dark: bool) -> Self {
        Self::with_catalog(
            config,
            storage,
            prefers_dark,
            default_catalog(),
            RouteTable::builtin(),
        )
    }

    /// Build the page around a custom catalog. Runs the same init sequence as the page:
    /// theme, favorite reconciliation, `all` chip, first filter pass.
    pub fn with_catalog(
        config: ToolboxConfig,
        storage: Arc<dyn KeyValueStorage>,
        prefers_dark: bool,
        cards: Vec<ToolCard>,
        routes: RouteTable,
    ) -> Self {
        let prefs = Preferences::new(storage, &config);
        let theme = prefs.init_theme(prefers_dark);
        let chips = CategoryFilter::chips()
            .into_iter()
            .map(|filter| Chip {
                filter,
                active: filter == CategoryFilter::All,
            })
            .collect();

        let mut toolbox = Self {
            config,
            cards,
            routes,
            prefs,
            chips,
            query: String::new(),
            theme,
            sidebar_open: false,
            drawer: DetailDrawer::new(),
            pending_preview: None,
            outcome: FilterOutcome::default(),
            event_handler: None,
        };
        toolbox.reconcile_favorites();
        toolbox.refilter();
        log::info!(
            "toolbox ready: {} tools, theme {}, {} visible",
            toolbox.cards.len(),
            toolbox.theme,
            toolbox.outcome.visible_count
        );
        toolbox
    }

    /// Route host notifications (alerts, new windows) to `handler`.
    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn config(&self) -> &ToolboxConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    // ── Catalog & filter ─────────────────────────────────────────────────

    pub fn cards(&self) -> &[ToolCard] {
        &self.cards
    }

    pub fn card(&self, title: &str) -> Option<&ToolCard> {
        let title = title.trim();
        self.cards.iter().find(|c| c.title.trim() == title)
    }

    /// Cards that pass the last filter run, in grid order.
    pub fn visible_cards(&self) -> Vec<&ToolCard> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(i, _)| self.outcome.is_visible(*i))
            .map(|(_, c)| c)
            .collect()
    }

    /// Value of the grid's visible-count attribute.
    pub fn visible_count(&self) -> usize {
        self.outcome.visible_count
    }

    pub fn filter_outcome(&self) -> &FilterOutcome {
        &self.outcome
    }

    pub fn search_text(&self) -> &str {
        &self.query
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn active_filter(&self) -> CategoryFilter {
        self.chips
            .iter()
            .find(|c| c.active)
            .map(|c| c.filter)
            .unwrap_or_default()
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.query.clone(), self.active_filter())
    }

    /// Search input changed.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> &FilterOutcome {
        self.query = text.into();
        self.refilter()
    }

    /// A chip was clicked; it becomes the only active one.
    pub fn select_chip(&mut self, filter: CategoryFilter) -> &FilterOutcome {
        for chip in &mut self.chips {
            chip.active = chip.filter == filter;
        }
        self.refilter()
    }

    fn refilter(&mut self) -> &FilterOutcome {
        let favorites = self.prefs.favorite_titles();
        self.outcome = filter_cards(&self.cards, &self.filter_state(), &favorites);
        &self.outcome
    }

    // ── Favorites & recent ───────────────────────────────────────────────

    fn reconcile_favorites(&mut self) {
        let favorites = self.prefs.favorite_titles();
        for card in &mut self.cards {
            let title = card.title.trim();
            card.favorite = favorites.iter().any(|f| f == title);
        }
    }

    /// Flip the favorite flag of `title` and persist the favorite set. Returns the new
    /// flag. The grid is not refiltered until the next search or chip event.
    pub fn toggle_favorite(&mut self, title: &str) -> Result<bool, ToolboxError> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.title.trim() == title.trim())
            .ok_or_else(|| ToolboxError::UnknownTool(title.to_string()))?;
        card.favorite = !card.favorite;
        let active = card.favorite;
        let title = card.title.trim().to_string();
        self.prefs.set_favorite(&title, active);
        log::debug!("favorite '{}' -> {}", title, active);
        Ok(active)
    }

    pub fn favorite_titles(&self) -> Vec<String> {
        self.prefs.favorite_titles()
    }

    pub fn recent_titles(&self) -> Vec<String> {
        self.prefs.recent_titles()
    }

    // ── Card clicks & drawer ─────────────────────────────────────────────

    /// Dispatch a click on the card titled `title`.
    ///
    /// Returns the preview the host should load when the drawer was opened.
    pub fn click_card(
        &mut self,
        title: &str,
        action: CardAction,
    ) -> Result<Option<PreviewRequest>, ToolboxError> {
        match action {
            CardAction::ToggleFavorite => {
                self.toggle_favorite(title)?;
                Ok(None)
            }
            CardAction::Open => {
                let title = self.require_card(title)?.title.trim().to_string();
                self.prefs.mark_recent(&title);
                self.open_detail(&title)
            }
            CardAction::Select => self.open_detail(title),
        }
    }

    fn require_card(&self, title: &str) -> Result<&ToolCard, ToolboxError> {
        self.card(title)
            .ok_or_else(|| ToolboxError::UnknownTool(title.to_string()))
    }

    /// Show the detail drawer for `title`.
    pub fn open_detail(&mut self, title: &str) -> Result<Option<PreviewRequest>, ToolboxError> {
        let card = self.require_card(title)?.clone();
        let request = self.drawer.open(&card, &self.routes);
        self.pending_preview = request.clone();
        Ok(request)
    }

    pub fn drawer(&self) -> &DetailDrawer {
        &self.drawer
    }

    pub fn drawer_state(&self) -> DrawerState {
        self.drawer.state()
    }

    /// Report a preview load result from the host.
    pub fn preview_finished(&mut self, generation: u64, loaded: bool) -> bool {
        if self
            .pending_preview
            .as_ref()
            .is_some_and(|p| p.generation == generation)
        {
            self.pending_preview = None;
        }
        if loaded {
            self.drawer.preview_loaded(generation)
        } else {
            self.drawer.preview_failed(generation)
        }
    }

    /// Load the pending preview with `loader` and apply the result.
    pub async fn load_preview(&mut self, loader: &dyn PreviewLoader) -> DrawerState {
        if let Some(request) = self.pending_preview.clone() {
            let loaded = match loader.load(&request.source).await {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("preview '{}' failed: {}", request.source, err);
                    false
                }
            };
            self.preview_finished(request.generation, loaded);
        }
        self.drawer.state()
    }

    /// Overlay click or close button.
    pub fn close_drawer(&mut self) {
        self.pending_preview = None;
        self.drawer.close();
    }

    /// Keyboard input. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: impl Into<Key>) -> bool {
        match key.into() {
            Key::Escape => {
                self.close_drawer();
                true
            }
            Key::Other => false,
        }
    }

    /// "Open full tool" button in the drawer.
    pub async fn open_full_tool(&mut self) -> FullToolOutcome {
        self.pending_preview = None;
        let outcome = self.drawer.open_full_tool(&self.routes);
        let event = match &outcome {
            FullToolOutcome::Open(url) => ToolboxEvent::OpenWindow { url: url.clone() },
            FullToolOutcome::NotConfigured => {
                log::warn!("no route configured for the displayed tool");
                ToolboxEvent::Alert {
                    message: NOT_CONFIGURED_MESSAGE.to_string(),
                }
            }
        };
        event::emit(self.event_handler.as_ref(), event).await;
        outcome
    }

    // ── Theme & sidebar ──────────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.prefs.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Flip the sidebar and return the new `aria-expanded` value.
    pub fn toggle_sidebar(&mut self) -> &'static str {
        self.sidebar_open = !self.sidebar_open;
        if self.sidebar_open {
            "true"
        } else {
            "false"
        }
    }
}
