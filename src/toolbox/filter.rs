//! Card visibility for the current search text and category chip.
//!
//! A card is shown when it matches both the search and the category:
//!
//! ```text
//! search:   query empty | query ⊂ tags | query ⊂ visible text   (case-insensitive)
//! category: all | favorite ∧ title ∈ favorites | recent | own category
//! ```
//!
//! `recent` deliberately does not restrict the grid; it behaves like `all`.

use crate::toolbox::catalog::{Category, ToolCard};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Value of a category chip. Its text form is the chip slug (`Display`/`FromStr`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Favorite,
    Recent,
    Only(Category),
}

impl CategoryFilter {
    pub fn slug(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Favorite => "favorite",
            CategoryFilter::Recent => "recent",
            CategoryFilter::Only(category) => category.slug(),
        }
    }

    /// Every chip in display order: the synthetic filters, then each category.
    pub fn chips() -> Vec<CategoryFilter> {
        let mut chips = vec![
            CategoryFilter::All,
            CategoryFilter::Favorite,
            CategoryFilter::Recent,
        ];
        chips.extend(Category::ALL.iter().copied().map(CategoryFilter::Only));
        chips
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(CategoryFilter::All),
            "favorite" => Ok(CategoryFilter::Favorite),
            "recent" => Ok(CategoryFilter::Recent),
            other => other.parse::<Category>().map(CategoryFilter::Only),
        }
    }
}

/// Search text plus selected chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Query as it is matched: trimmed and lowercased.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

/// Result of a filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visibility per card, in catalog order.
    pub visible: Vec<bool>,
    /// Number of `true` entries in `visible`; drives "no results" messaging.
    pub visible_count: usize,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }
}

fn matches_search(card: &ToolCard, query: &str) -> bool {
    query.is_empty()
        || card.tag_string().to_lowercase().contains(query)
        || card.visible_text().to_lowercase().contains(query)
}

fn matches_category(card: &ToolCard, filter: CategoryFilter, favorites: &HashSet<&str>) -> bool {
    match filter {
        CategoryFilter::All | CategoryFilter::Recent => true,
        CategoryFilter::Favorite => favorites.contains(card.title.trim()),
        CategoryFilter::Only(category) => card.category == category,
    }
}

/// Whether a single card is visible under `state`.
pub fn card_matches(card: &ToolCard, state: &FilterState, favorites: &[String]) -> bool {
    let favorites: HashSet<&str> = favorites.iter().map(String::as_str).collect();
    matches_search(card, &state.normalized_query())
        && matches_category(card, state.category, &favorites)
}

/// Compute visibility for every card. `favorites` is the persisted favorite-title set.
pub fn filter_cards(cards: &[ToolCard], state: &FilterState, favorites: &[String]) -> FilterOutcome {
    let query = state.normalized_query();
    let favorites: HashSet<&str> = favorites.iter().map(String::as_str).collect();

    let visible: Vec<bool> = cards
        .iter()
        .map(|card| {
            matches_search(card, &query) && matches_category(card, state.category, &favorites)
        })
        .collect();
    let visible_count = visible.iter().filter(|v| **v).count();

    log::debug!(
        "filter: query='{}' category={} -> {}/{} visible",
        query,
        state.category,
        visible_count,
        cards.len()
    );

    FilterOutcome {
        visible,
        visible_count,
    }
}
