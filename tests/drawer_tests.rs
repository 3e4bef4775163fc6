//! Detail drawer lifecycle through the `Toolbox` controller.

use async_trait::async_trait;
use devtoolbox::catalog::{Category, RouteTable, ToolCard, ToolRoute};
use devtoolbox::drawer::{
    DrawerState, FsPreviewLoader, FullToolOutcome, PreviewError, PreviewLoader,
    LOAD_ERROR_MESSAGE, NOT_CONFIGURED_MESSAGE,
};
use devtoolbox::event::{RecordingEventHandler, ToolboxEvent};
use devtoolbox::storage::MemoryStorage;
use devtoolbox::{CardAction, Key, Toolbox, ToolboxConfig};
use std::fs;
use std::sync::Arc;

struct FailingLoader;

#[async_trait]
impl PreviewLoader for FailingLoader {
    async fn load(&self, source: &str) -> Result<(), PreviewError> {
        Err(PreviewError::new(format!("{} unreachable", source)))
    }
}

fn toolbox() -> Toolbox {
    Toolbox::new(ToolboxConfig::default(), Arc::new(MemoryStorage::new()), true)
}

#[test]
fn test_body_click_opens_without_marking_recent() {
    let mut toolbox = toolbox();
    let request = toolbox
        .click_card("JSON Formatter/Validator", CardAction::Select)
        .unwrap()
        .unwrap();
    assert_eq!(request.source, "tools/json.html");
    assert_eq!(toolbox.drawer_state(), DrawerState::Loading);
    assert!(toolbox.recent_titles().is_empty());

    let content = toolbox.drawer().content().unwrap();
    assert_eq!(content.title, "JSON Formatter/Validator");
    assert_eq!(content.meta, "Category: format | Tags: json format validate pretty");
}

#[tokio::test]
async fn test_fs_loader_success_and_failure() {
    let site = tempfile::tempdir().unwrap();
    fs::create_dir_all(site.path().join("tools")).unwrap();
    fs::write(site.path().join("tools/hash.html"), "<html></html>").unwrap();
    let config = ToolboxConfig {
        site_root: site.path().to_path_buf(),
        ..ToolboxConfig::default()
    };
    let loader = FsPreviewLoader::from_config(&config);
    assert_eq!(loader.root(), site.path());

    let mut toolbox = toolbox();
    toolbox.click_card("Hash Calculator", CardAction::Open).unwrap();
    assert_eq!(toolbox.load_preview(&loader).await, DrawerState::Loaded);

    toolbox.click_card("Image Compressor", CardAction::Open).unwrap();
    assert_eq!(toolbox.load_preview(&loader).await, DrawerState::LoadError);
    assert_eq!(toolbox.drawer().status_text(), LOAD_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_loader_error_maps_to_load_error_state() {
    let mut toolbox = toolbox();
    toolbox.click_card("UUID Generator", CardAction::Select).unwrap();
    assert_eq!(toolbox.load_preview(&FailingLoader).await, DrawerState::LoadError);
}

#[test]
fn test_close_from_every_state_clears_preview() {
    let mut toolbox = toolbox();

    // Loading
    toolbox.open_detail("UUID Generator").unwrap();
    toolbox.close_drawer();
    assert_eq!(toolbox.drawer_state(), DrawerState::Closed);
    assert!(toolbox.drawer().preview_source().is_none());

    // Loaded, closed with Escape
    let req = toolbox.open_detail("UUID Generator").unwrap().unwrap();
    assert!(toolbox.preview_finished(req.generation, true));
    assert_eq!(toolbox.drawer_state(), DrawerState::Loaded);
    assert!(toolbox.handle_key("Escape"));
    assert_eq!(toolbox.drawer_state(), DrawerState::Closed);
    assert_eq!(toolbox.drawer().aria_hidden(), "true");

    // LoadError
    let req = toolbox.open_detail("UUID Generator").unwrap().unwrap();
    toolbox.preview_finished(req.generation, false);
    assert_eq!(toolbox.drawer_state(), DrawerState::LoadError);
    toolbox.close_drawer();
    assert_eq!(toolbox.drawer_state(), DrawerState::Closed);
}

#[test]
fn test_other_keys_are_ignored() {
    let mut toolbox = toolbox();
    toolbox.open_detail("UUID Generator").unwrap();
    assert!(!toolbox.handle_key("Enter"));
    assert!(!toolbox.handle_key(Key::Other));
    assert!(toolbox.drawer().is_open());
}

#[test]
fn test_stale_completion_does_not_touch_new_card() {
    let mut toolbox = toolbox();
    let first = toolbox.open_detail("UUID Generator").unwrap().unwrap();
    let second = toolbox.open_detail("Hash Calculator").unwrap().unwrap();
    assert!(second.generation > first.generation);

    assert!(!toolbox.preview_finished(first.generation, false));
    assert_eq!(toolbox.drawer_state(), DrawerState::Loading);
    assert!(toolbox.preview_finished(second.generation, true));
    assert_eq!(toolbox.drawer_state(), DrawerState::Loaded);
}

#[tokio::test]
async fn test_open_full_tool_opens_window_and_closes() {
    let events = RecordingEventHandler::new();
    let mut toolbox = toolbox().with_event_handler(events.clone());

    toolbox.open_detail("HTTP Request Tester").unwrap();
    let outcome = toolbox.open_full_tool().await;
    assert_eq!(outcome, FullToolOutcome::Open("tools/http.html".to_string()));
    assert_eq!(toolbox.drawer_state(), DrawerState::Closed);
    assert_eq!(
        events.events(),
        vec![ToolboxEvent::OpenWindow {
            url: "tools/http.html".to_string()
        }]
    );
}

#[tokio::test]
async fn test_open_full_tool_without_route_alerts_and_closes() {
    let events = RecordingEventHandler::new();
    let cards = vec![
        ToolCard::new("notes", "Scratchpad", "Plain notes", Category::Misc),
        ToolCard::new("uuid", "UUID Generator", "v4 ids", Category::Generate),
    ];
    let routes = RouteTable::new(vec![ToolRoute::new(
        "uuid",
        "UUID Generator",
        "tools/uuid.html",
        "tools/uuid-full.html",
    )]);
    let mut toolbox = Toolbox::with_catalog(
        ToolboxConfig::default(),
        Arc::new(MemoryStorage::new()),
        true,
        cards,
        routes,
    )
    .with_event_handler(events.clone());

    assert!(toolbox.open_detail("Scratchpad").unwrap().is_none());
    assert_eq!(toolbox.drawer_state(), DrawerState::Loading);

    assert_eq!(toolbox.open_full_tool().await, FullToolOutcome::NotConfigured);
    assert_eq!(toolbox.drawer_state(), DrawerState::Closed);
    assert_eq!(events.alerts(), vec![NOT_CONFIGURED_MESSAGE.to_string()]);

    toolbox.open_detail("UUID Generator").unwrap();
    assert_eq!(
        toolbox.open_full_tool().await,
        FullToolOutcome::Open("tools/uuid-full.html".to_string())
    );
}
