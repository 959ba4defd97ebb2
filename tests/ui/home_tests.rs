//! Home screen UI tests

use super::*;
use monex::app::Screen;
use monex::live::LiveEvent;
use std::time::Instant;
use tui_input::Input;

#[test]
fn test_home_screen_shows_title_on_tall_terminal() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "Terminal Monad Explorer"));
}

#[test]
fn test_home_screen_compact_title_on_short_terminal() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 120, 30);

    assert!(!buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "monex"));
}

#[test]
fn test_home_screen_shows_search_bar() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Search"));
    assert!(buffer_contains(&buffer, "Search by Address / Txn Hash / Block"));
}

#[test]
fn test_home_screen_shows_live_widgets() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Latest Blocks"));
    assert!(buffer_contains(&buffer, "Latest Transactions"));
    assert!(buffer_contains(&buffer, "#19000002"));
    assert!(buffer_contains(&buffer, "0xaaaa1111"));
    // Relative time against the display clock
    assert!(buffer_contains(&buffer, "100 secs ago"));
}

#[test]
fn test_home_screen_empty_live_widgets() {
    let mut app = create_test_app(Screen::Home, true);
    app.seed_live(vec![], vec![]);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "No blocks available"));
    assert!(buffer_contains(&buffer, "No transactions available"));
}

#[test]
fn test_home_screen_shows_updating_while_refreshing() {
    let mut app = create_test_app(Screen::Home, true);
    app.apply_blocks_event(LiveEvent::Started, Instant::now());
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Updating…"));
}

#[test]
fn test_home_screen_shows_refresh_failure_and_keeps_rows() {
    let mut app = create_test_app(Screen::Home, true);
    let now = Instant::now();
    app.apply_transactions_event(LiveEvent::Started, now);
    app.apply_transactions_event(LiveEvent::Failed("connection refused".to_string()), now);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Refresh failed"));
    assert!(buffer_contains(&buffer, "0xaaaa1111"));
}

#[test]
fn test_home_screen_marks_new_rows() {
    let mut app = create_test_app(Screen::Home, true);
    let mut blocks = mock_block_summaries();
    let mut newest = blocks[0].clone();
    newest.number = "19000003".to_string();
    blocks.insert(0, newest);
    blocks.truncate(3);

    app.apply_blocks_event(LiveEvent::Fetched(blocks), Instant::now());
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "NEW #19000003"));
    assert!(!buffer_contains(&buffer, "NEW #19000002"));
}

#[test]
fn test_home_screen_shows_recent_searches() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Recent Searches"));
    assert!(buffer_contains(&buffer, "0x1234"));
}

#[test]
fn test_home_screen_preview_shows_classification() {
    let mut app = create_test_app(Screen::Home, true);
    app.search_input = Input::new("12345678".to_string());
    app.update_search_preview();
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Block → /block/12345678"));
}

#[test]
fn test_home_screen_preview_address_lookup_states() {
    let mut app = create_test_app(Screen::Home, true);
    let address = format!("0x{}", "b".repeat(40));
    app.search_input = Input::new(address);
    let request = app.update_search_preview().unwrap();

    let buffer = render_to_buffer(&app, 140, 40);
    assert!(buffer_contains(&buffer, "looking up…"));

    app.resolve_metadata(request.token, Some(mock_metadata("Treasury")));
    let buffer = render_to_buffer(&app, 140, 40);
    assert!(buffer_contains(&buffer, "Treasury ✓"));
    assert!(!buffer_contains(&buffer, "looking up…"));
}

#[test]
fn test_home_screen_preview_unknown_input() {
    let mut app = create_test_app(Screen::Home, true);
    app.search_input = Input::new("hello".to_string());
    app.update_search_preview();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "No match"));
}

#[test]
fn test_home_screen_no_api_shows_setup() {
    let app = create_test_app(Screen::Home, false);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Indexer API Required"));
    assert!(buffer_contains(&buffer, "URL"));
}

#[test]
fn test_home_screen_long_non_ascii_api_url_and_history() {
    let mut config = mock_config();
    config.api_url = Some(format!("http://localhost:3000/{}é/xyz", "a".repeat(24)));
    config.recent_searches = vec![format!("{}é{}", "x".repeat(56), "y".repeat(10))];
    let mut app = App::new(config);
    app.tick_clock(NOW);
    assert!(app.has_api());

    let buffer = render_to_buffer(&app, 120, 50);

    assert!(buffer_contains(&buffer, "API: http://localhost:3000/aaaa"));
    assert!(buffer_contains(&buffer, "xxxxé..."));
}
