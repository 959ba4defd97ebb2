//! Common UI tests - error, loading, layout, and navigation

use super::*;
use monex::app::{AddressResult, AddressTab, BlockResult, ContractsResult, Screen, TxResult};

// ==================== Error Screen Tests ====================

#[test]
fn test_error_screen_shows_message() {
    let screen = Screen::Error(
        "Failed to load block 19000000: not found\n\nAPI: http://localhost:3000".to_string(),
    );
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Error"));
    assert!(buffer_contains(&buffer, "not found"));
    assert!(buffer_contains(&buffer, "API: http://localhost:3000"));
}

// ==================== Loading Screen Tests ====================

#[test]
fn test_loading_screen_shows_message() {
    let screen = Screen::Loading("Fetching block 19000000...".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Loading"));
    assert!(buffer_contains(&buffer, "Fetching block 19000000..."));
}

// ==================== Navigation Help Tests ====================

#[test]
fn test_screens_show_navigation_help() {
    let screens = vec![
        Screen::BlockResult(BlockResult {
            block: mock_block(),
            selected_index: 0,
        }),
        Screen::TxResult(TxResult {
            detail: mock_tx_detail(),
            selected_link: 0,
        }),
        Screen::AddressResult(AddressResult {
            detail: mock_address_detail_eoa(),
            tab: AddressTab::default(),
            selected_link: 0,
        }),
        Screen::Error("boom".to_string()),
    ];

    for screen in screens {
        let app = create_test_app(screen, true);
        let buffer = render_to_buffer(&app, 100, 40);

        assert!(buffer_contains(&buffer, "b back • h home • Esc quit"));
    }
}

// ==================== Layout Tests ====================

#[test]
fn test_small_terminal_renders_without_panic() {
    let screens = vec![
        Screen::Home,
        Screen::BlockResult(BlockResult {
            block: mock_block(),
            selected_index: 0,
        }),
        Screen::TxResult(TxResult {
            detail: mock_tx_detail_with_logs(),
            selected_link: 0,
        }),
        Screen::AddressResult(AddressResult {
            detail: mock_address_detail_eoa(),
            tab: AddressTab::default(),
            selected_link: 0,
        }),
        Screen::AddressResult(AddressResult {
            detail: mock_address_detail_contract(),
            tab: AddressTab::InternalTransactions,
            selected_link: 0,
        }),
        Screen::Contracts(ContractsResult {
            contracts: vec![mock_address_detail_contract().info],
            selected_index: 0,
        }),
        Screen::Error("Error".to_string()),
        Screen::Loading("Loading...".to_string()),
    ];

    for screen in screens {
        let app = create_test_app(screen, true);
        // This should not panic even with very small dimensions
        let _ = render_to_buffer(&app, 40, 10);
    }
}

#[test]
fn test_setup_screen_small_terminal_renders_without_panic() {
    let app = create_test_app(Screen::Home, false);
    let _ = render_to_buffer(&app, 20, 5);
}

#[test]
fn test_large_terminal_renders_without_panic() {
    let app = create_test_app(Screen::Home, true);
    let _ = render_to_buffer(&app, 200, 100);
}

// ==================== Contracts Screen Tests ====================

#[test]
fn test_contracts_screen_lists_contracts() {
    let contract = mock_address_detail_contract().info;
    let screen = Screen::Contracts(ContractsResult {
        contracts: vec![contract],
        selected_index: 0,
    });
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 120, 30);

    assert!(buffer_contains(&buffer, "Contracts (1)"));
    assert!(buffer_contains(
        &buffer,
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
    ));
    assert!(buffer_contains(&buffer, "0x807a9628...6395d2"));
}

#[test]
fn test_contracts_screen_empty() {
    let screen = Screen::Contracts(ContractsResult {
        contracts: vec![],
        selected_index: 0,
    });
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "No contracts indexed yet"));
}
