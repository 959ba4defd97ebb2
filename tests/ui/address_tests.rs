//! Address page UI tests

use super::*;
use monex::app::{AddressResult, AddressTab, App, Screen};

fn address_screen(detail: AddressDetail, selected_link: usize) -> Screen {
    tab_screen(detail, AddressTab::Transactions, selected_link)
}

fn tab_screen(detail: AddressDetail, tab: AddressTab, selected_link: usize) -> Screen {
    Screen::AddressResult(AddressResult {
        detail,
        tab,
        selected_link,
    })
}

#[test]
fn test_address_screen_eoa_shows_address() {
    let app = create_test_app(address_screen(mock_address_detail_eoa(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "EOA"));
    assert!(buffer_contains(
        &buffer,
        "0x1111111111111111111111111111111111111111"
    ));
}

#[test]
fn test_address_screen_eoa_shows_balance_and_activity() {
    let app = create_test_app(address_screen(mock_address_detail_eoa(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "MON Balance: 5.500000 MON"));
    assert!(buffer_contains(&buffer, "Transactions: 150"));
    assert!(buffer_contains(&buffer, "First Seen: #100"));
}

#[test]
fn test_address_screen_eoa_shows_token_balances() {
    let app = create_test_app(address_screen(mock_address_detail_eoa(), 0), true);
    let buffer = render_to_buffer(&app, 100, 50);

    assert!(buffer_contains(&buffer, "Token Balances"));
    assert!(buffer_contains(&buffer, "10000 USDC"));
    assert!(buffer_contains(&buffer, "2.5000 WMON"));
}

#[test]
fn test_address_screen_shows_recent_transactions() {
    let app = create_test_app(address_screen(mock_address_detail_eoa(), 1), true);
    let buffer = render_to_buffer(&app, 120, 50);

    assert!(buffer_contains(&buffer, " Transactions (3) "));
    assert!(buffer_contains(&buffer, "0x33333333"));
}

#[test]
fn test_address_screen_shows_activity_tabs() {
    let app = create_test_app(address_screen(mock_address_detail_eoa(), 0), true);
    let buffer = render_to_buffer(&app, 140, 50);

    for title in ["Token Transfers", "Internal Txns", "NFTs", "NFT Transfers"] {
        assert!(buffer_contains(&buffer, title), "missing tab {title}");
    }
    assert!(buffer_contains(&buffer, "←→ tabs"));
}

#[test]
fn test_address_screen_token_transfers_tab() {
    let screen = tab_screen(mock_address_detail_eoa(), AddressTab::TokenTransfers, 0);
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 140, 50);

    assert!(buffer_contains(&buffer, " Token Transfers (1) "));
    assert!(buffer_contains(&buffer, "OUT 0xdddd1111"));
    assert!(buffer_contains(&buffer, "2.5000 USDC"));
    assert!(buffer_contains(&buffer, "100 secs ago"));
}

#[test]
fn test_address_screen_internal_transactions_tab() {
    let screen = tab_screen(
        mock_address_detail_eoa(),
        AddressTab::InternalTransactions,
        0,
    );
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 140, 50);

    assert!(buffer_contains(&buffer, " Internal Txns (1) "));
    assert!(buffer_contains(&buffer, "call"));
    assert!(buffer_contains(&buffer, "0.250000 MON"));
    assert!(buffer_contains(&buffer, "gas 21.00K"));
}

#[test]
fn test_address_screen_nft_tabs() {
    let app = create_test_app(
        tab_screen(mock_address_detail_eoa(), AddressTab::Nfts, 0),
        true,
    );
    let buffer = render_to_buffer(&app, 140, 50);
    assert!(buffer_contains(&buffer, "Monad Punks"));
    assert!(buffer_contains(&buffer, "#42"));
    assert!(buffer_contains(&buffer, "ERC721"));

    let app = create_test_app(
        tab_screen(mock_address_detail_eoa(), AddressTab::NftTransfers, 0),
        true,
    );
    let buffer = render_to_buffer(&app, 140, 50);
    assert!(buffer_contains(&buffer, " IN 0xeeee1111"));
}

#[test]
fn test_address_screen_empty_tab_message() {
    let screen = tab_screen(
        mock_address_detail_contract(),
        AddressTab::NftTransfers,
        0,
    );
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "No NFT transfers found"));
}

#[test]
fn test_address_screen_tab_switch_renders_new_rows() {
    let mut app: App = create_test_app(address_screen(mock_address_detail_eoa(), 0), true);
    app.next_tab();
    let buffer = render_to_buffer(&app, 140, 50);

    assert!(buffer_contains(&buffer, " Token Transfers (1) "));
    assert!(!buffer_contains(&buffer, "0x33333333"));
}

#[test]
fn test_address_screen_contract_shows_metadata_card() {
    let app = create_test_app(address_screen(mock_address_detail_contract(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "ERC20"));
    assert!(buffer_contains(&buffer, "USD Coin (USDC) ✓ verified"));
    assert!(buffer_contains(&buffer, "Category: Stablecoin"));
    assert!(buffer_contains(&buffer, "Tags: stablecoin, defi"));
}

#[test]
fn test_address_screen_contract_shows_checksummed_address_and_creator() {
    let app = create_test_app(address_screen(mock_address_detail_contract(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(
        &buffer,
        "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
    ));
    assert!(buffer_contains(&buffer, "Creator:"));
    assert!(buffer_contains(&buffer, "No transactions found"));
}
