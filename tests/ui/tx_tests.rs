//! Transaction page UI tests

use super::*;
use monex::app::{Screen, TxResult};

fn tx_screen(detail: TxDetail, selected_link: usize) -> Screen {
    Screen::TxResult(TxResult {
        detail,
        selected_link,
    })
}

#[test]
fn test_tx_screen_shows_hash_and_status() {
    let app = create_test_app(tx_screen(mock_tx_detail(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "0xaaaa1111"));
    assert!(buffer_contains(&buffer, "Success"));
    assert!(buffer_contains(&buffer, "EIP-1559"));
}

#[test]
fn test_tx_screen_shows_from_to_with_metadata_names() {
    let app = create_test_app(tx_screen(mock_tx_detail(), 0), true);
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(
        &buffer,
        "Alice Wallet (0x1111111111111111111111111111111111111111)"
    ));
    assert!(buffer_contains(
        &buffer,
        "To: 0x2222222222222222222222222222222222222222"
    ));
}

#[test]
fn test_tx_screen_shows_value_and_fee() {
    let app = create_test_app(tx_screen(mock_tx_detail(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Value: 1.500000 MON"));
    // 65000 gas * 50 gwei
    assert!(buffer_contains(&buffer, "Fee Paid: 0.003250 MON"));
}

#[test]
fn test_tx_screen_shows_gas_info() {
    let app = create_test_app(tx_screen(mock_tx_detail(), 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Gas Limit: 100.00K"));
    assert!(buffer_contains(&buffer, "65.00K (65.00%)"));
    assert!(buffer_contains(&buffer, "50.00 gwei"));
}

#[test]
fn test_tx_screen_shows_block_link_and_method() {
    let app = create_test_app(tx_screen(mock_tx_detail(), 2), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Block: #19000000"));
    assert!(buffer_contains(&buffer, "Method: transfer(address,uint256)"));
}

#[test]
fn test_tx_screen_contract_creation() {
    let mut detail = mock_tx_detail();
    detail.tx.to = None;
    let app = create_test_app(tx_screen(detail, 0), true);
    let buffer = render_to_buffer(&app, 100, 40);

    assert!(buffer_contains(&buffer, "Contract Creation"));
}

#[test]
fn test_tx_screen_shows_logs() {
    let app = create_test_app(tx_screen(mock_tx_detail_with_logs(), 3), true);
    let buffer = render_to_buffer(&app, 100, 50);

    assert!(buffer_contains(&buffer, "Logs (2)"));
    assert!(buffer_contains(
        &buffer,
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
    ));
    assert!(buffer_contains(&buffer, "+1 indexed topics"));
}

#[test]
fn test_tx_screen_log_window_follows_selection() {
    let mut detail = mock_tx_detail_with_logs();
    let template = detail.tx.logs[0].clone();
    detail.tx.logs = (0..8)
        .map(|i| Log {
            address: format!("0x{:040x}", i + 1),
            log_index: i,
            ..template.clone()
        })
        .collect();

    // from, to, block, then logs: link 3 + 7 is the last log
    let app = create_test_app(tx_screen(detail, 10), true);
    let buffer = render_to_buffer(&app, 100, 60);

    assert!(buffer_contains(&buffer, "↑3 more"));
    assert!(buffer_contains(&buffer, &format!("0x{:040x}", 8)));
    assert!(!buffer_contains(&buffer, &format!("0x{:040x}", 1)));
}

#[test]
fn test_tx_screen_shows_internal_transactions() {
    let mut detail = mock_tx_detail();
    detail.tx.internal_transactions = mock_internal_transactions();
    let app = create_test_app(tx_screen(detail, 0), true);
    let buffer = render_to_buffer(&app, 120, 50);

    assert!(buffer_contains(&buffer, "Internal Transactions (1)"));
    assert!(buffer_contains(&buffer, "0x22222222...222222 → 0x66666666...666666"));
    assert!(buffer_contains(&buffer, "0.250000 MON  gas 21.00K"));
}

#[test]
fn test_tx_screen_selecting_internal_call_after_logs() {
    let mut detail = mock_tx_detail_with_logs();
    detail.tx.internal_transactions = mock_internal_transactions();

    // from, to, block, 2 logs, then the internal call at link 5
    let app = create_test_app(tx_screen(detail, 5), true);
    let buffer = render_to_buffer(&app, 120, 60);

    assert!(buffer_contains(&buffer, "Logs (2)"));
    assert!(!buffer_contains(&buffer, "more logs"));
    assert!(buffer_contains(&buffer, "Internal Transactions (1)"));
}
