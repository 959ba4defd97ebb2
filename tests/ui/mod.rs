//! UI rendering tests for monex
//!
//! These tests ensure the UI renders correctly by comparing against expected buffer output.
//! Run with: cargo test --test ui_tests

pub mod address_tests;
pub mod common_tests;
pub mod home_tests;
pub mod tx_tests;

use monex::api::{
    AddressDetail, AddressInfo, AddressMetadata, Block, BlockSummary, InternalTransaction, Log,
    NftCollection, NftToken, NftTransfer, Token, TokenBalance, TokenTransfer, Transaction,
    TxDetail, TxSummary,
};
use monex::app::{App, Screen};
use monex::config::Config;
use monex::ui::draw;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Display clock used by every test app
pub const NOW: u64 = 1_700_000_100;

// ==================== Test Data Builders ====================

pub fn mock_config() -> Config {
    let mut config = Config::default();
    config.api_url = Some("http://localhost:3000".to_string());
    config.recent_searches = vec![
        "0x1234567890abcdef1234567890abcdef12345678".to_string(),
        "12345678".to_string(),
    ];
    config
}

pub fn mock_config_no_api() -> Config {
    Config::default()
}

pub fn mock_block_summaries() -> Vec<BlockSummary> {
    (0..3u64)
        .map(|i| BlockSummary {
            number: (19_000_002 - i).to_string(),
            hash: format!("0x{:064x}", 0xabc0 + i),
            timestamp: (1_700_000_000 - i).to_string(),
            transaction_count: 150 + i,
            miner: "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5".to_string(),
            gas_used: "15000000".to_string(),
            gas_limit: "30000000".to_string(),
        })
        .collect()
}

pub fn mock_tx_summaries() -> Vec<TxSummary> {
    vec![
        TxSummary {
            hash: "0xaaaa111122223333444455556666777788889999aaaabbbbccccddddeeeeffff".to_string(),
            from: "0x1111111111111111111111111111111111111111".to_string(),
            to: Some("0x2222222222222222222222222222222222222222".to_string()),
            value: "1000000000000000000".to_string(), // 1 MON
            status: Some(true),
            timestamp: "1700000000".to_string(),
            block_number: Some("19000000".to_string()),
            function_signature: Some("transfer(address,uint256)".to_string()),
        },
        TxSummary {
            hash: "0xbbbb111122223333444455556666777788889999aaaabbbbccccddddeeeeffff".to_string(),
            from: "0x3333333333333333333333333333333333333333".to_string(),
            to: Some("0x4444444444444444444444444444444444444444".to_string()),
            value: "0".to_string(),
            status: Some(false),
            timestamp: "1700000000".to_string(),
            block_number: Some("19000000".to_string()),
            function_signature: None,
        },
        TxSummary {
            hash: "0xcccc111122223333444455556666777788889999aaaabbbbccccddddeeeeffff".to_string(),
            from: "0x5555555555555555555555555555555555555555".to_string(),
            to: None,
            value: "0".to_string(),
            status: Some(true),
            timestamp: "1700000000".to_string(),
            block_number: Some("19000000".to_string()),
            function_signature: None,
        },
    ]
}

pub fn mock_block() -> Block {
    Block {
        number: "19000000".to_string(),
        hash: "0xabc123def456789abc123def456789abc123def456789abc123def456789abcd".to_string(),
        parent_hash: "0xdef456789abc123def456789abc123def456789abc123def456789abc123def4"
            .to_string(),
        timestamp: "1700000000".to_string(),
        miner: "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5".to_string(),
        gas_limit: "30000000".to_string(),
        gas_used: "15000000".to_string(),
        base_fee_per_gas: Some("30000000000".to_string()), // 30 gwei
        transaction_count: 3,
        size: Some(125000),
        transactions: Some(mock_tx_summaries()),
        ..Default::default()
    }
}

pub fn mock_metadata(name: &str) -> AddressMetadata {
    AddressMetadata {
        name: name.to_string(),
        is_verified: Some(true),
        ..Default::default()
    }
}

pub fn mock_transaction() -> Transaction {
    Transaction {
        hash: "0xaaaa111122223333444455556666777788889999aaaabbbbccccddddeeeeffff".to_string(),
        from: "0x1111111111111111111111111111111111111111".to_string(),
        to: Some("0x2222222222222222222222222222222222222222".to_string()),
        value: "1500000000000000000".to_string(), // 1.5 MON
        gas: "100000".to_string(),
        gas_price: Some("50000000000".to_string()),
        max_fee_per_gas: Some("100000000000".to_string()),
        max_priority_fee_per_gas: Some("2000000000".to_string()),
        gas_used: "65000".to_string(),
        effective_gas_price: Some("50000000000".to_string()),
        block_number: "19000000".to_string(),
        timestamp: "1700000000".to_string(),
        transaction_index: 5,
        nonce: 42,
        input: Some("0xa9059cbb".to_string()),
        method_id: Some("0xa9059cbb".to_string()),
        function_signature: Some("transfer(address,uint256)".to_string()),
        status: Some(true),
        tx_type: Some(2),
        logs: vec![],
        internal_transactions: vec![],
    }
}

pub fn mock_tx_detail() -> TxDetail {
    TxDetail {
        tx: mock_transaction(),
        from_metadata: Some(mock_metadata("Alice Wallet")),
        to_metadata: None,
    }
}

pub fn mock_tx_detail_with_logs() -> TxDetail {
    let mut detail = mock_tx_detail();
    detail.tx.logs = vec![
        Log {
            address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            topics: vec![
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".to_string(),
                "0x0000000000000000000000001111111111111111111111111111111111111111".to_string(),
            ],
            data: "0x".to_string(),
            log_index: 0,
        },
        Log {
            address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
            topics: vec![
                "0xe1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c".to_string(),
            ],
            data: "0x".to_string(),
            log_index: 1,
        },
    ];
    detail
}

pub fn mock_internal_transactions() -> Vec<InternalTransaction> {
    vec![InternalTransaction {
        from: "0x2222222222222222222222222222222222222222".to_string(),
        to: "0x6666666666666666666666666666666666666666".to_string(),
        value: "250000000000000000".to_string(), // 0.25 MON
        gas: "30000".to_string(),
        gas_used: "21000".to_string(),
        call_type: "call".to_string(),
        transaction_hash: Some(
            "0xaaaa111122223333444455556666777788889999aaaabbbbccccddddeeeeffff".to_string(),
        ),
        block_number: Some("19000000".to_string()),
        timestamp: Some("1700000000".to_string()),
    }]
}

fn usdc() -> Token {
    Token {
        address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
        name: "USD Coin".to_string(),
        symbol: "USDC".to_string(),
        decimals: 6,
    }
}

fn punks() -> NftCollection {
    NftCollection {
        address: "0x7777777777777777777777777777777777777777".to_string(),
        name: "Monad Punks".to_string(),
        symbol: "MPUNK".to_string(),
        token_type: "ERC721".to_string(),
    }
}

pub fn mock_address_detail_eoa() -> AddressDetail {
    AddressDetail {
        info: AddressInfo {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            balance: "5500000000000000000".to_string(), // 5.5 MON
            transaction_count: 150,
            first_seen_block: Some("100".to_string()),
            last_seen_block: Some("19000000".to_string()),
            is_contract: false,
            contract_creator: None,
            contract_creation_tx: None,
        },
        metadata: None,
        transactions: mock_tx_summaries(),
        token_balances: vec![
            TokenBalance {
                token_address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
                holder_address: "0x1111111111111111111111111111111111111111".to_string(),
                balance: "10000000000".to_string(), // 10000 USDC
                token: usdc(),
            },
            TokenBalance {
                token_address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
                holder_address: "0x1111111111111111111111111111111111111111".to_string(),
                balance: "2500000000000000000".to_string(), // 2.5 WMON
                token: Token {
                    address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
                    name: "Wrapped Monad".to_string(),
                    symbol: "WMON".to_string(),
                    decimals: 18,
                },
            },
        ],
        token_transfers: vec![TokenTransfer {
            from: "0x1111111111111111111111111111111111111111".to_string(),
            to: "0x9999999999999999999999999999999999999999".to_string(),
            value: "2500000".to_string(), // 2.5 USDC
            token_address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            transaction_hash: "0xdddd111122223333444455556666777788889999aaaabbbbccccddddeeeeffff"
                .to_string(),
            block_number: "19000000".to_string(),
            timestamp: "1700000000".to_string(),
            log_index: 0,
            token: usdc(),
        }],
        internal_transactions: mock_internal_transactions(),
        nfts: vec![NftToken {
            collection_address: "0x7777777777777777777777777777777777777777".to_string(),
            token_id: "42".to_string(),
            owner: Some("0x1111111111111111111111111111111111111111".to_string()),
            collection: Some(punks()),
            ..Default::default()
        }],
        nft_transfers: vec![NftTransfer {
            collection_address: "0x7777777777777777777777777777777777777777".to_string(),
            token_id: "42".to_string(),
            from: "0x0000000000000000000000000000000000000000".to_string(),
            to: "0x1111111111111111111111111111111111111111".to_string(),
            amount: "1".to_string(),
            token_type: "ERC721".to_string(),
            transaction_hash: "0xeeee111122223333444455556666777788889999aaaabbbbccccddddeeeeffff"
                .to_string(),
            block_number: "18999990".to_string(),
            timestamp: "1700000000".to_string(),
            collection: Some(punks()),
        }],
    }
}

pub fn mock_address_detail_contract() -> AddressDetail {
    AddressDetail {
        info: AddressInfo {
            address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            balance: "0".to_string(),
            transaction_count: 1,
            is_contract: true,
            contract_creator: Some("0x807a96288a1a408dbc13de2b1d087d10356395d2".to_string()),
            contract_creation_tx: Some(format!("0x{}", "e".repeat(64))),
            ..Default::default()
        },
        metadata: Some(AddressMetadata {
            address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            name: "USD Coin".to_string(),
            symbol: Some("USDC".to_string()),
            category: Some("Stablecoin".to_string()),
            is_token: Some(true),
            token_standard: Some("ERC20".to_string()),
            is_verified: Some(true),
            tags: vec!["stablecoin".to_string(), "defi".to_string()],
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn create_test_app(screen: Screen, with_api: bool) -> App {
    let config = if with_api {
        mock_config()
    } else {
        mock_config_no_api()
    };
    let mut app = App::new(config);
    app.screen = screen;
    app.tick_clock(NOW);
    if with_api {
        app.seed_live(mock_block_summaries(), mock_tx_summaries());
    }
    app
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
