use crate::api::{
    AddressDetail, AddressInfo, AddressMetadata, ApiClient, Block, BlockSummary, TxDetail,
    TxSummary,
};
use crate::config::Config;
use crate::live::{LiveEvent, LiveList, Ranked};
use crate::search::{MetadataRequest, SearchPreview, SearchQuery};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tui_input::Input;

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Loading(String),
    BlockResult(BlockResult),
    TxResult(TxResult),
    AddressResult(AddressResult),
    Contracts(ContractsResult),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct BlockResult {
    pub block: Block,
    pub selected_index: usize,
}

#[derive(Debug, Clone)]
pub struct TxResult {
    pub detail: TxDetail,
    pub selected_link: usize, // 0 = from, 1 = to, then block, then log addresses
}

#[derive(Debug, Clone)]
pub struct AddressResult {
    pub detail: AddressDetail,
    pub tab: AddressTab,
    pub selected_link: usize, // creator (if any), then rows of the active tab
}

#[derive(Debug, Clone)]
pub struct ContractsResult {
    pub contracts: Vec<AddressInfo>,
    pub selected_index: usize,
}

/// Activity lists on the address screen, one visible at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressTab {
    #[default]
    Transactions,
    TokenTransfers,
    InternalTransactions,
    Nfts,
    NftTransfers,
}

impl AddressTab {
    pub const ALL: [AddressTab; 5] = [
        Self::Transactions,
        Self::TokenTransfers,
        Self::InternalTransactions,
        Self::Nfts,
        Self::NftTransfers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::TokenTransfers => "Token Transfers",
            Self::InternalTransactions => "Internal Txns",
            Self::Nfts => "NFTs",
            Self::NftTransfers => "NFT Transfers",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Number of rows this tab shows for `detail`
    pub fn row_count(self, detail: &AddressDetail) -> usize {
        match self {
            Self::Transactions => detail.transactions.len(),
            Self::TokenTransfers => detail.token_transfers.len(),
            Self::InternalTransactions => detail.internal_transactions.len(),
            Self::Nfts => detail.nfts.len(),
            Self::NftTransfers => detail.nft_transfers.len(),
        }
    }
}

/// Navigable links from a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLink {
    Address(String),
    Block(String),
    Transaction(String),
}

impl NavLink {
    /// The search string that leads to this link's screen
    pub fn query(&self) -> &str {
        match self {
            Self::Address(v) | Self::Block(v) | Self::Transaction(v) => v,
        }
    }
}

/// Which part of the home screen receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Search,
    Blocks,
    Transactions,
}

/// Links on the transaction screen, in display order
pub fn tx_links(detail: &TxDetail) -> Vec<NavLink> {
    let tx = &detail.tx;
    let mut links = vec![NavLink::Address(tx.from.clone())];

    if let Some(to) = &tx.to {
        links.push(NavLink::Address(to.clone()));
    }

    if !tx.block_number.is_empty() {
        links.push(NavLink::Block(tx.block_number.clone()));
    }

    for log in &tx.logs {
        links.push(NavLink::Address(log.address.clone()));
    }

    for call in &tx.internal_transactions {
        let target = if call.to.is_empty() { &call.from } else { &call.to };
        links.push(NavLink::Address(target.clone()));
    }

    links
}

/// Links on the address screen, in display order: the creator, then one per
/// row of the active tab
pub fn address_links(detail: &AddressDetail, tab: AddressTab) -> Vec<NavLink> {
    let mut links = Vec::new();

    if let Some(creator) = &detail.info.contract_creator {
        links.push(NavLink::Address(creator.clone()));
    }

    match tab {
        AddressTab::Transactions => links.extend(
            detail
                .transactions
                .iter()
                .map(|tx| NavLink::Transaction(tx.hash.clone())),
        ),
        AddressTab::TokenTransfers => links.extend(
            detail
                .token_transfers
                .iter()
                .map(|t| NavLink::Transaction(t.transaction_hash.clone())),
        ),
        AddressTab::InternalTransactions => {
            links.extend(detail.internal_transactions.iter().map(|call| {
                match &call.transaction_hash {
                    Some(hash) => NavLink::Transaction(hash.clone()),
                    None => NavLink::Address(call.to.clone()),
                }
            }))
        }
        AddressTab::Nfts => links.extend(
            detail
                .nfts
                .iter()
                .map(|nft| NavLink::Address(nft.collection_address.clone())),
        ),
        AddressTab::NftTransfers => links.extend(
            detail
                .nft_transfers
                .iter()
                .map(|t| NavLink::Transaction(t.transaction_hash.clone())),
        ),
    }

    links
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub search_input: Input,
    pub api_input: Input,
    pub selected_history_index: Option<usize>,
    pub should_quit: bool,
    pub api_client: Option<ApiClient>,
    pub latest_blocks: LiveList<BlockSummary>,
    pub latest_transactions: LiveList<TxSummary>,
    pub search_preview: SearchPreview,
    pub home_focus: HomeFocus,
    pub live_selected: usize,
    /// Display clock (unix seconds), advanced once a second by the event loop
    pub now: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let api_client = config.api_url().and_then(|url| ApiClient::new(url).ok());
        let windows = config.live_windows();

        Self {
            config,
            screen: Screen::Home,
            history: Vec::new(),
            search_input: Input::default(),
            api_input: Input::default(),
            selected_history_index: None,
            should_quit: false,
            api_client,
            latest_blocks: LiveList::new(Vec::new(), windows),
            latest_transactions: LiveList::new(Vec::new(), windows),
            search_preview: SearchPreview::default(),
            home_focus: HomeFocus::Search,
            live_selected: 0,
            now: unix_now(),
        }
    }

    pub fn submit_api_url(&mut self) -> Result<(), String> {
        let url = self.api_input.value().trim().to_string();
        if url.is_empty() {
            return Err("API URL cannot be empty".to_string());
        }

        // Try to create a client to validate the URL
        match ApiClient::new(&url) {
            Ok(client) => {
                self.api_client = Some(client);
                if let Err(e) = self.config.set_api_url(url) {
                    tracing::warn!(error = %format!("{e:#}"), "Could not persist API URL");
                }
                self.api_input.reset();
                Ok(())
            }
            Err(e) => Err(format!("Invalid API URL: {e}")),
        }
    }

    pub fn needs_api_setup(&self) -> bool {
        self.api_client.is_none()
    }

    pub fn has_api(&self) -> bool {
        self.api_client.is_some()
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_client.as_ref().map(ApiClient::base_url)
    }

    // ==================== Live widgets ====================

    /// Install the initial snapshots the widgets start from
    pub fn seed_live(&mut self, blocks: Vec<BlockSummary>, transactions: Vec<TxSummary>) {
        let windows = self.config.live_windows();
        self.latest_blocks = LiveList::new(blocks, windows);
        self.latest_transactions = LiveList::new(transactions, windows);
        self.clamp_live_selection();
    }

    pub fn apply_blocks_event(&mut self, event: LiveEvent<BlockSummary>, now: Instant) {
        let new = self.latest_blocks.apply(event, now);
        if new > 0 {
            tracing::debug!(new, "New blocks");
        }
        self.clamp_live_selection();
    }

    pub fn apply_transactions_event(&mut self, event: LiveEvent<TxSummary>, now: Instant) {
        let new = self.latest_transactions.apply(event, now);
        if new > 0 {
            tracing::debug!(new, "New transactions");
        }
        self.clamp_live_selection();
    }

    /// Clear highlight and failure flags whose window has passed
    pub fn expire_live(&mut self, now: Instant) {
        self.latest_blocks.expire(now);
        self.latest_transactions.expire(now);
    }

    pub fn tick_clock(&mut self, now: u64) {
        self.now = now;
    }

    fn focused_live_len(&self) -> usize {
        match self.home_focus {
            HomeFocus::Search => 0,
            HomeFocus::Blocks => self.latest_blocks.len(),
            HomeFocus::Transactions => self.latest_transactions.len(),
        }
    }

    fn clamp_live_selection(&mut self) {
        let len = self.focused_live_len();
        if len == 0 {
            self.live_selected = 0;
        } else if self.live_selected >= len {
            self.live_selected = len - 1;
        }
    }

    /// Cycle home focus: search -> blocks -> transactions
    pub fn cycle_home_focus(&mut self) {
        self.home_focus = match self.home_focus {
            HomeFocus::Search => HomeFocus::Blocks,
            HomeFocus::Blocks => HomeFocus::Transactions,
            HomeFocus::Transactions => HomeFocus::Search,
        };
        self.live_selected = 0;
        self.selected_history_index = None;
    }

    // ==================== Search ====================

    /// Reclassify the search bar; returns a metadata lookup to run, if any
    pub fn update_search_preview(&mut self) -> Option<MetadataRequest> {
        self.search_preview.update(self.search_input.value())
    }

    /// Apply a metadata lookup result; stale results are dropped
    pub fn resolve_metadata(&mut self, token: u64, metadata: Option<AddressMetadata>) -> bool {
        self.search_preview.resolve(token, metadata)
    }

    pub fn get_recent_searches(&self) -> &[String] {
        &self.config.recent_searches
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(0) => None, // Wrap to search input
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i >= len - 1 => None, // Wrap to search input
            Some(i) => Some(i + 1),
        };
    }

    pub fn get_selected_history_query(&self) -> Option<String> {
        self.selected_history_index
            .and_then(|i| self.config.recent_searches.get(i).cloned())
    }

    pub fn clear_history_selection(&mut self) {
        self.selected_history_index = None;
    }

    pub fn delete_selected_history(&mut self) {
        if let Some(idx) = self.selected_history_index {
            if idx < self.config.recent_searches.len() {
                self.config.recent_searches.remove(idx);
                if let Err(e) = self.config.save() {
                    tracing::warn!(error = %format!("{e:#}"), "Could not persist search history");
                }

                // Adjust selection
                if self.config.recent_searches.is_empty() {
                    self.selected_history_index = None;
                } else if idx >= self.config.recent_searches.len() {
                    self.selected_history_index = Some(self.config.recent_searches.len() - 1);
                }
            }
        }
    }

    /// Submit the search bar. Only navigable input is accepted; anything
    /// else leaves the input as typed.
    pub fn submit_search(&mut self) -> Option<SearchQuery> {
        let query = SearchQuery::parse(self.search_input.value());
        if !query.is_navigable() {
            return None;
        }

        self.search_input.reset();
        self.search_preview.reset();
        if let Some(value) = query.value() {
            self.remember_search(value.to_string());
        }
        Some(query)
    }

    /// Record a query in the persisted history
    pub fn remember_search(&mut self, query: String) {
        if let Err(e) = self.config.add_recent_search(query) {
            tracing::warn!(error = %format!("{e:#}"), "Could not persist search history");
        }
    }

    // ==================== Navigation ====================

    pub fn navigate_to(&mut self, screen: Screen) {
        if !matches!(self.screen, Screen::Home | Screen::Loading(_)) {
            self.history.push(self.screen.clone());
        }
        self.screen = screen;
    }

    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            self.screen = prev;
            true
        } else {
            self.go_home();
            true
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.screen = Screen::Home;
    }

    pub fn set_loading(&mut self, msg: &str) {
        // Save current screen to history before showing loading (if it's a navigable screen)
        if !matches!(
            self.screen,
            Screen::Home | Screen::Loading(_) | Screen::Error(_)
        ) {
            self.history.push(self.screen.clone());
        }
        self.screen = Screen::Loading(msg.to_string());
    }

    pub fn set_error(&mut self, msg: String) {
        if !matches!(
            self.screen,
            Screen::Home | Screen::Loading(_) | Screen::Error(_)
        ) {
            self.history.push(self.screen.clone());
        }
        self.screen = Screen::Error(msg);
    }

    pub fn set_block_result(&mut self, block: Block) {
        self.navigate_to(Screen::BlockResult(BlockResult {
            block,
            selected_index: 0,
        }));
    }

    pub fn set_tx_result(&mut self, detail: TxDetail) {
        self.navigate_to(Screen::TxResult(TxResult {
            detail,
            selected_link: 0,
        }));
    }

    pub fn set_address_result(&mut self, detail: AddressDetail) {
        self.navigate_to(Screen::AddressResult(AddressResult {
            detail,
            tab: AddressTab::default(),
            selected_link: 0,
        }));
    }

    pub fn set_contracts_result(&mut self, contracts: Vec<AddressInfo>) {
        self.navigate_to(Screen::Contracts(ContractsResult {
            contracts,
            selected_index: 0,
        }));
    }

    /// Switch the address screen to the next activity tab
    pub fn next_tab(&mut self) {
        if let Screen::AddressResult(result) = &mut self.screen {
            result.tab = result.tab.next();
            result.selected_link = 0;
        }
    }

    pub fn prev_tab(&mut self) {
        if let Screen::AddressResult(result) = &mut self.screen {
            result.tab = result.tab.prev();
            result.selected_link = 0;
        }
    }

    pub fn is_on_home(&self) -> bool {
        matches!(self.screen, Screen::Home)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading(_))
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        match &mut self.screen {
            Screen::Home => {
                let len = self.focused_live_len();
                if len > 0 {
                    self.live_selected = if self.live_selected == 0 {
                        len - 1
                    } else {
                        self.live_selected - 1
                    };
                }
            }
            Screen::BlockResult(result) => {
                if result.selected_index > 0 {
                    result.selected_index -= 1;
                }
            }
            Screen::TxResult(result) => {
                let max = tx_links(&result.detail).len();
                result.selected_link = if result.selected_link > 0 {
                    result.selected_link - 1
                } else {
                    max.saturating_sub(1)
                };
            }
            Screen::AddressResult(result) => {
                let max = address_links(&result.detail, result.tab).len();
                if max > 0 {
                    result.selected_link = if result.selected_link > 0 {
                        result.selected_link - 1
                    } else {
                        max - 1
                    };
                }
            }
            Screen::Contracts(result) => {
                result.selected_index = result.selected_index.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        match &mut self.screen {
            Screen::Home => {
                let len = self.focused_live_len();
                if len > 0 {
                    self.live_selected = (self.live_selected + 1) % len;
                }
            }
            Screen::BlockResult(result) => {
                let len = result.block.transactions.as_ref().map_or(0, Vec::len);
                if len > 0 && result.selected_index < len - 1 {
                    result.selected_index += 1;
                }
            }
            Screen::TxResult(result) => {
                let max = tx_links(&result.detail).len();
                result.selected_link = (result.selected_link + 1) % max;
            }
            Screen::AddressResult(result) => {
                let max = address_links(&result.detail, result.tab).len();
                if max > 0 {
                    result.selected_link = (result.selected_link + 1) % max;
                }
            }
            Screen::Contracts(result) => {
                if result.selected_index + 1 < result.contracts.len() {
                    result.selected_index += 1;
                }
            }
            _ => {}
        }
    }

    /// Get the currently selected navigation link
    pub fn get_selected_link(&self) -> Option<NavLink> {
        match &self.screen {
            Screen::Home => match self.home_focus {
                HomeFocus::Search => None,
                HomeFocus::Blocks => self
                    .latest_blocks
                    .items()
                    .get(self.live_selected)
                    .map(|b| NavLink::Block(b.key().to_string())),
                HomeFocus::Transactions => self
                    .latest_transactions
                    .items()
                    .get(self.live_selected)
                    .map(|tx| NavLink::Transaction(tx.key().to_string())),
            },
            Screen::BlockResult(result) => result
                .block
                .transactions
                .as_ref()
                .and_then(|txs| txs.get(result.selected_index))
                .map(|tx| NavLink::Transaction(tx.hash.clone())),
            Screen::TxResult(result) => tx_links(&result.detail).get(result.selected_link).cloned(),
            Screen::AddressResult(result) => address_links(&result.detail, result.tab)
                .get(result.selected_link)
                .cloned(),
            Screen::Contracts(result) => result
                .contracts
                .get(result.selected_index)
                .map(|c| NavLink::Address(c.address.clone())),
            _ => None,
        }
    }
}
