use monex::api::{
    AddressDetail, AddressInfo, AddressMetadata, Block, BlockSummary, TxDetail, TxSummary,
};
use monex::app::{App, HomeFocus, NavLink};
use monex::config::Config;
use monex::live::{LiveEvent, Poller};
use monex::logging;
use monex::search::{MetadataRequest, SearchQuery};
use monex::ui;

use anyhow::{Context, Result};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tui_input::backend::crossterm::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init_logs(&Config::config_dir()?)?;
    let config = Config::load()?;
    tracing::info!(log = ?log_path, api = ?config.api_url(), "Starting monex");

    run_tui(config).await?;

    Ok(())
}

const CONTRACTS_PAGE_SIZE: u64 = 50;

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    Blocks(LiveEvent<BlockSummary>),
    Transactions(LiveEvent<TxSummary>),
    Metadata {
        token: u64,
        metadata: Option<AddressMetadata>,
    },
    BlockResult(Result<Block>),
    TxResult(Result<TxDetail>),
    AddressResult(Result<AddressDetail>),
    ContractsResult(Result<Vec<AddressInfo>>),
}

/// The two background refresh loops behind the home screen widgets
struct LiveFeeds {
    blocks: Poller,
    transactions: Poller,
}

impl LiveFeeds {
    fn dispose(self) {
        self.blocks.dispose();
        self.transactions.dispose();
    }
}

async fn run_tui(config: Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(64);

    let mut feeds = None;
    if app.has_api() {
        feeds = start_live_feeds(&mut terminal, &mut app, &tx).await?;
    }

    let result = run_event_loop(&mut terminal, &mut app, &mut feeds, tx, &mut rx).await;

    if let Some(feeds) = feeds {
        feeds.dispose();
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Fetch the initial snapshots, then start polling from them.
/// A failed initial fetch leaves that widget empty until the first refresh.
async fn start_live_feeds(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: &mpsc::Sender<AsyncMessage>,
) -> Result<Option<LiveFeeds>> {
    let Some(client) = app.api_client.clone() else {
        return Ok(None);
    };
    let limit = app.config.page_size;

    app.set_loading("Loading latest blocks and transactions...");
    terminal.draw(|frame| ui::draw(frame, app))?;

    let (blocks, transactions) = tokio::join!(
        client.get_latest_blocks(limit),
        client.get_latest_transactions(limit)
    );
    let blocks = blocks.map(|page| page.data).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Initial blocks fetch failed");
        Vec::new()
    });
    let transactions = transactions.map(|page| page.data).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Initial transactions fetch failed");
        Vec::new()
    });
    app.seed_live(blocks, transactions);
    app.go_home();

    let period = app.config.poll_interval();

    let blocks_client = client.clone();
    let blocks = Poller::spawn(
        "latest-blocks",
        period,
        move || {
            let client = blocks_client.clone();
            async move { client.get_latest_blocks(limit).await.map(|page| page.data) }
        },
        tx.clone(),
        AsyncMessage::Blocks,
    );

    let transactions = Poller::spawn(
        "latest-transactions",
        period,
        move || {
            let client = client.clone();
            async move {
                client
                    .get_latest_transactions(limit)
                    .await
                    .map(|page| page.data)
            }
        },
        tx.clone(),
        AsyncMessage::Transactions,
    );

    Ok(Some(LiveFeeds {
        blocks,
        transactions,
    }))
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    feeds: &mut Option<LiveFeeds>,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    let mut last_clock_tick = Instant::now();

    loop {
        // Relative times re-render once a second, independent of polling
        if last_clock_tick.elapsed() >= Duration::from_secs(1) {
            last_clock_tick = Instant::now();
            app.tick_clock(unix_now());
        }
        app.expire_live(Instant::now());

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Check for async results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AsyncMessage::Blocks(event) => app.apply_blocks_event(event, Instant::now()),
                AsyncMessage::Transactions(event) => {
                    app.apply_transactions_event(event, Instant::now())
                }
                AsyncMessage::Metadata { token, metadata } => {
                    app.resolve_metadata(token, metadata);
                }
                AsyncMessage::BlockResult(Ok(block)) => app.set_block_result(block),
                AsyncMessage::TxResult(Ok(detail)) => app.set_tx_result(detail),
                AsyncMessage::AddressResult(Ok(detail)) => app.set_address_result(detail),
                AsyncMessage::ContractsResult(Ok(contracts)) => {
                    app.set_contracts_result(contracts)
                }
                AsyncMessage::BlockResult(Err(e))
                | AsyncMessage::TxResult(Err(e))
                | AsyncMessage::AddressResult(Err(e))
                | AsyncMessage::ContractsResult(Err(e)) => {
                    tracing::warn!(error = %format!("{e:#}"), "Lookup failed");
                    // Use {:#} to get full error chain from anyhow
                    app.set_error(format!("{e:#}"));
                }
            }
        }

        // Poll for input events
        if event::poll(Duration::from_millis(50))? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global keys
                match key.code {
                    KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    _ => {}
                }

                // Screen-specific keys
                if app.is_on_home() {
                    if app.needs_api_setup() {
                        // API setup mode
                        match key.code {
                            KeyCode::Enter => match app.submit_api_url() {
                                Ok(()) => {
                                    *feeds = start_live_feeds(terminal, app, &tx).await?;
                                }
                                Err(e) => {
                                    app.set_error(e);
                                }
                            },
                            KeyCode::Esc => {}
                            _ => {
                                app.api_input.handle_event(&ev);
                            }
                        }
                    } else if app.home_focus != HomeFocus::Search {
                        // Browsing one of the live widgets
                        match key.code {
                            KeyCode::Tab => app.cycle_home_focus(),
                            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                            KeyCode::Enter => {
                                if let Some(link) = app.get_selected_link() {
                                    navigate_to_link(app, link, tx.clone());
                                }
                            }
                            KeyCode::Char('c') if key.modifiers.is_empty() => open_contracts(app, tx.clone()),
                            _ => {}
                        }
                    } else {
                        // Normal search mode with history
                        match key.code {
                            KeyCode::Tab => {
                                app.cycle_home_focus();
                            }
                            KeyCode::Enter => {
                                // Check if a history item is selected
                                if let Some(query) = app.get_selected_history_query() {
                                    app.clear_history_selection();
                                    // Add to history again to move it to top
                                    app.remember_search(query.clone());
                                    execute_search(app, &query, tx.clone());
                                } else if let Some(query) = app.submit_search() {
                                    execute_query(app, query, tx.clone());
                                }
                            }
                            KeyCode::Up => {
                                app.select_history_prev();
                            }
                            KeyCode::Down => {
                                app.select_history_next();
                            }
                            KeyCode::Delete | KeyCode::Backspace
                                if app.selected_history_index.is_some() =>
                            {
                                app.delete_selected_history();
                            }
                            KeyCode::Esc => {}
                            _ => {
                                // Any other key clears history selection and goes to search
                                app.clear_history_selection();
                                app.search_input.handle_event(&ev);
                                if let Some(request) = app.update_search_preview() {
                                    lookup_metadata(app, request, tx.clone());
                                }
                            }
                        }
                    }
                } else if !app.is_loading() {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.select_prev();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.select_next();
                        }
                        KeyCode::Enter => {
                            if let Some(link) = app.get_selected_link() {
                                navigate_to_link(app, link, tx.clone());
                            }
                        }
                        KeyCode::Backspace | KeyCode::Char('b') => {
                            app.go_back();
                        }
                        KeyCode::Char('h') => {
                            app.go_home();
                        }
                        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.next_tab(),
                        KeyCode::Left | KeyCode::BackTab => app.prev_tab(),
                        KeyCode::Char('c') if key.modifiers.is_empty() => open_contracts(app, tx.clone()),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Enrich the search preview with address metadata
fn lookup_metadata(app: &App, request: MetadataRequest, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.api_client.clone() else {
        return;
    };

    tokio::spawn(async move {
        let metadata = client.lookup_metadata(&request.address).await;
        let _ = tx
            .send(AsyncMessage::Metadata {
                token: request.token,
                metadata,
            })
            .await;
    });
}

/// Open the list of indexed contracts
fn open_contracts(app: &mut App, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.api_client.clone() else {
        return;
    };
    let api_url = client.base_url().to_string();
    let limit = CONTRACTS_PAGE_SIZE;

    app.set_loading("Fetching contracts...");
    tokio::spawn(async move {
        let result = client
            .get_contracts(1, limit)
            .await
            .map(|page| page.data)
            .context("Failed to load contracts")
            .map_err(|e| anyhow::anyhow!("{e:#}\n\nAPI: {api_url}"));
        let _ = tx.send(AsyncMessage::ContractsResult(result)).await;
    });
}

fn navigate_to_link(app: &mut App, link: NavLink, tx: mpsc::Sender<AsyncMessage>) {
    execute_search(app, link.query(), tx);
}

fn execute_search(app: &mut App, query: &str, tx: mpsc::Sender<AsyncMessage>) {
    let parsed = SearchQuery::parse(query);

    if !parsed.is_navigable() {
        app.set_error(format!("Not a block number, transaction hash or address: {query}"));
        return;
    }

    execute_query(app, parsed, tx);
}

fn execute_query(app: &mut App, query: SearchQuery, tx: mpsc::Sender<AsyncMessage>) {
    let Some(client) = app.api_client.clone() else {
        app.set_error("No indexer API configured. Set api_url or MONEX_API_URL first.".into());
        return;
    };

    let api_url = client.base_url().to_string();
    tracing::info!(query = %query.description(), "Opening");

    match query {
        SearchQuery::Block(number) => {
            app.set_loading(&format!("Fetching block {number}..."));
            tokio::spawn(async move {
                let result = client
                    .get_block(&number)
                    .await
                    .with_context(|| format!("Failed to load block {number}"))
                    .map_err(|e| anyhow::anyhow!("{e:#}\n\nAPI: {api_url}"));
                let _ = tx.send(AsyncMessage::BlockResult(result)).await;
            });
        }
        SearchQuery::Transaction(hash) => {
            app.set_loading("Fetching transaction...");
            tokio::spawn(async move {
                let result = client
                    .get_tx_detail(&hash)
                    .await
                    .with_context(|| format!("Failed to load transaction {hash}"))
                    .map_err(|e| anyhow::anyhow!("{e:#}\n\nAPI: {api_url}"));
                let _ = tx.send(AsyncMessage::TxResult(result)).await;
            });
        }
        SearchQuery::Address(address) => {
            app.set_loading("Fetching address...");
            tokio::spawn(async move {
                let result = client
                    .get_address_detail(&address)
                    .await
                    .with_context(|| format!("Failed to load address {address}"))
                    .map_err(|e| anyhow::anyhow!("{e:#}\n\nAPI: {api_url}"));
                let _ = tx.send(AsyncMessage::AddressResult(result)).await;
            });
        }
        SearchQuery::Unknown => {}
    }
}
