//! monex - terminal explorer for indexer-backed EVM chains
//!
//! Blocks, transactions and addresses come from an external indexing API.
//! The home screen keeps the latest blocks and transactions live.

pub mod api;
pub mod app;
pub mod config;
pub mod live;
pub mod logging;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use app::{AddressResult, App, BlockResult, NavLink, Screen, TxResult};
pub use config::Config;
pub use live::{LiveEvent, LiveList, Poller};
pub use search::{SearchPreview, SearchQuery};
