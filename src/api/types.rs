use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::live::Ranked;

// ============================================================================
// Envelope
// ============================================================================

/// List endpoints wrap their rows in this envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
            count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

// ============================================================================
// Blocks
// ============================================================================

/// Row of the latest-blocks feed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub number: String,
    #[serde(default)]
    pub hash: String,
    pub timestamp: String,
    #[serde(default)]
    pub transaction_count: u64,
    pub miner: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub gas_limit: String,
}

impl Ranked for BlockSummary {
    fn key(&self) -> &str {
        &self.number
    }
}

/// Full block as returned by the block endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: String,
    pub hash: String,
    #[serde(default)]
    pub parent_hash: String,
    pub timestamp: String,
    pub miner: String,
    #[serde(default)]
    pub gas_limit: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub state_root: Option<String>,
    #[serde(default)]
    pub receipts_root: Option<String>,
    #[serde(default)]
    pub transactions_root: Option<String>,
    #[serde(default)]
    pub extra_data: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub transactions: Option<Vec<TxSummary>>,
}

// ============================================================================
// Transactions
// ============================================================================

/// Row of the latest-transactions feed and of per-block / per-address lists
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSummary {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub function_signature: Option<String>,
}

impl Ranked for TxSummary {
    fn key(&self) -> &str {
        &self.hash
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub max_fee_per_gas: Option<String>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub effective_gas_price: Option<String>,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub transaction_index: u64,
    #[serde(default)]
    pub nonce: u64,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub method_id: Option<String>,
    #[serde(default)]
    pub function_signature: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(rename = "type", default)]
    pub tx_type: Option<u8>,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(default)]
    pub internal_transactions: Vec<InternalTransaction>,
}

impl Transaction {
    /// gasUsed * effective price, when the indexer reports both
    pub fn fee_paid(&self) -> Option<U256> {
        let price = self
            .effective_gas_price
            .as_deref()
            .or(self.gas_price.as_deref())?;
        let used = parse_quantity(&self.gas_used)?;
        Some(used * parse_quantity(price)?)
    }

    pub fn type_name(&self) -> &'static str {
        match self.tx_type {
            Some(0) => "Legacy",
            Some(1) => "Access List (EIP-2930)",
            Some(2) => "EIP-1559",
            Some(3) => "Blob (EIP-4844)",
            Some(4) => "Set Code (EIP-7702)",
            Some(_) | None => "Unknown",
        }
    }

    /// Input payload size in bytes
    pub fn input_size(&self) -> usize {
        self.input
            .as_deref()
            .map(|s| s.trim_start_matches("0x").len() / 2)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub log_index: u64,
}

/// Value transfer made by a call during another transaction
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransaction {
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_used: String,
    /// Call kind as reported by the tracer: call, create, delegatecall...
    #[serde(rename = "type", default)]
    pub call_type: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ============================================================================
// Addresses
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub address: String,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub first_seen_block: Option<String>,
    #[serde(default)]
    pub last_seen_block: Option<String>,
    #[serde(default)]
    pub is_contract: bool,
    #[serde(default)]
    pub contract_creator: Option<String>,
    #[serde(default)]
    pub contract_creation_tx: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMetadata {
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub is_token: Option<bool>,
    #[serde(default)]
    pub token_standard: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AddressMetadata {
    pub fn verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_address: String,
    #[serde(default)]
    pub holder_address: String,
    pub balance: String,
    pub token: Token,
}

/// ERC-20 transfer touching an address
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from: String,
    pub to: String,
    pub value: String,
    #[serde(default)]
    pub token_address: String,
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub log_index: u64,
    #[serde(default)]
    pub token: Token,
}

// ============================================================================
// NFTs
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// `ERC721` or `ERC1155`
    #[serde(default)]
    pub token_type: String,
}

/// NFT held by an address
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftToken {
    pub collection_address: String,
    pub token_id: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    /// Held amount for ERC-1155 tokens
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub collection: Option<NftCollection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftTransfer {
    pub collection_address: String,
    pub token_id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub token_type: String,
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub collection: Option<NftCollection>,
}

impl NftCollection {
    /// Collection name, falling back to its symbol
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }
}

/// Everything the address screen shows, gathered from several endpoints
#[derive(Debug, Clone, Default)]
pub struct AddressDetail {
    pub info: AddressInfo,
    pub metadata: Option<AddressMetadata>,
    pub transactions: Vec<TxSummary>,
    pub token_balances: Vec<TokenBalance>,
    pub token_transfers: Vec<TokenTransfer>,
    pub internal_transactions: Vec<InternalTransaction>,
    pub nfts: Vec<NftToken>,
    pub nft_transfers: Vec<NftTransfer>,
}

/// Transaction plus display names for its endpoints
#[derive(Debug, Clone, Default)]
pub struct TxDetail {
    pub tx: Transaction,
    pub from_metadata: Option<AddressMetadata>,
    pub to_metadata: Option<AddressMetadata>,
}

// ============================================================================
// Quantities
// ============================================================================

/// Parse an indexer quantity: decimal string, or `0x` hex
pub fn parse_quantity(s: &str) -> Option<U256> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        U256::from_str_radix(hex, 16).ok()
    } else {
        U256::from_str_radix(s, 10).ok()
    }
}

/// Parse a quantity that fits in a u64 (gas, timestamps, block numbers)
pub fn parse_u64(s: &str) -> Option<u64> {
    parse_quantity(s)
        .filter(|v| *v <= U256::from(u64::MAX))
        .map(|v| v.to::<u64>())
}
