mod error;
mod types;

pub use error::ApiError;
pub use types::*;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the indexing API, with retry logic for on-demand lookups
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
            max_retries: 5,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Override the retry policy (tests use a zero delay)
    pub fn with_retry_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }

    async fn with_retry<T, F, Fut>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay * 2_u32.pow(attempt);
                    tracing::debug!(attempt = attempt + 1, ?delay, error = %e, "Retrying request");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // ==================== Live feeds (no retry: the next tick retries) ====================

    pub async fn get_latest_blocks(&self, limit: usize) -> Result<Paginated<BlockSummary>, ApiError> {
        self.get_json(format!("/api/blocks/latest?limit={limit}"))
            .await
    }

    pub async fn get_latest_transactions(
        &self,
        limit: usize,
    ) -> Result<Paginated<TxSummary>, ApiError> {
        self.get_json(format!("/api/transactions/latest?limit={limit}"))
            .await
    }

    /// Display metadata for an address. A 404 means "nothing known", not an error.
    pub async fn get_address_metadata(
        &self,
        address: &str,
    ) -> Result<Option<AddressMetadata>, ApiError> {
        match self
            .get_json(format!("/api/metadata/address/{address}"))
            .await
        {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ==================== Detail lookups ====================

    pub async fn get_block(&self, number: &str) -> Result<Block, ApiError> {
        self.with_retry(|| self.get_json(format!("/api/blocks/{number}")))
            .await
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<Transaction, ApiError> {
        self.with_retry(|| self.get_json(format!("/api/transactions/{hash}")))
            .await
    }

    pub async fn get_address(&self, address: &str) -> Result<AddressInfo, ApiError> {
        self.with_retry(|| self.get_json(format!("/api/addresses/{address}")))
            .await
    }

    /// One page of a per-address list resource
    async fn get_address_page<T: DeserializeOwned>(
        &self,
        prefix: &str,
        address: &str,
        resource: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<T>, ApiError> {
        self.with_retry(|| {
            self.get_json(format!(
                "{prefix}/{address}/{resource}?page={page}&limit={limit}"
            ))
        })
        .await
    }

    pub async fn get_address_transactions(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<TxSummary>, ApiError> {
        self.get_address_page("/api/addresses", address, "transactions", page, limit)
            .await
    }

    pub async fn get_address_token_balances(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<TokenBalance>, ApiError> {
        self.get_address_page("/api/addresses", address, "token-balances", page, limit)
            .await
    }

    pub async fn get_address_token_transfers(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<TokenTransfer>, ApiError> {
        self.get_address_page("/api/addresses", address, "token-transfers", page, limit)
            .await
    }

    pub async fn get_address_internal_transactions(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<InternalTransaction>, ApiError> {
        self.get_address_page("/api/addresses", address, "internal-transactions", page, limit)
            .await
    }

    pub async fn get_address_nfts(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<NftToken>, ApiError> {
        self.get_address_page("/api/nfts/address", address, "nfts", page, limit)
            .await
    }

    pub async fn get_address_nft_transfers(
        &self,
        address: &str,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<NftTransfer>, ApiError> {
        self.get_address_page("/api/nfts/address", address, "nft-transfers", page, limit)
            .await
    }

    /// Indexed contracts, newest first
    pub async fn get_contracts(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<AddressInfo>, ApiError> {
        self.with_retry(|| {
            self.get_json(format!(
                "/api/addresses/contracts/list?page={page}&limit={limit}"
            ))
        })
        .await
    }

    /// Transaction with metadata for both endpoints. Metadata failures degrade to `None`.
    pub async fn get_tx_detail(&self, hash: &str) -> Result<TxDetail, ApiError> {
        let tx = self.get_transaction(hash).await?;

        let (from_metadata, to_metadata) = tokio::join!(
            self.lookup_metadata(&tx.from),
            async {
                match &tx.to {
                    Some(to) => self.lookup_metadata(to).await,
                    None => None,
                }
            }
        );

        Ok(TxDetail {
            tx,
            from_metadata,
            to_metadata,
        })
    }

    /// Address summary plus metadata and the first page of every list shown on
    /// the address screen.
    ///
    /// Only the summary is required; the other parts fall back to empty.
    pub async fn get_address_detail(&self, address: &str) -> Result<AddressDetail, ApiError> {
        let (
            info,
            metadata,
            transactions,
            token_balances,
            token_transfers,
            internal_transactions,
            nfts,
            nft_transfers,
        ) = tokio::join!(
            self.get_address(address),
            self.lookup_metadata(address),
            self.get_address_transactions(address, 1, 20),
            self.get_address_token_balances(address, 1, 50),
            self.get_address_token_transfers(address, 1, 20),
            self.get_address_internal_transactions(address, 1, 20),
            self.get_address_nfts(address, 1, 20),
            self.get_address_nft_transfers(address, 1, 20),
        );

        Ok(AddressDetail {
            info: info?,
            metadata,
            transactions: rows_or_empty(address, "transactions", transactions),
            token_balances: rows_or_empty(address, "token balances", token_balances),
            token_transfers: rows_or_empty(address, "token transfers", token_transfers),
            internal_transactions: rows_or_empty(
                address,
                "internal transactions",
                internal_transactions,
            ),
            nfts: rows_or_empty(address, "NFTs", nfts),
            nft_transfers: rows_or_empty(address, "NFT transfers", nft_transfers),
        })
    }

    /// Best-effort metadata: any failure is "no enrichment"
    pub async fn lookup_metadata(&self, address: &str) -> Option<AddressMetadata> {
        match self.get_address_metadata(address).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!(%address, error = %e, "Metadata lookup failed");
                None
            }
        }
    }
}

fn rows_or_empty<T>(address: &str, part: &str, result: Result<Paginated<T>, ApiError>) -> Vec<T> {
    match result {
        Ok(page) => page.data,
        Err(e) => {
            tracing::warn!(%address, error = %e, "Address {part} unavailable");
            Vec::new()
        }
    }
}
