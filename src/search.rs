use crate::api::AddressMetadata;

/// Represents the type of search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Block number (decimal digits only)
    Block(String),
    /// Transaction hash (0x + 64 hex chars)
    Transaction(String),
    /// Address (0x + 40 hex chars)
    Address(String),
    /// Anything that cannot be navigated to
    Unknown,
}

const TX_HASH_HEX_LEN: usize = 64;
const ADDRESS_HEX_LEN: usize = 40;

impl SearchQuery {
    /// Classify a search string by its lexical shape.
    ///
    /// Hash and address are told apart by exact length only, so a string one
    /// digit too long or too short is `Unknown` rather than the nearest match.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Unknown;
        }

        if let Some(hex_part) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Self::Unknown;
            }

            let normalized = format!("0x{}", hex_part.to_ascii_lowercase());
            return match hex_part.len() {
                TX_HASH_HEX_LEN => Self::Transaction(normalized),
                ADDRESS_HEX_LEN => Self::Address(normalized),
                _ => Self::Unknown,
            };
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Self::Block(trimmed.to_string())
        } else {
            Self::Unknown
        }
    }

    /// Navigation path for this classification, `None` when unknown
    pub fn url(&self) -> Option<String> {
        match self {
            Self::Block(number) => Some(format!("/block/{number}")),
            Self::Transaction(hash) => Some(format!("/tx/{hash}")),
            Self::Address(addr) => Some(format!("/address/{addr}")),
            Self::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Block(_) => "Block",
            Self::Transaction(_) => "Transaction",
            Self::Address(_) => "Address",
            Self::Unknown => "Unknown",
        }
    }

    /// The normalized value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Block(v) | Self::Transaction(v) | Self::Address(v) => Some(v),
            Self::Unknown => None,
        }
    }

    pub fn is_navigable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns a human-readable description of the query type
    pub fn description(&self) -> String {
        match self.value() {
            Some(value) => format!("{}: {value}", self.label()),
            None => "No match. Enter a block number, transaction hash, or address.".to_string(),
        }
    }
}

/// An address metadata lookup the caller should run.
///
/// The result must be handed back to [`SearchPreview::resolve`] with the
/// same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRequest {
    pub token: u64,
    pub address: String,
}

/// Live classification of the search bar plus its optional metadata enrichment
#[derive(Debug, Clone)]
pub struct SearchPreview {
    query: String,
    classification: SearchQuery,
    token: u64,
    metadata: Option<AddressMetadata>,
    loading: bool,
}

impl Default for SearchPreview {
    fn default() -> Self {
        Self {
            query: String::new(),
            classification: SearchQuery::Unknown,
            token: 0,
            metadata: None,
            loading: false,
        }
    }
}

impl SearchPreview {
    /// Reclassify after the input changed.
    ///
    /// Returns a lookup request when the new query is an address. Any lookup
    /// still in flight for an older query becomes stale.
    pub fn update(&mut self, input: &str) -> Option<MetadataRequest> {
        let trimmed = input.trim();
        if trimmed == self.query {
            return None;
        }

        self.query = trimmed.to_string();
        self.classification = SearchQuery::parse(trimmed);
        self.token += 1;
        self.metadata = None;

        match &self.classification {
            SearchQuery::Address(address) => {
                self.loading = true;
                Some(MetadataRequest {
                    token: self.token,
                    address: address.clone(),
                })
            }
            _ => {
                self.loading = false;
                None
            }
        }
    }

    /// Apply a finished lookup. Returns `false` if the result was stale and dropped.
    pub fn resolve(&mut self, token: u64, metadata: Option<AddressMetadata>) -> bool {
        if token != self.token {
            tracing::debug!(token, current = self.token, "Discarding stale metadata lookup");
            return false;
        }

        self.metadata = metadata;
        self.loading = false;
        true
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.classification = SearchQuery::Unknown;
        self.token += 1;
        self.metadata = None;
        self.loading = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn classification(&self) -> &SearchQuery {
        &self.classification
    }

    pub fn url(&self) -> Option<String> {
        self.classification.url()
    }

    pub fn metadata(&self) -> Option<&AddressMetadata> {
        self.metadata.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
