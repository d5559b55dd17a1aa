use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Blockchain name every request is scoped to unless configured otherwise
pub const DEFAULT_BLOCKCHAIN: &str = "mochimo";

/// Network name every request is scoped to unless configured otherwise
pub const DEFAULT_NETWORK: &str = "mainnet";

/// Rosetta network identifier
///
/// Scopes a request to one chain and environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    /// Blockchain name (e.g. "mochimo")
    pub blockchain: String,

    /// Network name (e.g. "mainnet")
    pub network: String,
}

impl Default for NetworkIdentifier {
    fn default() -> Self {
        Self {
            blockchain: DEFAULT_BLOCKCHAIN.to_string(),
            network: DEFAULT_NETWORK.to_string(),
        }
    }
}

/// Block lookup key
///
/// Both fields are always serialized, an unset one as `null`. Which of the
/// two the API honours when both are present is up to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockIdentifier {
    pub index: Option<i64>,
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: i64,
}

/// Currency an amount is denominated in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

impl Currency {
    /// Native Mochimo currency, 9 decimal places
    pub fn mcm() -> Self {
        Self {
            symbol: "MCM".to_string(),
            decimals: 9,
        }
    }
}

/// Signed decimal amount, kept as a string exactly as the API expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

/// A single proposed balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,

    #[serde(rename = "type")]
    pub kind: String,

    pub account: AccountIdentifier,

    pub amount: Amount,
}

impl Operation {
    /// Build a `TRANSFER` operation
    ///
    /// The value is passed through as-is; a debit is written with a leading `-`.
    pub fn transfer(index: i64, address: &str, value: &str, currency: Currency) -> Self {
        Self {
            operation_identifier: OperationIdentifier { index },
            kind: "TRANSFER".to_string(),
            account: AccountIdentifier {
                address: address.to_string(),
            },
            amount: Amount {
                value: value.to_string(),
                currency,
            },
        }
    }
}

/// Body for `/block`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRequest {
    pub network_identifier: NetworkIdentifier,
    pub block_identifier: BlockIdentifier,
}

/// Body for `/block/transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTransactionRequest {
    pub network_identifier: NetworkIdentifier,
    pub block_identifier: BlockIdentifier,
    pub transaction_identifier: TransactionIdentifier,
}

/// Body for `/account/balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceRequest {
    pub network_identifier: NetworkIdentifier,
    pub account_identifier: AccountIdentifier,
}

/// Body for `/construction/preprocess`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionPreprocessRequest {
    pub network_identifier: NetworkIdentifier,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Body for `/network/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetadataRequest {
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Body for `/network/status`, `/network/options` and `/mempool`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub network_identifier: NetworkIdentifier,
}

/// Body for `/mempool/transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolTransactionRequest {
    pub network_identifier: NetworkIdentifier,
    pub transaction_identifier: TransactionIdentifier,
}

/// Error body returned by the API on most non-200 responses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosettaError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub retriable: bool,
}

impl RosettaError {
    /// Try to read a response body as a Rosetta error object
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
