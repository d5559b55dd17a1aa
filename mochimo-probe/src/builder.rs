use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::rosetta::{
    AccountBalanceRequest, AccountIdentifier, BlockIdentifier, BlockRequest,
    BlockTransactionRequest, ConstructionPreprocessRequest, MempoolTransactionRequest,
    MetadataRequest, NetworkIdentifier, NetworkRequest, Operation, TransactionIdentifier,
};

/// API endpoints the probes can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Block by index and/or hash
    Block,
    /// One transaction inside a block
    BlockTransaction,
    /// Balance of one account
    AccountBalance,
    /// Metadata needed to build a transaction from proposed operations
    ConstructionPreprocess,
    /// Networks the node serves
    NetworkList,
    /// Current and genesis block, peers
    NetworkStatus,
    /// Versions and allowed operation types
    NetworkOptions,
    /// Transaction identifiers waiting in the mempool
    Mempool,
    /// One mempool transaction
    MempoolTransaction,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Block => "/block",
            Endpoint::BlockTransaction => "/block/transaction",
            Endpoint::AccountBalance => "/account/balance",
            Endpoint::ConstructionPreprocess => "/construction/preprocess",
            Endpoint::NetworkList => "/network/list",
            Endpoint::NetworkStatus => "/network/status",
            Endpoint::NetworkOptions => "/network/options",
            Endpoint::Mempool => "/mempool",
            Endpoint::MempoolTransaction => "/mempool/transaction",
        }
    }
}

/// A ready-to-send request: where it goes and the JSON it carries
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub endpoint: Endpoint,
    pub payload: Value,
}

impl ProbeRequest {
    /// Serialize a request body for `endpoint`
    ///
    /// # Panics
    ///
    /// Panics if `body` cannot be represented as JSON. Every request body in
    /// `models::rosetta` is made of strings, integers and string-keyed maps,
    /// none of which can fail to serialize.
    fn new<T: Serialize>(endpoint: Endpoint, body: &T) -> Self {
        let payload = serde_json::to_value(body).expect("request bodies always serialize to JSON");
        debug!(path = endpoint.path(), %payload, "Built request");
        Self { endpoint, payload }
    }

    /// UTF-8 JSON body as sent on the wire
    pub fn body(&self) -> String {
        self.payload.to_string()
    }
}

/// Assembles request envelopes for one network
///
/// No validation happens here; whatever the caller passes is forwarded and
/// the API decides whether to accept it.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    network: NetworkIdentifier,
}

impl RequestBuilder {
    pub fn new(network: NetworkIdentifier) -> Self {
        Self { network }
    }

    /// Network identifier stamped on every request
    pub fn network(&self) -> &NetworkIdentifier {
        &self.network
    }

    /// `/block` with arbitrary index and hash; both are sent, `None` as null
    pub fn block(&self, index: Option<i64>, hash: Option<&str>) -> ProbeRequest {
        ProbeRequest::new(
            Endpoint::Block,
            &BlockRequest {
                network_identifier: self.network.clone(),
                block_identifier: BlockIdentifier {
                    index,
                    hash: hash.map(str::to_string),
                },
            },
        )
    }

    /// `/block` by height; hash goes out as null
    pub fn block_by_index(&self, index: i64) -> ProbeRequest {
        self.block(Some(index), None)
    }

    /// `/block` by hash; index goes out as null
    pub fn block_by_hash(&self, hash: &str) -> ProbeRequest {
        self.block(None, Some(hash))
    }

    /// `/block/transaction` for a transaction inside the given block
    pub fn block_transaction(
        &self,
        block_identifier: BlockIdentifier,
        transaction_hash: &str,
    ) -> ProbeRequest {
        ProbeRequest::new(
            Endpoint::BlockTransaction,
            &BlockTransactionRequest {
                network_identifier: self.network.clone(),
                block_identifier,
                transaction_identifier: TransactionIdentifier {
                    hash: transaction_hash.to_string(),
                },
            },
        )
    }

    /// `/account/balance` for one address
    ///
    /// # Arguments
    ///
    /// * `address` - Account address, forwarded unchecked
    ///
    /// # Returns
    ///
    /// * `ProbeRequest` - Request targeting [`Endpoint::AccountBalance`]
    pub fn account_balance(&self, address: &str) -> ProbeRequest {
        ProbeRequest::new(
            Endpoint::AccountBalance,
            &AccountBalanceRequest {
                network_identifier: self.network.clone(),
                account_identifier: AccountIdentifier {
                    address: address.to_string(),
                },
            },
        )
    }

    /// `/construction/preprocess` for the given operations, in order
    pub fn construction_preprocess(
        &self,
        operations: Vec<Operation>,
        metadata: Map<String, Value>,
    ) -> ProbeRequest {
        ProbeRequest::new(
            Endpoint::ConstructionPreprocess,
            &ConstructionPreprocessRequest {
                network_identifier: self.network.clone(),
                operations,
                metadata,
            },
        )
    }

    /// `/network/list`; carries only an empty metadata map
    pub fn network_list(&self) -> ProbeRequest {
        ProbeRequest::new(Endpoint::NetworkList, &MetadataRequest::default())
    }

    /// `/network/status`
    pub fn network_status(&self) -> ProbeRequest {
        self.network_only(Endpoint::NetworkStatus)
    }

    /// `/network/options`
    pub fn network_options(&self) -> ProbeRequest {
        self.network_only(Endpoint::NetworkOptions)
    }

    /// `/mempool`
    pub fn mempool(&self) -> ProbeRequest {
        self.network_only(Endpoint::Mempool)
    }

    /// `/mempool/transaction` for one transaction hash
    pub fn mempool_transaction(&self, transaction_hash: &str) -> ProbeRequest {
        ProbeRequest::new(
            Endpoint::MempoolTransaction,
            &MempoolTransactionRequest {
                network_identifier: self.network.clone(),
                transaction_identifier: TransactionIdentifier {
                    hash: transaction_hash.to_string(),
                },
            },
        )
    }

    fn network_only(&self, endpoint: Endpoint) -> ProbeRequest {
        ProbeRequest::new(
            endpoint,
            &NetworkRequest {
                network_identifier: self.network.clone(),
            },
        )
    }
}
