use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Decimal, Uint128, Uint256};

use crate::state::{Config, ProtocolState, RandomnessRequest, StoredBeacon};

#[cw_serde]
pub struct InstantiateMsg {
    /// Hex-encoded beacon public key (96 bytes = 192 hex chars)
    pub public_key_hex: String,
    pub genesis_time: u64,
    pub period_seconds: u64,
    pub fee_denom: String,
    pub base_request_fee: Uint128,
    /// Reference gas price in fee denom units per gas unit
    pub gas_price: Decimal,
    pub max_callback_gas: u64,
    pub max_deadline_delta: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Request randomness for the first beacon round at or after `deadline`.
    /// Attach at least the quoted price in the fee denom.
    RequestRandomness {
        deadline: u64,
        callback_gas_limit: u64,
    },
    /// Fulfill a pending request with the beacon signature for its round.
    /// Permissionless; parameters must match the request's commitment.
    FulfillRandomness {
        request_id: u64,
        requester: String,
        round: u64,
        callback_gas_limit: u64,
        /// Hex-encoded BLS signature (48 bytes = 96 hex chars)
        signature_hex: String,
    },
    /// Update the reference gas price (admin only).
    UpdateGasPrice { gas_price: Decimal },
    /// Withdraw retained fees (admin only). Defaults to the admin as recipient.
    Withdraw {
        amount: Uint128,
        recipient: Option<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    #[returns(ProtocolState)]
    State {},

    /// Price at the configured gas price unless `gas_price` is given.
    #[returns(Coin)]
    RequestPrice {
        callback_gas_limit: u64,
        gas_price: Option<Decimal>,
    },

    /// Zero until the request is fulfilled.
    #[returns(Uint256)]
    Randomness { request_id: u64 },

    #[returns(Option<RandomnessRequest>)]
    Request { request_id: u64 },

    #[returns(RequestsResponse)]
    Requests {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(Option<StoredBeacon>)]
    Beacon { round: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct RequestsResponse {
    pub requests: Vec<RandomnessRequest>,
}

/// Parameters for `fulfill_randomness`.
pub struct FulfillRandomnessParams {
    pub request_id: u64,
    pub requester: String,
    pub round: u64,
    pub callback_gas_limit: u64,
    pub signature_hex: String,
}
