use beacon_rand_common::RandomnessCallback;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Uint128};

use crate::state::ConsumerConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub oracle: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Ask the oracle for randomness `deadline_delta` seconds from now.
    /// Attached funds are forwarded as the request fee.
    GetRandom {
        deadline_delta: u64,
        callback_gas_limit: u64,
    },
    /// Delivery from the oracle.
    ReceiveRandomness(RandomnessCallback),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConsumerConfig)]
    Config {},

    #[returns(Option<HexBinary>)]
    Randomness { request_id: u64 },

    /// Face 1..=6 derived from the delivered randomness.
    #[returns(Option<u8>)]
    DiceRoll { request_id: u64 },

    /// Account that asked for the roll.
    #[returns(Option<Addr>)]
    Player { request_id: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Execute message for the randomness oracle contract.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomness {
        deadline: u64,
        callback_gas_limit: u64,
    },
}

/// Query message for the randomness oracle contract.
#[cw_serde]
pub enum OracleQueryMsg {
    State {},
}

/// Subset of the oracle's `State {}` response.
#[cw_serde]
pub struct OracleStateResponse {
    pub next_request_id: u64,
    pub fee_balance: Uint128,
}
