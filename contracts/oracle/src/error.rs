use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid deadline {deadline}: {reason}")]
    InvalidDeadline { deadline: u64, reason: String },

    #[error("insufficient payment: need {required}, got {sent}")]
    InsufficientPayment { required: Uint128, sent: Uint128 },

    #[error("unexpected funds in {denom}: only the fee denom is accepted")]
    UnexpectedDenom { denom: String },

    #[error("callback gas limit {requested} exceeds maximum {max}")]
    ExcessiveGasLimit { requested: u64, max: u64 },

    #[error("request {request_id} not found or parameters do not match its commitment")]
    RequestNotFoundOrMismatched { request_id: u64 },

    #[error("request {request_id} is no longer pending")]
    AlreadyFulfilled { request_id: u64 },

    #[error("beacon round {round} not signable until {signable_at}")]
    BeaconNotReady { round: u64, signable_at: u64 },

    #[error("beacon signature does not verify for round {round}")]
    InvalidSignature { round: u64 },

    #[error("malformed curve point: {reason}")]
    MalformedPoint { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("invalid pubkey length: expected 96 bytes, got {got}")]
    InvalidPubkeyLength { got: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("request price overflows")]
    PriceOverflow,

    #[error("insufficient fee balance: requested {requested}, available {available}")]
    InsufficientFeeBalance {
        requested: Uint128,
        available: Uint128,
    },
}
