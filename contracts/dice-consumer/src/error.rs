use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("randomness for request {request_id} already received")]
    AlreadyReceived { request_id: u64 },

    #[error("randomness must be 32 bytes, got {got}")]
    InvalidRandomness { got: usize },

    #[error("deadline delta must be positive")]
    ZeroDeadlineDelta,
}
