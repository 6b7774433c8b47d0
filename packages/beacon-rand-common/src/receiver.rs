use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, HexBinary, StdResult};

/// Payload delivered to a requester once its randomness has been verified.
#[cw_serde]
pub struct RandomnessCallback {
    pub request_id: u64,
    /// sha256 of the beacon signature, 32 bytes
    pub randomness: HexBinary,
}

/// Execute message every consumer contract must accept from the oracle.
///
/// Consumers embed the same variant in their own `ExecuteMsg`:
/// `ReceiveRandomness(RandomnessCallback)`.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    ReceiveRandomness(RandomnessCallback),
}

impl ReceiverExecuteMsg {
    pub fn to_binary(&self) -> StdResult<Binary> {
        to_json_binary(self)
    }
}
